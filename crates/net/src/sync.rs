/// Ordering filter for snapshots exchanged with the peer
///
/// Both directions share one high-water mark: the larger of the last sent and
/// the last applied age. Outgoing snapshots must exceed it (so a received
/// snapshot is never sent back), and incoming snapshots must exceed it (so
/// stale, duplicate and echoed snapshots are dropped).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgeGate {
    last_sent: Option<u64>,
    last_applied: Option<u64>,
}

impl AgeGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn high_water(&self) -> u64 {
        self.last_sent
            .unwrap_or(0)
            .max(self.last_applied.unwrap_or(0))
    }

    pub fn last_sent(&self) -> Option<u64> {
        self.last_sent
    }

    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }

    /// Record an outgoing snapshot; false if it must not be sent
    pub fn accept_outgoing(&mut self, age: u64) -> bool {
        if age <= self.high_water() {
            return false;
        }
        self.last_sent = Some(age);
        true
    }

    /// Record an incoming snapshot; false if it must be dropped
    pub fn accept_incoming(&mut self, age: u64) -> bool {
        if age <= self.high_water() {
            return false;
        }
        self.last_applied = Some(age);
        true
    }
}
