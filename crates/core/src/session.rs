//! Session module - the game aggregate and its change notifications
//!
//! [`GameSession`] owns the live [`GameState`] and a publish/subscribe channel.
//! Presentation adapters and the network client register handlers for the
//! notification kinds they care about:
//!
//! - [`NotificationKind::MoveCommitted`]: a local move was applied
//! - [`NotificationKind::NetworkUpdate`]: state arrived from the peer, or the
//!   network game started
//!
//! Handlers run synchronously on the thread that mutated the session, while
//! the caller still holds whatever lock guards the session. They must not call
//! back into the session.

use std::fmt;

use crate::error::{MoveError, MoveResult};
use crate::game_state::GameState;
use crate::snapshot::GameSnapshot;
use crate::types::{Cell, GameMode, Move};

/// What kind of change a notification reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    MoveCommitted,
    NetworkUpdate,
}

/// Which notifications a subscriber receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interest {
    MoveCommitted,
    NetworkUpdate,
    All,
}

impl Interest {
    fn matches(&self, kind: NotificationKind) -> bool {
        match self {
            Interest::All => true,
            Interest::MoveCommitted => kind == NotificationKind::MoveCommitted,
            Interest::NetworkUpdate => kind == NotificationKind::NetworkUpdate,
        }
    }
}

/// A change published by the session, carrying the state after the change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub snapshot: GameSnapshot,
}

/// Handle returned by [`GameSession::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&Notification) + Send>;

struct Subscriber {
    id: SubscriptionId,
    interest: Interest,
    handler: Handler,
}

/// The live game: state plus subscribers
pub struct GameSession {
    state: GameState,
    subscribers: Vec<Subscriber>,
    next_subscription: u64,
}

impl GameSession {
    /// Start a new game in the given mode
    pub fn new(mode: GameMode) -> Self {
        Self::from_state(GameState::new(mode))
    }

    /// Wrap an existing state, e.g. a custom position
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode()
    }

    /// Apply a move for the player on turn and publish `MoveCommitted`
    pub fn try_move(&mut self, from: Cell, to: Cell) -> MoveResult<()> {
        self.state.try_move(from, to)?;
        self.publish(NotificationKind::MoveCommitted);
        Ok(())
    }

    /// Apply a move for the player on turn; false if it was rejected
    ///
    /// A rejected move leaves the session unchanged and publishes nothing.
    pub fn attempt_move(&mut self, from: Cell, to: Cell) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Like [`GameSession::try_move`], from raw coordinates
    pub fn attempt_move_at(&mut self, from: (i8, i8), to: (i8, i8)) -> MoveResult<()> {
        let from = cell_at(from)?;
        let to = cell_at(to)?;
        self.try_move(from, to)
    }

    pub fn play(&mut self, mv: Move) -> MoveResult<()> {
        self.try_move(mv.from, mv.to)
    }

    /// Move a waiting network game to `Running` and publish `NetworkUpdate`
    pub fn begin(&mut self) -> bool {
        let changed = self.state.begin();
        if changed {
            self.publish(NotificationKind::NetworkUpdate);
        }
        changed
    }

    /// Replace the state with one received from the peer and publish
    /// `NetworkUpdate`
    ///
    /// Ordering and deduplication are the caller's concern; this applies
    /// unconditionally.
    pub fn apply_remote(&mut self, snapshot: &GameSnapshot) {
        self.state.apply_snapshot(snapshot);
        self.publish(NotificationKind::NetworkUpdate);
    }

    /// Register a handler for the notifications selected by `interest`
    pub fn subscribe<F>(&mut self, interest: Interest, handler: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push(Subscriber {
            id,
            interest,
            handler: Box::new(handler),
        });
        id
    }

    /// Remove a handler; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn publish(&mut self, kind: NotificationKind) {
        let notification = Notification {
            kind,
            snapshot: self.state.snapshot(),
        };
        for subscriber in &mut self.subscribers {
            if subscriber.interest.matches(kind) {
                (subscriber.handler)(&notification);
            }
        }
    }
}

fn cell_at((column, row): (i8, i8)) -> MoveResult<Cell> {
    Cell::try_new(column, row).ok_or(MoveError::OutOfBounds { column, row })
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
