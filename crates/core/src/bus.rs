//! Replay-latest publish/subscribe primitive.
//!
//! Each [`Feed`] holds the latest snapshot of one stream. Subscribing
//! delivers that snapshot immediately, then every subsequent publish,
//! synchronously and in subscription order. This is the structured
//! stand-in for the reactive subjects the presentation layer observes.

use crate::models::asset::Asset;
use crate::models::portfolio::Portfolio;
use crate::models::state::GameState;

/// Handle returned by [`Feed::subscribe`]; pass to [`Feed::unsubscribe`].
pub type SubscriberId = u64;

type Callback<T> = Box<dyn FnMut(&T) + Send>;

/// Latest value plus an ordered observer list.
pub struct Feed<T> {
    latest: T,
    subscribers: Vec<(SubscriberId, Callback<T>)>,
    next_id: SubscriberId,
}

impl<T> Feed<T> {
    pub fn new(initial: T) -> Self {
        Self {
            latest: initial,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// The current snapshot, without subscribing.
    pub fn latest(&self) -> &T {
        &self.latest
    }

    /// Register an observer. The current value is replayed to it
    /// immediately; afterwards it receives every published value until
    /// unsubscribed.
    pub fn subscribe(&mut self, mut callback: impl FnMut(&T) + Send + 'static) -> SubscriberId {
        let id = self.next_id;
        self.next_id += 1;
        callback(&self.latest);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Stop future notifications for one observer. Returns `false` if the
    /// id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() < before
    }

    /// Swap in a new snapshot and notify every current subscriber, in
    /// subscription order. The swap happens before the first callback
    /// runs, so observers reading [`Feed::latest`] mid-notification see
    /// the new value.
    pub fn publish(&mut self, value: T) {
        self.latest = value;
        for (_, callback) in &mut self.subscribers {
            callback(&self.latest);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Feed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feed")
            .field("latest", &self.latest)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// The three snapshot streams the core publishes: cookie balance, the
/// asset list, and the portfolio.
#[derive(Debug)]
pub struct StateBus {
    pub cookies: Feed<f64>,
    pub assets: Feed<Vec<Asset>>,
    pub portfolio: Feed<Portfolio>,
}

impl StateBus {
    /// Seed every feed from freshly loaded state. This is the load-path
    /// "set initial" — values are published, nothing is persisted.
    pub fn new(state: &GameState) -> Self {
        Self {
            cookies: Feed::new(state.balance),
            assets: Feed::new(state.assets.clone()),
            portfolio: Feed::new(state.portfolio.clone()),
        }
    }
}
