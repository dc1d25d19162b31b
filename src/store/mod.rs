pub mod units;

pub use units::{UnitsState, UnitsStore};

/// Handle returned by [`Store::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<S> = Box<dyn Fn(&S)>;

/// State container owned by the view layer. Listeners run synchronously,
/// in subscription order, after every write.
pub struct Store<S> {
    state: S,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
    next_id: u64,
}

impl<S: Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> Store<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            listeners: vec![],
            next_id: 0,
        }
    }

    pub fn get_state(&self) -> &S {
        &self.state
    }

    /// Mutate the state, then notify listeners
    pub fn set_state<R>(&mut self, update: impl FnOnce(&mut S) -> R) -> R {
        let out = update(&mut self.state);
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
        out
    }

    pub fn subscribe(&mut self, listener: impl Fn(&S) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
