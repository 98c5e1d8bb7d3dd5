//! "Colors used" notifications
//!
//! UI code that shows a palette of the colors already in the model
//! subscribes here; the world calls every listener whenever a voxel color
//! is used.

use crate::voxel::Color;

/// Receives the full ordered list of distinct colors used so far
pub trait ColorsUsedListener {
    fn colors_used_changed(&mut self, colors: &[Color]);
}

impl<F: FnMut(&[Color])> ColorsUsedListener for F {
    fn colors_used_changed(&mut self, colors: &[Color]) {
        self(colors)
    }
}

/// Handle returned by [`Subscribers::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Listeners in registration order
#[derive(Default)]
pub struct Subscribers {
    listeners: Vec<(SubscriptionId, Box<dyn ColorsUsedListener>)>,
    next_id: u64,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl ColorsUsedListener + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Call every listener synchronously
    pub fn notify(&mut self, colors: &[Color]) {
        for (_, listener) in &mut self.listeners {
            listener.colors_used_changed(colors);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
