use std::cell::RefCell;
use std::rc::Rc;

use casebook_core::GameEvent;

use super::SessionObserver;

/// Observer that keeps every event it receives.
///
/// Clones share one buffer: subscribe one clone, read through another.
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Event names in arrival order.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(GameEvent::as_str).collect()
    }

    pub fn take(&self) -> Vec<GameEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl SessionObserver for EventRecorder {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
