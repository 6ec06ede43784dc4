//! Topic-based observer dispatch.

use std::collections::VecDeque;

use casebook_core::GameEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Dialog playback (start, nodes, options, end)
    Dialog,
    /// Case board changes (clues, connections, suspects)
    Case,
    /// Days, cutscenes and follow-up requests
    Calendar,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Dialog, Topic::Case, Topic::Calendar];

    pub fn of(event: &GameEvent) -> Self {
        match event {
            GameEvent::DialogStarted { .. }
            | GameEvent::NodePlayed { .. }
            | GameEvent::HighlightsUpdated { .. }
            | GameEvent::OptionSelected { .. }
            | GameEvent::DialogEnded { .. } => Topic::Dialog,

            GameEvent::ClueCollected { .. }
            | GameEvent::ConnectionDiscovered { .. }
            | GameEvent::SuspectRevealed { .. }
            | GameEvent::SuspectCaught { .. }
            | GameEvent::SuspectReleased { .. }
            | GameEvent::SuspectEliminated { .. } => Topic::Case,

            GameEvent::DayChanged { .. }
            | GameEvent::CutscenePending { .. }
            | GameEvent::CutsceneStarted { .. }
            | GameEvent::FollowUpDialogRequested { .. }
            | GameEvent::ConnectionDialogRequested { .. } => Topic::Calendar,
        }
    }
}

/// Receives session events during [`crate::GameSession::tick`].
///
/// Observers only see events; they hold no reference to the session and
/// cannot mutate it from inside a callback.
pub trait SessionObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> SessionObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

struct Subscription {
    topics: Vec<Topic>,
    observer: Box<dyn SessionObserver>,
}

/// Queue of pending events plus the observers subscribed to each topic.
///
/// Publishing only enqueues. Delivery happens in [`EventBus::dispatch`], in
/// publish order, to every observer subscribed to the event's topic.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    queue: VecDeque<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe an observer to a set of topics.
    pub fn subscribe(&mut self, topics: &[Topic], observer: impl SessionObserver + 'static) {
        self.subscriptions.push(Subscription {
            topics: topics.to_vec(),
            observer: Box::new(observer),
        });
    }

    /// Subscribe an observer to every topic.
    pub fn subscribe_all(&mut self, observer: impl SessionObserver + 'static) {
        self.subscribe(&Topic::ALL, observer);
    }

    pub fn publish(&mut self, event: GameEvent) {
        tracing::trace!("Queued {}", event.as_str());
        self.queue.push_back(event);
    }

    pub fn publish_all(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.publish(event);
        }
    }

    /// Number of events waiting for the next dispatch.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Deliver every queued event. Returns how many events were delivered.
    pub fn dispatch(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.queue.pop_front() {
            let topic = Topic::of(&event);
            for subscription in &mut self.subscriptions {
                if subscription.topics.contains(&topic) {
                    subscription.observer.on_event(&event);
                }
            }
            delivered += 1;
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use casebook_core::ClueId;

    #[test]
    fn delivers_by_topic_in_publish_order() {
        let mut bus = EventBus::new();
        let case_seen = Rc::new(RefCell::new(Vec::new()));
        let all_seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&case_seen);
        bus.subscribe(&[Topic::Case], move |event: &GameEvent| {
            sink.borrow_mut().push(event.as_str())
        });
        let sink = Rc::clone(&all_seen);
        bus.subscribe_all(move |event: &GameEvent| sink.borrow_mut().push(event.as_str()));

        bus.publish(GameEvent::DayChanged {
            previous: 1,
            current: 2,
        });
        bus.publish(GameEvent::ClueCollected {
            clue: ClueId::from("1"),
        });
        assert_eq!(bus.pending(), 2);
        assert!(case_seen.borrow().is_empty());

        assert_eq!(bus.dispatch(), 2);
        assert_eq!(bus.pending(), 0);
        assert_eq!(*case_seen.borrow(), vec!["clue_collected"]);
        assert_eq!(*all_seen.borrow(), vec!["day_changed", "clue_collected"]);
    }

    #[test]
    fn dispatch_without_observers_still_drains() {
        let mut bus = EventBus::new();
        bus.publish(GameEvent::ClueCollected {
            clue: ClueId::from("1"),
        });
        assert_eq!(bus.dispatch(), 1);
        assert_eq!(bus.dispatch(), 0);
    }
}
