//! Topic-based event dispatch for session observers.
//!
//! Every call into the session queues the [`casebook_core::GameEvent`]s it
//! produced. Observers subscribe to the topics they need and receive the
//! queued events when the session ticks.

mod bus;
mod recorder;

pub use bus::{EventBus, SessionObserver, Topic};
pub use recorder::EventRecorder;
