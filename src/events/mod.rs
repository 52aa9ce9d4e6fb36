//! Game events and the bounded log that collects them.
//!
//! The engine only emits structured `GameEvent` records. Callers drain them
//! after each operation and decide what to keep; `EventLog` is the stock
//! sink.

pub mod event;
pub mod history;

pub use event::GameEvent;
pub use history::EventLog;
