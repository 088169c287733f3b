//! claimlens-session
//!
//! Per-session dashboard state, the conversation state machine, the event
//! reducer and dispatcher, and the view model derived from state.

pub mod audit;
pub mod conversation;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod state;
pub mod store;
pub mod view;
