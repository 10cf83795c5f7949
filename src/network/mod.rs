//! Network layer - request dispatch and event-stream handling
//!
//! The Network actor receives dispatch commands and sends back render events.

pub mod actor;
pub mod client;
pub mod stream;

pub use actor::NetworkActor;
pub use client::{dispatch, DispatchOptions};
