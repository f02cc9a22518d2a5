//! In-memory implementations for testing.
//!
//! Available behind the `test-utils` feature flag.

mod scripted_transport;

pub use scripted_transport::{RecordedRequest, ScriptedTransport};
