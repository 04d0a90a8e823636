//! Test-only building blocks: in-memory action fixtures and a scripted
//! transport that replays canned poll responses.

pub mod fixtures;
pub mod transport;

pub use fixtures::*;
pub use transport::ScriptedTransport;
