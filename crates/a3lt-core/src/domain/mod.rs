//! Domain types for the managed server.

mod server;

pub use server::{ServerState, ShutdownOutcome};
