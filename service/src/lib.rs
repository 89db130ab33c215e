//! Upgrade Mock Library
//!
//! Simulated firmware-upgrade stages that report progress as structured
//! events to a best-effort log store.

pub mod app;
pub mod clock;
pub mod errors;
pub mod events;
pub mod http;
pub mod logs;
pub mod server;
pub mod sink;
pub mod storage;
pub mod utils;
pub mod workflow;
