//! Core domain + application logic for the telelog relay.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind a
//! port (`transport::MessageTransport`) implemented in the adapter crate.

pub mod binding;
pub mod config;
pub mod defaults;
pub mod domain;
pub mod errors;
pub mod format;
pub mod level;
pub mod logger;
pub mod logging;
pub mod queue;
pub mod sink;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::{Error, Result};
