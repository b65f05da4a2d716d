//! This crate implements a read-only transaction inquiry service.
//! A caller submits the identifying fields of a switch transaction; the service
//! validates them, looks the transaction up in the switch transaction log and
//! answers with a coded status (not found, failed, reversed or processed).

pub mod types; // Wire envelope, log records and the closed set of result codes.
pub mod validation; // Field-by-field checks on inbound inquiries.
pub mod resolver; // Key normalization, lookup and row classification.
pub mod store; // Transaction log port and its SQL adapter.
pub mod api; // HTTP binding of the inquiry.
pub mod config; // Defines and loads service configuration.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use config::Config;
pub use resolver::Resolver;
