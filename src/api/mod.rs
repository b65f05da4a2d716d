//! API Module
//! 
//! This module exposes the inquiry service over HTTP.
//! It provides the lookup endpoint, a health check and a JSON 404 fallback.

mod server;


pub use server::{router, shutdown_signal, AppState, Server, BODY_LIMIT_BYTES, INQUIRY_PATH};
