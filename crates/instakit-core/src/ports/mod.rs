//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are the interfaces the core depends on but whose implementations
//! live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`HttpTransport`] - Issues one HTTP request and returns the raw response

pub mod transport;

pub use transport::{HttpMethod, HttpTransport, OutgoingRequest, RawResponse, TransportError};
