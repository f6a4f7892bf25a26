//! Instakit Core - Domain types for the bookmarking API client
//!
//! This crate holds everything that does not touch the network:
//! - **Domain types** - `Credentials`, `SigningMode`, `SessionState`, `ApiRecord`
//! - **Error-code table** - the static mapping from service codes to `ErrorKind`
//! - **Configuration** - YAML config with environment overrides
//! - **Port definitions** - the `HttpTransport` trait implemented by adapters
//!
//! # Architecture
//!
//! The domain module is pure data and pure functions. The transport port
//! is the only seam through which an adapter crate reaches the network.

pub mod config;
pub mod domain;
pub mod ports;
