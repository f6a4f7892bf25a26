//! Domain entities and business rules
//!
//! This module contains the core domain types for Instakit:
//! - Consumer and user credentials
//! - Signing mode and session state machine
//! - Decoded API records
//! - The service error-code table
//! - Domain-specific error types

pub mod codes;
pub mod credentials;
pub mod errors;
pub mod record;
pub mod session;

// Re-export commonly used types
pub use codes::{kind_for_code, reason_for_code, CodeFamily, ErrorCode, ErrorKind, ERROR_CODES};
pub use credentials::{ConsumerCredentials, Credentials, TokenPair};
pub use errors::DomainError;
pub use record::{
    decode_records, ApiRecord, BookmarkRecord, ErrorRecord, FolderRecord, MetaRecord, RecordKind,
    UserRecord,
};
pub use session::{SessionState, SigningMode};
