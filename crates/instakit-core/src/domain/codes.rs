//! Service error-code table
//!
//! The bookmarking service reports failures in two places: the HTTP status
//! of the response, and an `error` record embedded in an otherwise
//! successful JSON body. Both share one numeric code space, mapped here to
//! an [`ErrorKind`] by exact lookup.

use serde::{Deserialize, Serialize};

/// Classification of a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required consumer credentials are missing
    Configuration,
    /// Invalid username/password, invalid token, or rejected application
    Authentication,
    /// A resource with the same unique identifier already exists
    ResourceConflict,
    /// A parameter is malformed or missing
    InvalidRequest,
    /// The service failed internally; may succeed later
    Service,
    /// The code is not in the table
    UnknownApi {
        /// The raw status or application code
        code: u32,
    },
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Authentication => write!(f, "authentication"),
            ErrorKind::ResourceConflict => write!(f, "resource_conflict"),
            ErrorKind::InvalidRequest => write!(f, "invalid_request"),
            ErrorKind::Service => write!(f, "service"),
            ErrorKind::UnknownApi { code } => write!(f, "unknown_api({})", code),
        }
    }
}

/// Coarse grouping of codes, by numeric range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeFamily {
    Successful,
    HttpError,
    GeneralError,
    BookmarkError,
    FolderError,
    Other,
}

impl CodeFamily {
    /// Returns the family a numeric code falls into
    pub fn of(code: u32) -> Self {
        match code {
            200..=201 => CodeFamily::Successful,
            400..=500 => CodeFamily::HttpError,
            1040..=1045 => CodeFamily::GeneralError,
            1220..=1246 => CodeFamily::BookmarkError,
            1250..=1252 => CodeFamily::FolderError,
            _ => CodeFamily::Other,
        }
    }
}

/// One entry of the static code table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    /// Numeric status or application code
    pub code: u32,
    /// Reason phrase documented by the service
    pub reason: &'static str,
    /// `None` for success codes
    kind: Option<ErrorKind>,
}

impl ErrorCode {
    const fn ok(code: u32, reason: &'static str) -> Self {
        Self {
            code,
            reason,
            kind: None,
        }
    }

    const fn err(code: u32, reason: &'static str, kind: ErrorKind) -> Self {
        Self {
            code,
            reason,
            kind: Some(kind),
        }
    }

    /// Looks up a code by exact match
    pub fn lookup(code: u32) -> Option<&'static ErrorCode> {
        ERROR_CODES.iter().find(|entry| entry.code == code)
    }

    /// Returns the error kind, or `None` if this is a success code
    pub fn kind(&self) -> Option<ErrorKind> {
        self.kind
    }

    /// Returns the family this code belongs to
    pub fn family(&self) -> CodeFamily {
        CodeFamily::of(self.code)
    }

    /// Returns true if this code signals success
    pub fn is_success(&self) -> bool {
        self.kind.is_none()
    }
}

/// Maps a code to its error kind.
///
/// Total over `u32`: success codes yield `None`, table entries yield their
/// kind, and everything else yields [`ErrorKind::UnknownApi`].
pub fn kind_for_code(code: u32) -> Option<ErrorKind> {
    match ErrorCode::lookup(code) {
        Some(entry) => entry.kind(),
        None => Some(ErrorKind::UnknownApi { code }),
    }
}

/// Returns the documented reason phrase for a code, if known
pub fn reason_for_code(code: u32) -> Option<&'static str> {
    ErrorCode::lookup(code).map(|entry| entry.reason)
}

/// The service's documented status and application codes
pub static ERROR_CODES: &[ErrorCode] = &[
    // HTTP status
    ErrorCode::ok(200, "OK"),
    ErrorCode::ok(201, "Created"),
    ErrorCode::err(
        400,
        "Bad request or exceeded the rate limit. Probably missing a required parameter, such as url",
        ErrorKind::InvalidRequest,
    ),
    ErrorCode::err(401, "Invalid xAuth credentials", ErrorKind::Authentication),
    ErrorCode::err(403, "Invalid username or password", ErrorKind::Authentication),
    ErrorCode::err(
        500,
        "The service encountered an error. Please try again later",
        ErrorKind::Service,
    ),
    // General
    ErrorCode::err(1040, "Rate-limit exceeded", ErrorKind::Service),
    ErrorCode::err(1041, "Subscription account required", ErrorKind::Service),
    ErrorCode::err(1042, "Application is suspended", ErrorKind::Authentication),
    // Bookmarks
    ErrorCode::err(
        1220,
        "Domain requires full content to be supplied",
        ErrorKind::InvalidRequest,
    ),
    ErrorCode::err(
        1221,
        "Domain has opted out of Instapaper compatibility",
        ErrorKind::InvalidRequest,
    ),
    ErrorCode::err(1240, "Invalid URL specified", ErrorKind::InvalidRequest),
    ErrorCode::err(1241, "Invalid or missing bookmark_id", ErrorKind::InvalidRequest),
    ErrorCode::err(1242, "Invalid or missing folder_id", ErrorKind::InvalidRequest),
    ErrorCode::err(1243, "Invalid or missing progress", ErrorKind::InvalidRequest),
    ErrorCode::err(
        1244,
        "Invalid or missing progress_timestamp",
        ErrorKind::InvalidRequest,
    ),
    ErrorCode::err(
        1245,
        "Private bookmarks require supplied content",
        ErrorKind::InvalidRequest,
    ),
    ErrorCode::err(
        1246,
        "Unexpected error when saving bookmark",
        ErrorKind::Service,
    ),
    // Folders
    ErrorCode::err(1250, "Invalid or missing title", ErrorKind::InvalidRequest),
    ErrorCode::err(
        1251,
        "User already has a folder with this title",
        ErrorKind::ResourceConflict,
    ),
    ErrorCode::err(
        1252,
        "Cannot add bookmarks to this folder",
        ErrorKind::InvalidRequest,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_codes_have_no_kind() {
        assert_eq!(kind_for_code(200), None);
        assert_eq!(kind_for_code(201), None);
    }

    #[test]
    fn test_transport_codes() {
        assert_eq!(kind_for_code(400), Some(ErrorKind::InvalidRequest));
        assert_eq!(kind_for_code(401), Some(ErrorKind::Authentication));
        assert_eq!(kind_for_code(403), Some(ErrorKind::Authentication));
        assert_eq!(kind_for_code(500), Some(ErrorKind::Service));
    }

    #[test]
    fn test_application_codes() {
        assert_eq!(kind_for_code(1040), Some(ErrorKind::Service));
        assert_eq!(kind_for_code(1042), Some(ErrorKind::Authentication));
        assert_eq!(kind_for_code(1241), Some(ErrorKind::InvalidRequest));
        assert_eq!(kind_for_code(1242), Some(ErrorKind::InvalidRequest));
        assert_eq!(kind_for_code(1246), Some(ErrorKind::Service));
        assert_eq!(kind_for_code(1251), Some(ErrorKind::ResourceConflict));
    }

    #[test]
    fn test_unknown_codes_carry_raw_value() {
        assert_eq!(kind_for_code(404), Some(ErrorKind::UnknownApi { code: 404 }));
        assert_eq!(kind_for_code(1230), Some(ErrorKind::UnknownApi { code: 1230 }));
        assert_eq!(kind_for_code(0), Some(ErrorKind::UnknownApi { code: 0 }));
    }

    #[test]
    fn test_every_table_entry_is_reachable_by_lookup() {
        for entry in ERROR_CODES {
            let found = ErrorCode::lookup(entry.code).unwrap();
            assert_eq!(found, entry);
            assert_eq!(kind_for_code(entry.code), entry.kind());
        }
    }

    #[test]
    fn test_table_has_no_duplicate_codes() {
        let mut codes: Vec<u32> = ERROR_CODES.iter().map(|e| e.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ERROR_CODES.len());
    }

    #[test]
    fn test_families_use_closed_ranges() {
        assert_eq!(CodeFamily::of(200), CodeFamily::Successful);
        assert_eq!(CodeFamily::of(201), CodeFamily::Successful);
        assert_eq!(CodeFamily::of(403), CodeFamily::HttpError);
        assert_eq!(CodeFamily::of(1041), CodeFamily::GeneralError);
        assert_eq!(CodeFamily::of(1240), CodeFamily::BookmarkError);
        assert_eq!(CodeFamily::of(1251), CodeFamily::FolderError);
        assert_eq!(CodeFamily::of(1247), CodeFamily::Other);
        assert_eq!(CodeFamily::of(202), CodeFamily::Other);
    }

    #[test]
    fn test_every_error_entry_is_outside_success_family() {
        for entry in ERROR_CODES {
            assert_eq!(entry.is_success(), entry.family() == CodeFamily::Successful);
        }
    }

    #[test]
    fn test_reason_lookup() {
        assert_eq!(
            reason_for_code(1251),
            Some("User already has a folder with this title")
        );
        assert_eq!(reason_for_code(999), None);
    }
}
