//! Response classification
//!
//! The service signals failure in two ways: an HTTP error status, or an
//! `error` record inside a `200 OK` JSON array. Most JSON endpoints use the
//! second form, so every decoded payload is inspected even when the status
//! was successful.
//!
//! The `classify_*` functions are pure lookups into the code table. The
//! `check_*` helpers turn a classification into an [`ApiError`].

use instakit_core::{
    domain::{codes, decode_records, ApiRecord, ErrorKind, ErrorRecord},
    ports::RawResponse,
};
use tracing::{debug, warn};

use crate::ApiError;

/// Classifies an HTTP status. `None` means success.
pub fn classify_status(status: u16) -> Option<ErrorKind> {
    codes::kind_for_code(u32::from(status))
}

/// Classifies a decoded payload by its error record, if any. `None` means
/// the payload carries no error and may be handed to the caller unchanged.
pub fn classify_payload(records: &[ApiRecord]) -> Option<ErrorKind> {
    find_error_record(records).and_then(|error| codes::kind_for_code(error.error_code))
}

/// Returns the first `error` record in the payload.
///
/// The service sends at most one per response.
pub fn find_error_record(records: &[ApiRecord]) -> Option<&ErrorRecord> {
    records.iter().find_map(ApiRecord::as_error)
}

/// Fails with the classified error if the status is not a success code.
///
/// The message comes from an error record in the body when one is present,
/// and from the code table otherwise.
pub fn check_status(response: &RawResponse) -> Result<(), ApiError> {
    let Some(kind) = classify_status(response.status) else {
        return Ok(());
    };

    let code = u32::from(response.status);
    let message = body_error_message(&response.body).unwrap_or_else(|| reason_or_default(code));

    warn!(status = response.status, kind = %kind, "Request failed");
    Err(ApiError::from_kind(kind, code, message))
}

/// Returns the records unchanged, or the classified error of the embedded
/// error record.
pub fn check_payload(records: Vec<ApiRecord>) -> Result<Vec<ApiRecord>, ApiError> {
    if let Some(error) = payload_error(&records) {
        return Err(error);
    }
    Ok(records)
}

/// Decodes a JSON body and runs it through [`check_payload`].
pub fn decode_and_check(body: &str) -> Result<Vec<ApiRecord>, ApiError> {
    let records = decode_records(body)?;
    debug!(count = records.len(), "Decoded response records");
    check_payload(records)
}

fn payload_error(records: &[ApiRecord]) -> Option<ApiError> {
    let error = find_error_record(records)?;
    let kind = codes::kind_for_code(error.error_code)?;

    let message = if error.message.is_empty() {
        reason_or_default(error.error_code)
    } else {
        error.message.clone()
    };

    warn!(code = error.error_code, kind = %kind, "Service returned an error record");
    Some(ApiError::from_kind(kind, error.error_code, message))
}

fn body_error_message(body: &str) -> Option<String> {
    let records = decode_records(body).ok()?;
    find_error_record(&records)
        .map(|e| e.message.clone())
        .filter(|m| !m.is_empty())
}

fn reason_or_default(code: u32) -> String {
    codes::reason_for_code(code)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Unrecognized code {}", code))
}
