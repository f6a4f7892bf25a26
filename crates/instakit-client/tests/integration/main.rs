//! Integration tests for instakit-client
//!
//! Uses wiremock to simulate the Instapaper service and verifies the
//! authorization flow, the Full API endpoints and the Simple API end to end
//! over the reqwest transport.

mod common;

mod test_authorize;
mod test_bookmarks;
mod test_folders;
mod test_simple;
