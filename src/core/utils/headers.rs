//! Headers module
//!
//! This module provides a constants for HTTP headers.
//!

pub(crate) const API_KEY: &str = "X-Api-Key";
pub(crate) const REQUEST_ID: &str = "X-Request-Id";
pub(crate) const USER_AGENT: &str = "User-Agent";
