//! Diagnostic types for the front end.
//!
//! Parsing never stops at the first problem. Each problem is recorded as an
//! [`errors::Error`] carrying:
//!
//! - The diagnostic variant (`ErrorImpl`), whose text is the message
//! - The token the problem was found at
//! - A short suggestion for display

pub mod errors;
