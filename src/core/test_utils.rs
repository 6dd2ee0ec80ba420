//! Arena fixtures for unit tests.
//!
//! Each fixture owns one arena for the duration of a test, so sidetables
//! created through it are freed together when the test returns.
