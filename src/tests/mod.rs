//! Crate-level tests that drive the HTTP router end to end.
