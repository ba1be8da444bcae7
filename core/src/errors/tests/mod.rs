//! Tests for domain error classification

mod domain_error_tests;
