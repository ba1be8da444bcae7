//! Tests for authentication service

mod service_tests;
