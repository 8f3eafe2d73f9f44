//! Tests for the user repository mock

mod mock_tests;
