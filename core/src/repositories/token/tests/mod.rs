//! Tests for the token repository mock

mod mock_tests;
