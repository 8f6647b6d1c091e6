//! Unit tests for SMS services
