//! Unit tests for the dashboard context.
