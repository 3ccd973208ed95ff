//! Unit tests for the ordering module.
