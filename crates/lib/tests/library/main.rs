//! Library integration tests.

#![cfg(unix)]

mod overlay_tests;
