//! Shared helpers for gitcli integration tests.
//!
//! Tests run against real repositories in temporary directories and drive
//! the binary through `assert_cmd`.

pub mod assertions;
pub mod repository;
