#![allow(dead_code)]


pub use test_state::{build_sqlite_state, build_test_state, test_backends};
