//! Backend test support utilities
//!
//! Shared by the unit and integration tests of the backend: one-time logging
//! setup and generators for unique test data.

pub mod logging;
pub mod unique_helpers;
