//! Infrastructure layer - store connection and error translation.

pub mod db_errors;
pub mod store;
