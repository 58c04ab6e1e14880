//! CLI command implementations.

pub mod check;
pub mod resolve;
pub mod routes;
pub mod url;
