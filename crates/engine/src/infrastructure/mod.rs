//! Infrastructure implementations.
//!
//! Contains port trait implementations and the file-backed loaders that run
//! before the core is invoked.

pub mod config;
pub mod ports;
pub mod random;
pub mod table_store;
