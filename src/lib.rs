//! menuboard — digital menu display
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod price;
pub mod render;
pub mod storage;
pub mod dashboard;
