//! Farm Advisor: keyword chat advice and soil photo heuristics.

pub mod advisory;
pub mod api;
pub mod config;
pub mod error;
pub mod soil;
pub mod store;
