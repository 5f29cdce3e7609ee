//! GymPal Library
//!
//! Backend for the GymPal fitness app: users, questionnaire profile,
//! workout routines with set progress, and nutrition recommendations, all
//! kept in pipe-delimited flat files.

pub mod api;
pub mod build_info;
pub mod config;
pub mod error;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod store;
pub mod tools;
