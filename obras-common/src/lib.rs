//! # obras common library
//!
//! Shared code for the obras import tool and dashboard:
//! - Error and result types
//! - Database URL resolution
//! - Declarative table schemas and database initialization
//! - Record models and data-access functions

pub mod config;
pub mod db;
pub mod error;
pub mod uuid_utils;

pub use error::{Error, Result};
