//! Data models for the application
//!
//! This module contains all data structures used throughout the application.

mod upload;

// Re-export all models for convenient imports
pub use upload::*;
