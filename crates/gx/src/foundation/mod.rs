//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the library:
//! - Typed resource handles
//! - Logging utilities

pub mod collections;
pub mod logging;
