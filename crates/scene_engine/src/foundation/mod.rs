//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Rectangles
//! - Node handles
//! - Time management
//! - Logging utilities

pub mod math;
pub mod rect;
pub mod collections;
pub mod time;
pub mod logging;
