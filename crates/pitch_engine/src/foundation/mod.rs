//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and the fixed-function style transform helpers
//! - Frame timing
//! - Logging initialisation

pub mod math;
pub mod time;
pub mod logging;
