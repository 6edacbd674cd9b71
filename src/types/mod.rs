//! Type definitions module.
//!
//! Contains shared types used across the application.

pub mod guess;
pub mod units;

pub use guess::*;
pub use units::*;
