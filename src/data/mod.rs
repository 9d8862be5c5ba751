//! Market data collaborators
//!
//! Handles:
//! - The provider trait consumed by the pricing flow
//! - Yahoo Finance API for spot, dividend yield and implied vols (free)
//! - Local snapshot caching

pub mod provider;
pub mod yahoo;
pub mod cache;

pub use provider::*;
pub use yahoo::*;
pub use cache::*;
