//! # Route Modules
//!
//! - `health` reports service identity and the endpoint map.
//! - `encounters` runs encounter simulations against the extension.

pub mod encounters;
pub mod health;
