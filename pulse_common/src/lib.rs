//! Pulse Common Library
//!
//! This crate provides the shared record layout, constants and configuration
//! loading utilities for the Pulse workspace crates.
//!
//! # Module Structure
//!
//! - [`record`] - The shared sample record exchanged through the channel
//! - [`consts`] - Channel naming and lock retry constants
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! Add to your `Cargo.toml` with alias for shorter imports:
//! ```toml
//! [dependencies]
//! pulse = { package = "pulse_common", path = "../pulse_common" }
//! ```
//!
//! Then import:
//! ```rust
//! use pulse_common::record::SampleRecord;
//! use pulse_common::config::{ConfigLoader, ChannelConfig};
//! ```

pub mod config;
pub mod consts;
pub mod prelude;
pub mod record;
