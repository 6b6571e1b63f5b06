//! Error, configuration and identifier types shared by the `commando-rs` crates.
//!
//! Depends on nothing but `thiserror`, so both the duration utilities and the dispatcher build
//! on it.

pub mod config;
pub mod error;
pub mod ids;
