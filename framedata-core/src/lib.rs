//! `framedata` Core — shared rule-file schema
//!
//! This crate provides the configuration types and error types shared
//! across the `framedata` analyzer and any tooling that reads rule files.

pub mod config;
pub mod error;
