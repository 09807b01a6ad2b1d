//! CLI library components for the catalog canonicalizer.

#![allow(missing_docs)]

pub mod commands;
pub mod config;
pub mod input;
pub mod logging;
