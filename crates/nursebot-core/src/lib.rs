//! # nursebot-core
//!
//! Core types, traits, configuration, and error handling for NurseBot.

pub mod config;
pub mod context;
pub mod error;
pub mod traits;
pub mod transcript;
