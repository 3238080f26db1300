//! # nursebot-providers
//!
//! Completion service clients for NurseBot.

pub mod openai;
