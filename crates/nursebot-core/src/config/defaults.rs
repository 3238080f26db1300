//! Default value functions used by serde for config deserialization.

use crate::context::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

pub fn default_name() -> String {
    "NurseBot".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

pub fn default_port() -> u16 {
    5001
}

pub fn default_provider() -> String {
    "openai".to_string()
}

pub fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

pub fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

pub fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

pub fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

pub fn default_timeout_secs() -> u64 {
    30
}

pub fn default_cookie_name() -> String {
    "nursebot_session".to_string()
}

pub fn default_session_max_age() -> u64 {
    86_400
}

pub fn default_max_entries() -> usize {
    10
}
