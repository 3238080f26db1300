use super::*;
use std::collections::HashMap;

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.server.port, 5001);
    assert_eq!(cfg.server.host, "127.0.0.1");
    assert!(!cfg.server.debug);
    assert_eq!(cfg.provider.default, "openai");
    assert_eq!(cfg.provider.openai.model, "gpt-3.5-turbo");
    assert!((cfg.provider.openai.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(cfg.provider.openai.max_tokens, 150);
    assert_eq!(cfg.memory.max_entries, 10);
    assert_eq!(cfg.session.cookie_name, "nursebot_session");
    assert_eq!(cfg.session.max_age_secs, 86_400);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let toml_str = r#"
        [server]
        port = 8080

        [provider.openai]
        model = "gpt-4o-mini"
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.server.host, "127.0.0.1");
    assert_eq!(cfg.provider.openai.model, "gpt-4o-mini");
    assert_eq!(cfg.provider.openai.base_url, "https://api.openai.com/v1");
    assert_eq!(cfg.provider.openai.timeout_secs, 30);
    assert_eq!(cfg.memory.max_entries, 10);
}

#[test]
fn test_empty_toml_is_valid() {
    let cfg: Config = toml::from_str("").unwrap();
    assert_eq!(cfg.nursebot.name, "NurseBot");
    assert_eq!(cfg.server.bind_addr(), "127.0.0.1:5001");
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let cfg = load("/nonexistent/__nursebot_config__.toml").unwrap();
    assert_eq!(cfg.server.port, 5001);
}

#[test]
fn test_load_invalid_toml_is_config_error() {
    let tmp = std::env::temp_dir().join("__nursebot_test_invalid_config__.toml");
    std::fs::write(&tmp, "[server\nport = ").unwrap();
    let err = load(tmp.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, NurseError::Config(_)));
    let _ = std::fs::remove_file(&tmp);
}

#[test]
fn test_env_overrides_secrets() {
    let env: HashMap<&str, &str> = [
        (ENV_OPENAI_API_KEY, "sk-env"),
        (ENV_SESSION_SECRET, "s3cret"),
    ]
    .into_iter()
    .collect();
    let mut cfg = Config::default();
    cfg.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));
    assert_eq!(cfg.provider.openai.api_key, "sk-env");
    assert_eq!(cfg.session.secret, "s3cret");
}

#[test]
fn test_blank_env_does_not_clear_configured_key() {
    let mut cfg = Config::default();
    cfg.provider.openai.api_key = "sk-file".into();
    cfg.apply_env_overrides(|_| Some(String::new()));
    assert_eq!(cfg.provider.openai.api_key, "sk-file");
}

#[test]
fn test_validate_requires_secret_and_key() {
    let mut cfg = Config::default();
    assert!(cfg.validate_for_serve().is_err());

    cfg.session.secret = "s3cret".into();
    let err = cfg.validate_for_serve().unwrap_err();
    assert!(err.to_string().contains("api_key"));

    cfg.provider.openai.api_key = "sk-test".into();
    assert!(cfg.validate_for_serve().is_ok());
}

#[test]
fn test_validate_rejects_zero_cap() {
    let mut cfg = Config::default();
    cfg.session.secret = "s".into();
    cfg.provider.openai.api_key = "k".into();
    cfg.memory.max_entries = 0;
    assert!(cfg.validate_for_serve().is_err());
}
