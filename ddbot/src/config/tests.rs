//! Config tests.

use crate::config::{BotConfig, ContextStoreKind, DEFAULT_HELP_MESSAGE_TEMPLATE};
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
    "BOT_TOKEN",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "LOG_FILE",
    "BOT_NAME",
    "BOT_DESCRIPTION",
    "BOT_SHORT_DESCRIPTION",
    "HELP_MESSAGE_TEMPLATE",
    "HELP_MESSAGE_ESCAPE_CHARACTERS",
    "CONTEXT_STORE_TYPE",
    "REDIS_URL",
    "CONTEXT_SQLITE_PATH",
    "DDB_BASE_URL",
    "CHARACTER_CACHE_TTL_SECONDS",
    "CHARACTER_CACHE_ENABLED",
    "HEALTH_SERVER_ENABLED",
    "SERVER_HOST",
    "SERVER_PORT",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.log_file(), "logs/ddbot.log");
    assert_eq!(config.profile.bot_name, "DndBeyond Character Bot");
    assert_eq!(config.profile.help_message_template, DEFAULT_HELP_MESSAGE_TEMPLATE);
    assert_eq!(config.profile.help_message_escape_characters, "_-.");
    assert_eq!(config.context.kind().unwrap(), ContextStoreKind::Local);
    assert_eq!(
        config.character.ddb_base_url,
        "https://character-service.dndbeyond.com"
    );
    assert_eq!(config.character.cache_ttl_seconds, 3600);
    assert!(config.character.cache_enabled);
    assert!(config.server.enabled);
    assert_eq!(config.server.port, 8080);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("BOT_TOKEN", "custom_token");
    env::set_var("LOG_FILE", "/tmp/ddbot.log");
    env::set_var("BOT_NAME", "Roller");
    env::set_var("CONTEXT_STORE_TYPE", "sqlite");
    env::set_var("CONTEXT_SQLITE_PATH", "/tmp/contexts.db");
    env::set_var("CHARACTER_CACHE_TTL_SECONDS", "60");
    env::set_var("CHARACTER_CACHE_ENABLED", "false");
    env::set_var("HEALTH_SERVER_ENABLED", "0");
    env::set_var("SERVER_PORT", "9000");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "custom_token");
    assert_eq!(config.log_file(), "/tmp/ddbot.log");
    assert_eq!(config.profile.bot_name, "Roller");
    assert_eq!(config.context.kind().unwrap(), ContextStoreKind::Sqlite);
    assert_eq!(config.context.sqlite_path, "/tmp/contexts.db");
    assert_eq!(config.character.cache_ttl().as_secs(), 60);
    assert!(!config.character.cache_enabled);
    assert!(!config.server.enabled);
    assert_eq!(config.server.port, 9000);
    clear_env();
}

/// **Test: CLI token overrides BOT_TOKEN; a missing token is an error.**
#[test]
#[serial]
fn test_token_override_and_missing_token() {
    clear_env();
    assert!(BotConfig::load(None).is_err());

    env::set_var("BOT_TOKEN", "env_token");
    let config = BotConfig::load(Some("cli_token".to_string())).unwrap();
    assert_eq!(config.bot_token(), "cli_token");
    clear_env();
}

#[test]
#[serial]
fn test_validate_telegram_api_url_invalid() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("TELEGRAM_API_URL", "not a url");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_validate_unknown_store_type() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("CONTEXT_STORE_TYPE", "postgres");

    let config = BotConfig::load(None).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("postgres"));
    clear_env();
}

#[test]
#[serial]
fn test_validate_invalid_redis_and_ddb_urls() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("CONTEXT_STORE_TYPE", "redis");
    env::set_var("REDIS_URL", "::");
    assert!(BotConfig::load(None).unwrap().validate().is_err());

    env::set_var("REDIS_URL", "redis://localhost:6379/1");
    assert!(BotConfig::load(None).unwrap().validate().is_ok());

    env::set_var("DDB_BASE_URL", "nope");
    assert!(BotConfig::load(None).unwrap().validate().is_err());
    clear_env();
}
