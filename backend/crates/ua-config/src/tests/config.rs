use crate::Config;
use crate::tests::{EnvGuard, set_valid_secrets, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, none, ok, some};
use log::LevelFilter;
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
    assert_that!(config.database.path, eq(crate::DEFAULT_DATABASE_FILENAME));
    assert_that!(
        config.auth.access_token_ttl_secs,
        eq(crate::DEFAULT_ACCESS_TOKEN_TTL_SECS)
    );
    assert_that!(config.password.bcrypt_cost, eq(crate::DEFAULT_BCRYPT_COST));
    assert_that!(config.oauth.google_client_id, none());
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_dir_is_created() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let nested = temp.path().join("nested/config");
    let _dir = EnvGuard::set("UA_CONFIG_DIR", nested.to_str().unwrap());

    // When
    Config::load().unwrap();

    // Then
    assert!(nested.is_dir());
}

#[test]
#[serial]
fn given_no_secrets_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("access_secret"));
}

#[test]
#[serial]
fn given_secrets_from_env_when_load_and_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secrets = set_valid_secrets();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let _secrets = set_valid_secrets();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
            [server]
            port = 9000

            [auth]
            access_token_ttl_secs = 300

            [password]
            bcrypt_cost = 10

            [logging]
            level = "debug"
            colored = false
        "#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9000));
    assert_that!(config.auth.access_token_ttl_secs, eq(300));
    assert_that!(config.password.bcrypt_cost, eq(10));
    assert_that!(*config.logging.level, eq(LevelFilter::Debug));
    assert_that!(config.logging.colored, eq(false));
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_env_override_when_load_then_env_wins_over_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "[server]\nport = 9000\n").unwrap();
    let _port = EnvGuard::set("UA_SERVER_PORT", "9100");
    let _client = EnvGuard::set("UA_OAUTH_GOOGLE_CLIENT_ID", "client.apps.googleusercontent.com");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9100));
    assert_that!(
        config.oauth.google_client_id.as_deref(),
        some(eq("client.apps.googleusercontent.com"))
    );
}

#[test]
#[serial]
fn given_invalid_toml_when_load_then_toml_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "[server\nport = ").unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("TOML parse error"));
}

#[test]
#[serial]
fn given_unparseable_env_value_when_load_then_keeps_default() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _port = EnvGuard::set("UA_SERVER_PORT", "not-a-port");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
}

#[test]
#[serial]
fn given_unknown_log_level_when_load_then_falls_back_to_info() {
    let (_temp, _guard) = setup_config_dir();
    let _level = EnvGuard::set("UA_LOG_LEVEL", "verbose");

    let config = Config::load().unwrap();

    assert_that!(*config.logging.level, eq(LevelFilter::Info));
}

#[test]
#[serial]
fn given_log_file_when_resolving_path_then_joined_under_config_dir() {
    let (temp, _guard) = setup_config_dir();
    let _file = EnvGuard::set("UA_LOG_FILE", "server.log");

    let config = Config::load().unwrap();
    let path = config.log_file_path().unwrap();

    assert_that!(path, some(eq(&temp.path().join("log").join("server.log"))));
}

#[test]
#[serial]
fn given_config_when_bind_addr_then_host_and_port() {
    let (_temp, _guard) = setup_config_dir();
    let _host = EnvGuard::set("UA_SERVER_HOST", "0.0.0.0");
    let _port = EnvGuard::set("UA_SERVER_PORT", "8443");

    let config = Config::load().unwrap();

    assert_that!(config.bind_addr(), eq("0.0.0.0:8443"));
}
