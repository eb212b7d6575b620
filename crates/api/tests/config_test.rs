use pretty_assertions::assert_eq;
use slotbook_api::config::ApiConfig;
use tracing::Level;

// Environment variables are process-global, so everything runs in one test
// to avoid interleaving with parallel tests.
#[test]
fn test_config_from_env() {
    // Missing DATABASE_URL is an error.
    unsafe {
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("API_HOST");
        std::env::remove_var("API_PORT");
        std::env::remove_var("LOG_LEVEL");
        std::env::remove_var("API_CORS_ORIGINS");
        std::env::remove_var("API_REQUEST_TIMEOUT_SECONDS");
    }
    assert!(ApiConfig::from_env().is_err());

    // Defaults apply when only the required variable is set.
    unsafe {
        std::env::set_var("DATABASE_URL", "postgres://localhost/slotbook");
    }
    let config = ApiConfig::from_env().expect("valid config");
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 3000);
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.server_addr(), "0.0.0.0:3000");

    // Explicit values override defaults.
    unsafe {
        std::env::set_var("API_HOST", "127.0.0.1");
        std::env::set_var("API_PORT", "8080");
        std::env::set_var("LOG_LEVEL", "debug");
        std::env::set_var("API_CORS_ORIGINS", "http://a.test, http://b.test");
        std::env::set_var("API_REQUEST_TIMEOUT_SECONDS", "5");
    }
    let config = ApiConfig::from_env().expect("valid config");
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
    );
    assert_eq!(config.request_timeout, 5);
    assert_eq!(config.server_addr(), "127.0.0.1:8080");

    // Invalid port is an error; unknown log level falls back to info.
    unsafe {
        std::env::set_var("API_PORT", "not-a-port");
    }
    assert!(ApiConfig::from_env().is_err());
    unsafe {
        std::env::set_var("API_PORT", "8080");
        std::env::set_var("LOG_LEVEL", "verbose");
    }
    let config = ApiConfig::from_env().expect("valid config");
    assert_eq!(config.log_level, Level::INFO);
}
