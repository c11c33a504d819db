use chat_widget::config::AppConfig;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    // SAFETY: tests touching the environment are serialized with #[serial].
    unsafe {
        env::remove_var("CHAT_WIDGET_SERVER__PORT");
        env::remove_var("CHAT_WIDGET_COLLABORATOR__BASE_URL");
        env::remove_var("CHAT_WIDGET_WIDGET__FALLBACK_MESSAGE");
        env::remove_var("CONFIG_FILE");
        env::remove_var("PORT");
        env::remove_var("COLLABORATOR_URL");
    }
}

fn load(extra: &[&str]) -> Result<AppConfig, config::ConfigError> {
    let mut args = vec!["chat-widget"];
    args.extend_from_slice(extra);
    AppConfig::load_from_args(args)
}

fn yaml_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("Failed to create temp config");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp config");
    file
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = load(&[]).expect("Failed to load defaults");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.collaborator.base_url, "http://127.0.0.1:5000");
    assert_eq!(config.registry.idle_timeout_secs, 1800);
    assert_eq!(config.widget.session_title, "AI Chat Session");
    assert_eq!(
        config.widget.fallback_message,
        "Sorry, I had trouble processing your message. Please try again."
    );
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    // SAFETY: serialized test.
    unsafe {
        env::set_var("CHAT_WIDGET_SERVER__PORT", "9090");
        env::set_var("CHAT_WIDGET_COLLABORATOR__BASE_URL", "http://collab:8080");
        env::set_var("CHAT_WIDGET_WIDGET__FALLBACK_MESSAGE", "Try again later.");
    }

    let config = load(&[]).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.collaborator.base_url, "http://collab:8080");
    assert_eq!(config.widget.fallback_message, "Try again later.");
    assert_eq!(config.widget.typing_indicator, "Typing...");

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_beats_env() {
    clear_env_vars();
    // SAFETY: serialized test.
    unsafe {
        env::set_var("CHAT_WIDGET_SERVER__PORT", "9090");
    }

    let config = load(&["--port", "7000", "--collaborator-url", "http://cli:1"])
        .expect("Failed to load config");
    assert_eq!(config.server.port, 7000);
    assert_eq!(config.collaborator.base_url, "http://cli:1");

    clear_env_vars();
}

#[test]
#[serial]
fn test_plain_port_env() {
    clear_env_vars();
    // SAFETY: serialized test.
    unsafe {
        env::set_var("PORT", "8123");
    }

    let config = load(&[]).expect("Failed to load config");
    assert_eq!(config.server.port, 8123);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let file = yaml_file(
        r"
server:
  port: 7070
widget:
  header_title: Custom Assistant
  poll_interval_ms: 250
",
    );
    let path = file.path().to_str().unwrap();

    let config = load(&["--config", path]).expect("Failed to load config from file");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.widget.header_title, "Custom Assistant");
    assert_eq!(config.widget.poll_interval_ms, 250);
    assert_eq!(config.widget.placeholder, "Ask me anything...");
}

#[test]
#[serial]
fn test_env_beats_file() {
    clear_env_vars();

    let file = yaml_file(
        r"
server:
  port: 7070
collaborator:
  base_url: http://from-file:5000
",
    );
    let path = file.path().to_str().unwrap();
    // SAFETY: serialized test.
    unsafe {
        env::set_var("CHAT_WIDGET_SERVER__PORT", "9191");
    }

    let config = load(&["--config", path]).expect("Failed to load config");
    assert_eq!(config.server.port, 9191);
    assert_eq!(config.collaborator.base_url, "http://from-file:5000");

    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_explicit_file_is_error() {
    clear_env_vars();

    let result = load(&["--config", "/definitely/not/here.yaml"]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_cwd_config_fallback() {
    clear_env_vars();

    let config_content = r"
server:
  port: 6060
    ";
    let cwd_path = "config.yaml";
    fs::write(cwd_path, config_content).expect("Failed to write ./config.yaml");

    let config = load(&[]);

    fs::remove_file(cwd_path).unwrap();

    assert_eq!(config.expect("Failed to load config").server.port, 6060);
}
