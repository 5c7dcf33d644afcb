//! Integration tests for CLI argument handling
//!
//! Covers the flags that are handled before the terminal UI starts.

use std::process::Command;

use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_weatherview"))
        .args(args)
        .env_remove("WEATHERVIEW_API_KEY")
        .output()
        .expect("Failed to execute weatherview")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("weatherview"), "Help should mention weatherview");
    assert!(stdout.contains("--city"), "Help should mention --city flag");
    assert!(stdout.contains("--fahrenheit"));
}

#[test]
fn test_version_flag_exits_successfully() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_api_key_fails_before_ui() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("absent.toml");
    let log = dir.path().join("weatherview.log");

    let output = run_cli(&[
        "--config",
        config.to_str().unwrap(),
        "--log-file",
        log.to_str().unwrap(),
        "--no-geolocate",
    ]);
    assert!(!output.status.success(), "Expected missing key to fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("API key"),
        "Should explain the missing API key: {}",
        stderr
    );
}

#[test]
fn test_blank_city_is_rejected() {
    let output = run_cli(&["--city", "   ", "--api-key", "k"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("City name must not be empty"), "{}", stderr);
}

#[test]
fn test_invalid_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "unit = [broken").unwrap();
    let log = dir.path().join("weatherview.log");

    let output = run_cli(&[
        "--config",
        path.to_str().unwrap(),
        "--log-file",
        log.to_str().unwrap(),
        "--api-key",
        "k",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse config file"), "{}", stderr);
}

#[test]
fn test_zero_request_timeout_is_rejected_at_startup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "request_timeout_secs = 0").unwrap();
    let log = dir.path().join("weatherview.log");

    let output = run_cli(&[
        "--config",
        path.to_str().unwrap(),
        "--log-file",
        log.to_str().unwrap(),
        "--api-key",
        "k",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("request_timeout_secs"), "{}", stderr);
    // Logging is up before the config is read
    assert!(log.exists());
}

#[test]
fn test_lat_without_lon_is_usage_error() {
    let output = run_cli(&["--lat", "49.28"]);
    assert!(!output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use weatherview::cli::{Cli, StartupConfig};
    use weatherview::config::Config;
    use weatherview::data::{Coordinates, LocationSource, TemperatureUnit};

    #[test]
    fn test_cli_city_becomes_initial_search() {
        let cli = Cli::parse_from(["weatherview", "--city", "Oslo"]);
        let startup = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(startup.initial_city.as_deref(), Some("Oslo"));
    }

    #[test]
    fn test_cli_overrides_flow_into_config() {
        let cli = Cli::parse_from([
            "weatherview",
            "--fahrenheit",
            "--lat",
            "-33.87",
            "--lon",
            "151.21",
            "--api-key",
            "cli-key",
        ]);
        let startup = StartupConfig::from_cli(&cli).unwrap();

        let mut config = Config::default();
        config.apply_startup(&startup);

        assert_eq!(config.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(config.api_key().unwrap(), "cli-key");
        assert_eq!(
            config.location_source(),
            LocationSource::Fixed(Coordinates {
                latitude: -33.87,
                longitude: 151.21
            })
        );
    }

    #[test]
    fn test_no_geolocate_wins_over_coordinates() {
        let cli = Cli::parse_from([
            "weatherview",
            "--no-geolocate",
            "--lat",
            "1",
            "--lon",
            "2",
        ]);
        let startup = StartupConfig::from_cli(&cli).unwrap();

        let mut config = Config::default();
        config.apply_startup(&startup);
        assert_eq!(config.location_source(), LocationSource::Denied);
    }
}
