//! Integration tests for CLI argument handling
//!
//! Runs the binary for argument errors and the offline `list` command.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_apishowcase"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute apishowcase")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("apishowcase"), "Help should mention apishowcase");
    assert!(stdout.contains("shell"), "Help should mention the shell command");
}

#[test]
fn test_list_prints_every_page() {
    let output = run_cli(&["list"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Weather API"));
    assert!(stdout.contains("NASA API"));
}

#[test]
fn test_invalid_joke_category_prints_error_and_exits() {
    let output = run_cli(&["joke", "--category", "limerick"]);
    assert!(
        !output.status.success(),
        "Expected invalid category to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid joke category"),
        "Should print error message about invalid category: {}",
        stderr
    );
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let output = run_cli(&["--config", path.to_str().unwrap(), "list"]);
    assert!(!output.status.success());
}

#[test]
fn test_cocktails_without_name_succeeds_offline() {
    let output = run_cli(&["cocktails"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"drinks\": null"));
}

#[test]
fn test_weather_without_key_exits_with_failure() {
    let output = Command::new(env!("CARGO_BIN_EXE_apishowcase"))
        .args(["weather", "--lat", "40.0", "--lon", "-75.0"])
        .env_remove("APISHOWCASE_WEATHERBIT_API_KEY")
        .env("HOME", tempfile::tempdir().unwrap().path())
        .env_remove("XDG_CONFIG_HOME")
        .output()
        .expect("Failed to execute apishowcase");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Error fetching data"));
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use apishowcase::api::JokeCategory;
    use apishowcase::cli::{parse_joke_category, Cli, Command};
    use apishowcase::pages::Query;
    use clap::Parser;

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["apishowcase"]).is_err());
    }

    #[test]
    fn test_cli_weather_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["apishowcase", "weather", "--lat", "40"]).is_err());
    }

    #[test]
    fn test_cli_health_takes_country() {
        let cli = Cli::parse_from(["apishowcase", "health", "canada"]);
        let request = cli.command.page_request().unwrap();
        assert_eq!(
            request.queries,
            vec![Query::Covid {
                country: "canada".to_string()
            }]
        );
    }

    #[test]
    fn test_cli_geonames_issues_two_queries() {
        let cli = Cli::parse_from(["apishowcase", "geonames", "FR"]);
        let request = cli.command.page_request().unwrap();
        assert_eq!(request.queries.len(), 2);
    }

    #[test]
    fn test_parse_joke_category_all_names() {
        for category in JokeCategory::all() {
            assert_eq!(parse_joke_category(category.as_str()).unwrap(), *category);
        }
    }

    #[test]
    fn test_list_is_not_a_page() {
        let cli = Cli::parse_from(["apishowcase", "list"]);
        assert!(matches!(cli.command, Command::List));
        assert!(cli.command.page_request().is_none());
    }
}
