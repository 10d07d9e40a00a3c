use std::fs;

use f5cli::config::OutputFormat;
use f5cli::error::ApiError;
use f5cli::tooling::cli::{AuthCommands, Commands, ConfigCommands};
use serde_json::json;
use tempfile::TempDir;

use crate::support::{context, message_of, run_json};

fn set_defaults(
    output: Option<&str>,
    allow_telemetry: Option<bool>,
    disable_ssl_warnings: Option<bool>,
) -> Commands {
    Commands::Config {
        command: ConfigCommands::SetDefaults {
            output: output.map(str::to_string),
            allow_telemetry,
            disable_ssl_warnings,
            auto_approve: true,
        },
    }
}

#[test]
fn set_defaults_merges_into_config_file() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);

    let out = run_json(&cli, set_defaults(Some("TABLE"), None, None));
    assert_eq!(message_of(&out), "CLI defaults updated successfully.");

    let out = run_json(&cli, set_defaults(None, Some(false), None));
    assert_eq!(message_of(&out), "CLI defaults updated successfully.");

    let listed = run_json(
        &cli,
        Commands::Config {
            command: ConfigCommands::ListDefaults,
        },
    );
    assert_eq!(listed, json!({ "output": "table", "allowTelemetry": false }));
}

#[test]
fn disabling_ssl_warnings_is_called_out() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);

    let out = run_json(&cli, set_defaults(None, None, Some(true)));
    assert_eq!(
        message_of(&out),
        "CLI defaults updated successfully. Warning: Insecure SSL warnings have been disabled"
    );
    assert!(fs::read_to_string(cli.paths().config_file())
        .unwrap()
        .contains("disableSSLWarnings: true"));
}

#[test]
fn invalid_output_format_is_rejected_before_writing() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);

    let err = cli
        .execute(&set_defaults(Some("xml"), None, None))
        .unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
    assert!(!cli.paths().config_file().exists());

    let err = cli.execute(&set_defaults(None, None, None)).unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
}

#[test]
fn stored_output_format_applies_to_next_invocation() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);
    run_json(&cli, set_defaults(Some("table"), None, None));

    let cli = context(&temp);
    assert_eq!(cli.settings().output, OutputFormat::Table);

    cli.execute(&Commands::Auth {
        command: AuthCommands::Create {
            authentication_provider: "bigip".to_string(),
            name: "bigip1".to_string(),
            host: Some("1.2.3.4".to_string()),
            port: None,
            user: None,
            password: None,
            api_endpoint: None,
            set_default: false,
        },
    })
    .unwrap();

    let table = cli
        .execute(&Commands::Auth {
            command: AuthCommands::List {
                show_secrets: false,
            },
        })
        .unwrap();
    assert!(table.contains("bigip1"));
    assert!(table.contains("1.2.3.4"));
    assert!(serde_json::from_str::<serde_json::Value>(&table).is_err());
}

#[test]
fn missing_config_file_lists_empty() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);
    let listed = run_json(
        &cli,
        Commands::Config {
            command: ConfigCommands::ListDefaults,
        },
    );
    assert_eq!(listed, json!({}));
}

#[test]
fn unsupported_stored_output_can_be_repaired() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join(".f5_cli");
    fs::create_dir_all(&home).unwrap();
    fs::write(home.join("config.yaml"), "output: yaml\n").unwrap();

    let cli = context(&temp);
    if std::env::var("F5_OUTPUT_FORMAT").is_err() {
        assert_eq!(cli.settings().output, OutputFormat::Json);
    }

    let out = run_json(&cli, set_defaults(Some("table"), None, None));
    assert_eq!(message_of(&out), "CLI defaults updated successfully.");
    assert!(fs::read_to_string(cli.paths().config_file())
        .unwrap()
        .contains("output: table"));
}
