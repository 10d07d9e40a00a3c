use std::fs;

use f5cli::auth::{Profile, ProviderType};
use f5cli::error::ApiError;
use f5cli::tooling::cli::{AuthCommands, Commands};
use tempfile::TempDir;

use crate::support::{context, message_of, run_json};

fn create_bigip(name: &str, host: &str, set_default: bool) -> Commands {
    Commands::Auth {
        command: AuthCommands::Create {
            authentication_provider: "bigip".to_string(),
            name: name.to_string(),
            host: Some(host.to_string()),
            port: None,
            user: Some("admin".to_string()),
            password: Some("secret".to_string()),
            api_endpoint: None,
            set_default,
        },
    }
}

fn create_cloud(name: &str) -> Commands {
    Commands::Auth {
        command: AuthCommands::Create {
            authentication_provider: "cloud-services".to_string(),
            name: name.to_string(),
            host: None,
            port: None,
            user: Some("me@example.com".to_string()),
            password: Some("pw".to_string()),
            api_endpoint: None,
            set_default: false,
        },
    }
}

fn default_of(provider: &str) -> Commands {
    Commands::Auth {
        command: AuthCommands::Default {
            authentication_provider: provider.to_string(),
            show_secrets: false,
        },
    }
}

fn delete(name: &str) -> Commands {
    Commands::Auth {
        command: AuthCommands::Delete {
            name: name.to_string(),
            auto_approve: true,
        },
    }
}

#[test]
fn create_reports_success_and_writes_auth_file() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);

    let out = run_json(&cli, create_bigip("bigip1", "1.2.3.4", false));
    assert_eq!(message_of(&out), "Authentication configured successfully");

    let auth_file = cli.paths().auth_file();
    let stored: Vec<Profile> =
        serde_yaml::from_str(&fs::read_to_string(&auth_file).unwrap()).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "bigip1");
    assert_eq!(stored[0].port, Some(443));
    assert!(stored[0].is_default);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&auth_file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn duplicate_create_fails_with_stable_message() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);
    run_json(&cli, create_bigip("bigip1", "1.2.3.4", false));

    let before = fs::read_to_string(cli.paths().auth_file()).unwrap();
    let err = cli.execute(&create_cloud("bigip1")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Create command failed. An account named bigip1 already exists."
    );
    assert_eq!(fs::read_to_string(cli.paths().auth_file()).unwrap(), before);
}

#[test]
fn default_follows_create_and_delete() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);
    run_json(&cli, create_bigip("bigip1", "1.2.3.4", false));
    run_json(&cli, create_bigip("bigip2", "5.6.7.8", false));

    let default = run_json(&cli, default_of("bigip"));
    assert_eq!(default["name"], "bigip1");
    assert_eq!(default["password"], "********");

    run_json(&cli, create_bigip("bigip3", "9.9.9.9", true));
    assert_eq!(run_json(&cli, default_of("bigip"))["name"], "bigip3");

    let out = run_json(&cli, delete("bigip3"));
    assert_eq!(message_of(&out), "Successfully deleted auth: bigip3 contents");
    assert_eq!(run_json(&cli, default_of("bigip"))["name"], "bigip1");
}

#[test]
fn default_for_unconfigured_type_fails() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);
    run_json(&cli, create_bigip("bigip1", "1.2.3.4", false));

    let err = cli.execute(&default_of("cloud-services")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Command failed. You must configure a default authentication for cloud-services!"
    );

    let err = cli.execute(&default_of("azure")).unwrap_err();
    assert!(matches!(err, ApiError::UnknownProviderType(_)));
}

#[test]
fn update_merges_only_given_fields() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);
    run_json(&cli, create_bigip("bigip1", "1.2.3.4", false));

    let out = run_json(
        &cli,
        Commands::Auth {
            command: AuthCommands::Update {
                name: "bigip1".to_string(),
                authentication_provider: None,
                host: Some("10.0.0.1".to_string()),
                port: Some(8443),
                user: None,
                password: None,
                api_endpoint: None,
                set_default: false,
            },
        },
    );
    assert_eq!(message_of(&out), "Authentication updated successfully");

    let profile = cli.repository().get("bigip1").unwrap();
    assert_eq!(profile.host.as_deref(), Some("10.0.0.1"));
    assert_eq!(profile.port, Some(8443));
    assert_eq!(profile.user.as_deref(), Some("admin"));
    assert_eq!(profile.password.as_deref(), Some("secret"));
    assert!(profile.is_default);
}

#[test]
fn update_and_delete_of_missing_name_fail() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);

    let err = cli
        .execute(&Commands::Auth {
            command: AuthCommands::Update {
                name: "ghost".to_string(),
                authentication_provider: None,
                host: Some("h".to_string()),
                port: None,
                user: None,
                password: None,
                api_endpoint: None,
                set_default: false,
            },
        })
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Update command failed. No account named ghost exists."
    );

    let err = cli.execute(&delete("ghost")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Delete command failed. No account named ghost exists."
    );
}

#[test]
fn list_masks_secrets_unless_asked() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);
    run_json(&cli, create_bigip("bigip1", "1.2.3.4", false));
    run_json(&cli, create_cloud("cs1"));

    let masked = run_json(
        &cli,
        Commands::Auth {
            command: AuthCommands::List {
                show_secrets: false,
            },
        },
    );
    let rows = masked.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "bigip1");
    assert_eq!(rows[1]["name"], "cs1");
    assert!(rows.iter().all(|row| row["password"] == "********"));

    let shown = run_json(
        &cli,
        Commands::Auth {
            command: AuthCommands::Show {
                name: "cs1".to_string(),
                show_secrets: true,
            },
        },
    );
    assert_eq!(shown["password"], "pw");
    assert_eq!(shown["authentication-type"], "cloud-services");
    assert_eq!(shown["default"], true);
}

#[test]
fn hand_edited_file_with_legacy_keys_is_readable() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);
    let auth_file = cli.paths().auth_file();
    fs::create_dir_all(auth_file.parent().unwrap()).unwrap();
    fs::write(
        &auth_file,
        "- name: old\n  authentication-type: cs\n  default: true\n  api-endpoint: api.example.com\n  team: edge\n- name: dev\n  authentication-type: bigip\n  host: 1.2.3.4\n  port: '8443'\n",
    )
    .unwrap();

    let profiles = cli.repository().list_all().unwrap();
    assert_eq!(profiles[0].provider_type, ProviderType::CloudServices);
    assert_eq!(profiles[0].api_endpoint.as_deref(), Some("api.example.com"));
    assert_eq!(profiles[1].port, Some(8443));

    run_json(&cli, delete("dev"));
    let content = fs::read_to_string(&auth_file).unwrap();
    assert!(content.contains("team: edge"));
    assert!(!content.contains("name: dev"));
}

#[test]
fn record_with_both_endpoint_spellings_stays_usable() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);
    let auth_file = cli.paths().auth_file();
    fs::create_dir_all(auth_file.parent().unwrap()).unwrap();
    fs::write(
        &auth_file,
        "- name: cs1\n  authentication-type: cs\n  default: true\n  api_endpoint: a.example.com\n  api-endpoint: b.example.com\n",
    )
    .unwrap();

    let default = run_json(&cli, default_of("cloud-services"));
    assert_eq!(default["name"], "cs1");
    assert_eq!(default["api_endpoint"], "b.example.com");

    run_json(&cli, create_bigip("bigip1", "1.2.3.4", false));
    let content = fs::read_to_string(&auth_file).unwrap();
    assert!(content.contains("api_endpoint: b.example.com"));
    assert!(!content.contains("api-endpoint"));
}

#[test]
fn corrupt_auth_file_is_reported_on_mutation() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);
    let auth_file = cli.paths().auth_file();
    fs::create_dir_all(auth_file.parent().unwrap()).unwrap();
    fs::write(&auth_file, "- name: [broken").unwrap();

    let err = cli
        .execute(&create_bigip("bigip1", "1.2.3.4", false))
        .unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Command failed. Unable to read"));

    let err = cli.execute(&default_of("bigip")).unwrap_err();
    assert!(matches!(err, ApiError::NoDefaultConfigured(_)));
}

#[test]
fn padded_names_resolve_to_the_stored_profile() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);
    run_json(&cli, create_bigip(" bigip1 ", "1.2.3.4", false));

    let shown = run_json(
        &cli,
        Commands::Auth {
            command: AuthCommands::Show {
                name: " bigip1 ".to_string(),
                show_secrets: false,
            },
        },
    );
    assert_eq!(shown["name"], "bigip1");

    let out = run_json(&cli, delete(" bigip1 "));
    assert_eq!(message_of(&out), "Successfully deleted auth: bigip1 contents");
    assert!(cli.repository().list_all().unwrap().is_empty());
}
