//! CLI Tooling
//!
//! Command-line surface of the `f5` binary. Each invocation builds one
//! [`CliContext`] holding resolved paths, settings, the auth repository and
//! the login verifier, then executes a single command against it.

use crate::auth::commands::{AuthCommandService, CreateAuthRequest, UpdateAuthRequest};
use crate::auth::profile::ProviderType;
use crate::auth::repository::AuthRepository;
use crate::auth::storage::YamlProfileStorage;
use crate::config::settings::{
    CliSettings, OutputFormat, ALLOW_TELEMETRY_KEY, DISABLE_SSL_WARNINGS_KEY, OUTPUT_KEY,
};
use crate::config::{CliPaths, SettingsStore};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::output::{format_output, message, profile_view, profiles_view};
use crate::session::{self, HttpSessionVerifier, SessionVerifier, DEFAULT_LOGIN_TIMEOUT_SECS};
use clap::{Parser, Subcommand};
use serde_json::Value;
use serde_yaml::Mapping;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// F5 CLI - configure BIG-IP devices and F5 Cloud Services accounts
#[derive(Parser)]
#[command(name = "f5")]
#[command(version, about = "Command line interface for F5 BIG-IP and F5 Cloud Services")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration directory (default: $F5_CLI_HOME or ~/.f5_cli)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging configuration from the global flags.
    ///
    /// An explicit `--log-level` wins over `--verbose`.
    pub fn logging_config(&self) -> LoggingConfig {
        let mut config = LoggingConfig::default();
        if self.verbose {
            config.level = "info".to_string();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        config.file = self.log_file.clone();
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage authentication profiles
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Manage CLI defaults
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Verify credentials and store them as the default profile
    Login {
        /// Provider type (bigip, cloud-services)
        #[arg(long)]
        authentication_provider: String,
        /// BIG-IP management host
        #[arg(long)]
        host: Option<String>,
        /// BIG-IP management port
        #[arg(long)]
        port: Option<u16>,
        /// Cloud Services API endpoint
        #[arg(long)]
        api_endpoint: Option<String>,
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an authentication profile
    Create {
        /// Provider type (bigip, cloud-services)
        #[arg(long)]
        authentication_provider: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        api_endpoint: Option<String>,
        /// Make this the default profile for its provider type
        #[arg(long)]
        set_default: bool,
    },
    /// Update fields of an existing profile
    Update {
        #[arg(long)]
        name: String,
        /// Move the profile to another provider type
        #[arg(long)]
        authentication_provider: Option<String>,
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        api_endpoint: Option<String>,
        #[arg(long)]
        set_default: bool,
    },
    /// Delete a profile
    Delete {
        #[arg(long)]
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        auto_approve: bool,
    },
    /// List all profiles
    List {
        #[arg(long)]
        show_secrets: bool,
    },
    /// Show one profile
    Show {
        #[arg(long)]
        name: String,
        #[arg(long)]
        show_secrets: bool,
    },
    /// Show the default profile for a provider type
    Default {
        #[arg(long)]
        authentication_provider: String,
        #[arg(long)]
        show_secrets: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Set CLI defaults
    SetDefaults {
        /// Output format (json, table)
        #[arg(long)]
        output: Option<String>,
        #[arg(long)]
        allow_telemetry: Option<bool>,
        #[arg(long)]
        disable_ssl_warnings: Option<bool>,
        /// Skip the confirmation prompt
        #[arg(long)]
        auto_approve: bool,
    },
    /// List CLI defaults
    ListDefaults,
}

/// Per-invocation state shared by every command handler.
pub struct CliContext {
    paths: CliPaths,
    settings: CliSettings,
    settings_store: SettingsStore,
    repository: AuthRepository<YamlProfileStorage>,
    verifier: Arc<dyn SessionVerifier>,
    login_timeout: Duration,
}

impl CliContext {
    /// Create a CLI context rooted at `home` (or the resolved default).
    pub fn new(home: Option<PathBuf>) -> Result<Self, ApiError> {
        let paths = CliPaths::resolve(home)?;
        let settings_store = SettingsStore::at_home(&paths);
        let settings = settings_store.resolve()?;
        let repository = AuthRepository::new(YamlProfileStorage::at_home(&paths));
        let verifier = HttpSessionVerifier::default()
            .with_ssl_warnings(!settings.disable_ssl_warnings);

        Ok(Self {
            paths,
            settings,
            settings_store,
            repository,
            verifier: Arc::new(verifier),
            login_timeout: Duration::from_secs(DEFAULT_LOGIN_TIMEOUT_SECS),
        })
    }

    /// Replace the credential verifier used by `login`.
    pub fn with_verifier(mut self, verifier: Arc<dyn SessionVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn with_login_timeout(mut self, timeout: Duration) -> Self {
        self.login_timeout = timeout;
        self
    }

    pub fn paths(&self) -> &CliPaths {
        &self.paths
    }

    pub fn settings(&self) -> &CliSettings {
        &self.settings
    }

    pub fn repository(&self) -> &AuthRepository<YamlProfileStorage> {
        &self.repository
    }

    /// Execute a CLI command and return its rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        info!(command = %command_name(command), home = %self.paths.home().display(), "Executing command");
        let data = match command {
            Commands::Auth { command } => self.handle_auth(command)?,
            Commands::Config { command } => self.handle_config(command)?,
            Commands::Login {
                authentication_provider,
                host,
                port,
                api_endpoint,
                user,
                password,
            } => self.handle_login(
                authentication_provider,
                host.clone(),
                *port,
                api_endpoint.clone(),
                user.clone(),
                password.clone(),
            )?,
        };
        format_output(&data, self.settings.output)
    }

    fn handle_auth(&self, command: &AuthCommands) -> Result<Value, ApiError> {
        match command {
            AuthCommands::Create {
                authentication_provider,
                name,
                host,
                port,
                user,
                password,
                api_endpoint,
                set_default,
            } => {
                let password = prompt_password_if_missing(user.as_deref(), password.clone())?;
                let request = CreateAuthRequest {
                    provider_type: authentication_provider.clone(),
                    name: name.clone(),
                    host: host.clone(),
                    port: *port,
                    user: user.clone(),
                    password,
                    api_endpoint: api_endpoint.clone(),
                    set_default: *set_default,
                };
                AuthCommandService::run_create(&self.repository, &request)?;
                Ok(message("Authentication configured successfully"))
            }
            AuthCommands::Update {
                name,
                authentication_provider,
                host,
                port,
                user,
                password,
                api_endpoint,
                set_default,
            } => {
                let password = prompt_password_if_missing(user.as_deref(), password.clone())?;
                let request = UpdateAuthRequest {
                    name: name.clone(),
                    provider_type: authentication_provider.clone(),
                    host: host.clone(),
                    port: *port,
                    user: user.clone(),
                    password,
                    api_endpoint: api_endpoint.clone(),
                    set_default: *set_default,
                };
                AuthCommandService::run_update(&self.repository, &request)?;
                Ok(message("Authentication updated successfully"))
            }
            AuthCommands::Delete { name, auto_approve } => {
                if !auto_approve {
                    confirm(&format!("Delete authentication profile '{}'?", name))?;
                }
                let removed = self.repository.delete(name.trim())?;
                Ok(message(format!(
                    "Successfully deleted auth: {} contents",
                    removed.name
                )))
            }
            AuthCommands::List { show_secrets } => {
                profiles_view(&self.repository.list_all()?, *show_secrets)
            }
            AuthCommands::Show { name, show_secrets } => {
                profile_view(&self.repository.get(name.trim())?, *show_secrets)
            }
            AuthCommands::Default {
                authentication_provider,
                show_secrets,
            } => {
                let profile =
                    AuthCommandService::run_default(&self.repository, authentication_provider)?;
                profile_view(&profile, *show_secrets)
            }
        }
    }

    fn handle_config(&self, command: &ConfigCommands) -> Result<Value, ApiError> {
        match command {
            ConfigCommands::SetDefaults {
                output,
                allow_telemetry,
                disable_ssl_warnings,
                auto_approve,
            } => {
                let mut updates = Mapping::new();
                if let Some(output) = output {
                    let format: OutputFormat = output.parse()?;
                    updates.insert(OUTPUT_KEY.into(), format.as_str().into());
                }
                if let Some(allow) = allow_telemetry {
                    updates.insert(ALLOW_TELEMETRY_KEY.into(), (*allow).into());
                }
                if let Some(disable) = disable_ssl_warnings {
                    updates.insert(DISABLE_SSL_WARNINGS_KEY.into(), (*disable).into());
                }
                if updates.is_empty() {
                    return Err(ApiError::ConfigError(
                        "Nothing to set; pass --output, --allow-telemetry or --disable-ssl-warnings"
                            .to_string(),
                    ));
                }

                if !auto_approve {
                    confirm("Update CLI defaults?")?;
                }
                self.settings_store.create_or_update(updates)?;

                let mut text = String::from("CLI defaults updated successfully.");
                if *disable_ssl_warnings == Some(true) {
                    text.push_str(" Warning: Insecure SSL warnings have been disabled");
                }
                Ok(message(text))
            }
            ConfigCommands::ListDefaults => {
                let defaults = self.settings_store.list()?;
                serde_json::to_value(defaults).map_err(|e| {
                    ApiError::ConfigError(format!("Failed to render CLI defaults: {}", e))
                })
            }
        }
    }

    fn handle_login(
        &self,
        authentication_provider: &str,
        host: Option<String>,
        port: Option<u16>,
        api_endpoint: Option<String>,
        user: Option<String>,
        password: Option<String>,
    ) -> Result<Value, ApiError> {
        let provider_type = AuthCommandService::parse_provider_type(authentication_provider)?;
        let host = match (provider_type, host) {
            (ProviderType::Bigip, None) => Some(prompt_text("Host")?),
            (_, host) => host,
        };
        let user = match user {
            Some(user) => user,
            None => prompt_text("User")?,
        };
        let password = match password {
            Some(password) => password,
            None => prompt_secret("Password")?,
        };

        let profile = AuthCommandService::login_profile(
            provider_type,
            host,
            port,
            api_endpoint,
            user,
            password,
        )?;
        session::verify_blocking(self.verifier.as_ref(), &profile, self.login_timeout)?;
        AuthCommandService::store_login(&self.repository, profile)?;
        Ok(message("Logged in successfully"))
    }
}

fn command_name(command: &Commands) -> String {
    match command {
        Commands::Auth { command } => format!("auth.{}", auth_command_name(command)),
        Commands::Config { command } => format!("config.{}", config_command_name(command)),
        Commands::Login { .. } => "login".to_string(),
    }
}

fn auth_command_name(command: &AuthCommands) -> &'static str {
    match command {
        AuthCommands::Create { .. } => "create",
        AuthCommands::Update { .. } => "update",
        AuthCommands::Delete { .. } => "delete",
        AuthCommands::List { .. } => "list",
        AuthCommands::Show { .. } => "show",
        AuthCommands::Default { .. } => "default",
    }
}

fn config_command_name(command: &ConfigCommands) -> &'static str {
    match command {
        ConfigCommands::SetDefaults { .. } => "set_defaults",
        ConfigCommands::ListDefaults => "list_defaults",
    }
}

fn input_error(e: dialoguer::Error) -> ApiError {
    ApiError::ConfigError(format!("Failed to get user input: {}", e))
}

fn confirm(prompt: &str) -> Result<(), ApiError> {
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(input_error)?;
    if confirmed {
        Ok(())
    } else {
        Err(ApiError::Aborted)
    }
}

fn prompt_text(prompt: &str) -> Result<String, ApiError> {
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(input_error)
}

fn prompt_secret(prompt: &str) -> Result<String, ApiError> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(input_error)
}

/// A user without a password means the password should be asked for.
fn prompt_password_if_missing(
    user: Option<&str>,
    password: Option<String>,
) -> Result<Option<String>, ApiError> {
    match (user, password) {
        (Some(_), None) => prompt_secret("Password").map(Some),
        (_, password) => Ok(password),
    }
}
