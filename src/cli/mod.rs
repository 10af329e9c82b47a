//! CLI command parsing.

use clap::{Parser, Subcommand};

/// PromptDesk - reusable AI text tasks from the terminal.
#[derive(Parser)]
#[command(name = "pdesk")]
#[command(about = "Reusable AI text tasks from the terminal")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage tasks.
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Manage AI providers.
    Provider {
        #[command(subcommand)]
        command: ProviderCommands,
    },

    /// List models offered by enabled providers.
    Models,

    /// Run a task over input text.
    Run {
        /// Task id to run.
        #[arg(short, long)]
        task: String,

        /// Model identifier (defaults to the first available model).
        #[arg(short, long)]
        model: Option<String>,

        /// Input text to transform.
        input: String,
    },

    /// Manage configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks.
    List {
        /// Output format (table or json).
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Add a new task.
    Add {
        /// Display name.
        name: String,

        /// Instruction template sent to the model.
        description: String,
    },

    /// Edit an existing task.
    Edit {
        /// Task id.
        id: String,

        /// New display name.
        #[arg(short, long)]
        name: Option<String>,

        /// New instruction template.
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Remove a task.
    Remove {
        /// Task id.
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ProviderCommands {
    /// List providers and their status.
    List,

    /// Enable a provider.
    Enable {
        /// Provider slug (e.g. "openai").
        id: String,
    },

    /// Disable a provider.
    Disable {
        /// Provider slug (e.g. "openai").
        id: String,
    },

    /// Store an API key for a provider.
    SetKey {
        /// Provider slug (e.g. "openai").
        id: String,

        /// API key (prompted for securely when omitted).
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Clear a provider's API key.
    ClearKey {
        /// Provider slug (e.g. "openai").
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration.
    Show,

    /// Show the configuration file path.
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verify the CLI is correctly configured
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_verbose_flag() {
        let cli = Cli::parse_from(["pdesk", "-v", "models"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["pdesk", "-vvv", "models"]);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn cli_verbose_is_global() {
        // Also works after the subcommand
        let cli = Cli::parse_from(["pdesk", "models", "-v"]);
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Commands::Models));
    }

    #[test]
    fn cli_parses_task_add() {
        let cli = Cli::parse_from(["pdesk", "task", "add", "Summarize", "Summarize the text"]);
        match cli.command {
            Commands::Task {
                command: TaskCommands::Add { name, description },
            } => {
                assert_eq!(name, "Summarize");
                assert_eq!(description, "Summarize the text");
            }
            _ => panic!("expected task add"),
        }
    }

    #[test]
    fn cli_parses_task_edit_with_partial_fields() {
        let cli = Cli::parse_from(["pdesk", "task", "edit", "t1", "--name", "New name"]);
        match cli.command {
            Commands::Task {
                command: TaskCommands::Edit {
                    id,
                    name,
                    description,
                },
            } => {
                assert_eq!(id, "t1");
                assert_eq!(name.as_deref(), Some("New name"));
                assert!(description.is_none());
            }
            _ => panic!("expected task edit"),
        }
    }

    #[test]
    fn cli_parses_task_list_default_format() {
        let cli = Cli::parse_from(["pdesk", "task", "list"]);
        match cli.command {
            Commands::Task {
                command: TaskCommands::List { format },
            } => assert_eq!(format, "table"),
            _ => panic!("expected task list"),
        }
    }

    #[test]
    fn cli_parses_provider_enable() {
        let cli = Cli::parse_from(["pdesk", "provider", "enable", "anthropic"]);
        match cli.command {
            Commands::Provider {
                command: ProviderCommands::Enable { id },
            } => assert_eq!(id, "anthropic"),
            _ => panic!("expected provider enable"),
        }
    }

    #[test]
    fn cli_parses_provider_set_key() {
        let cli = Cli::parse_from(["pdesk", "provider", "set-key", "openai"]);
        match cli.command {
            Commands::Provider {
                command: ProviderCommands::SetKey { id, api_key },
            } => {
                assert_eq!(id, "openai");
                assert!(api_key.is_none());
            }
            _ => panic!("expected provider set-key"),
        }
    }

    #[test]
    fn cli_parses_provider_set_key_with_value() {
        let cli = Cli::parse_from([
            "pdesk",
            "provider",
            "set-key",
            "openai",
            "--api-key",
            "sk-test",
        ]);
        match cli.command {
            Commands::Provider {
                command: ProviderCommands::SetKey { id, api_key },
            } => {
                assert_eq!(id, "openai");
                assert_eq!(api_key.as_deref(), Some("sk-test"));
            }
            _ => panic!("expected provider set-key"),
        }
    }

    #[test]
    fn cli_parses_run_with_default_model() {
        let cli = Cli::parse_from(["pdesk", "run", "--task", "t1", "teh text"]);
        match cli.command {
            Commands::Run { task, model, input } => {
                assert_eq!(task, "t1");
                assert!(model.is_none());
                assert_eq!(input, "teh text");
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn cli_parses_run_with_explicit_model() {
        let cli = Cli::parse_from([
            "pdesk", "run", "--task", "t1", "--model", "gpt-4o", "teh text",
        ]);
        match cli.command {
            Commands::Run { model, .. } => assert_eq!(model.as_deref(), Some("gpt-4o")),
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn cli_parses_models_command() {
        let cli = Cli::parse_from(["pdesk", "models"]);
        assert!(matches!(cli.command, Commands::Models));
    }

    #[test]
    fn cli_parses_config_show() {
        let cli = Cli::parse_from(["pdesk", "config", "show"]);
        match cli.command {
            Commands::Config { command } => assert!(matches!(command, ConfigCommands::Show)),
            _ => panic!("expected config show"),
        }
    }

    #[test]
    fn cli_parses_config_path() {
        let cli = Cli::parse_from(["pdesk", "config", "path"]);
        match cli.command {
            Commands::Config { command } => assert!(matches!(command, ConfigCommands::Path)),
            _ => panic!("expected config path"),
        }
    }
}
