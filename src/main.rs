use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dialoguer::{Password, theme::ColorfulTheme};
use tracing_subscriber::EnvFilter;

use promptdesk::{
    Config,
    bridge::Bridge,
    cli::{Cli, Commands, ConfigCommands, ProviderCommands, TaskCommands},
    core::{
        AiProvider, Dispatcher, ExecuteRequest, ProviderStore, TaskDraft, TaskStore, catalog,
    },
    host::HostBridge,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Task { command } => handle_task_command(command).await,
        Commands::Provider { command } => handle_provider_command(command).await,
        Commands::Models => handle_models().await,
        Commands::Run { task, model, input } => handle_run(&task, model.as_deref(), &input).await,
        Commands::Config { command } => handle_config_command(command),
    }
}

fn bridge_from_config() -> anyhow::Result<Arc<dyn Bridge>> {
    let config = Config::load()?;
    Ok(Arc::new(HostBridge::from_config(&config)?))
}

async fn handle_task_command(command: TaskCommands) -> anyhow::Result<()> {
    let mut store = TaskStore::new(bridge_from_config()?);
    store.load().await?;

    match command {
        TaskCommands::List { format } => {
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(store.tasks())?);
            } else {
                println!("{:<36} {:<24} Description", "ID", "Name");
                println!("{}", "-".repeat(100));
                for task in store.tasks() {
                    let name: String = task.name.chars().take(22).collect();
                    let description: String = task.task_description.chars().take(38).collect();
                    println!("{:<36} {name:<24} {description}", task.id);
                }
            }
        }

        TaskCommands::Add { name, description } => {
            let task = store.add(TaskDraft {
                name,
                task_description: description,
            });
            if !store.all_valid() {
                anyhow::bail!("task name and description must not be blank");
            }
            store.commit().await?;
            println!("Added task {}", task.id);
        }

        TaskCommands::Edit {
            id,
            name,
            description,
        } => {
            let Some(task) = store.get(&id) else {
                anyhow::bail!("no task with id {id}");
            };
            let mut task = task.clone();
            if let Some(name) = name {
                task.name = name;
            }
            if let Some(description) = description {
                task.task_description = description;
            }
            store.edit(task);
            if !store.all_valid() {
                anyhow::bail!("task name and description must not be blank");
            }
            store.commit().await?;
            println!("Updated task {id}");
        }

        TaskCommands::Remove { id } => {
            if !store.remove(&id) {
                anyhow::bail!("no task with id {id}");
            }
            store.commit().await?;
            println!("Removed task {id}");
        }
    }

    Ok(())
}

async fn handle_provider_command(command: ProviderCommands) -> anyhow::Result<()> {
    let mut store = ProviderStore::new(bridge_from_config()?);
    store.load().await?;

    match command {
        ProviderCommands::List => {
            println!("{:<16} {:<20} {:<9} Key", "ID", "Name", "Enabled");
            println!("{}", "-".repeat(56));
            for provider in store.providers() {
                let key = if provider.api_key.is_empty() {
                    "unset"
                } else {
                    "set"
                };
                println!(
                    "{:<16} {:<20} {:<9} {key}",
                    provider.id, provider.name, provider.enabled
                );
            }
        }

        ProviderCommands::Enable { id } => {
            update_provider(&mut store, &id, |provider| provider.enabled = true).await?;
            println!("Enabled {id}");
        }

        ProviderCommands::Disable { id } => {
            update_provider(&mut store, &id, |provider| provider.enabled = false).await?;
            println!("Disabled {id}");
        }

        ProviderCommands::SetKey { id, api_key } => {
            let key = match api_key {
                Some(key) => key,
                None => Password::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("Enter API key for {id}"))
                    .interact()?,
            };
            update_provider(&mut store, &id, |provider| provider.api_key = key).await?;
            println!("Stored API key for {id}");
        }

        ProviderCommands::ClearKey { id } => {
            update_provider(&mut store, &id, |provider| provider.api_key.clear()).await?;
            println!("Cleared API key for {id}");
        }
    }

    Ok(())
}

/// Apply an edit to one provider entry and flush the list.
async fn update_provider(
    store: &mut ProviderStore,
    id: &str,
    apply: impl FnOnce(&mut AiProvider),
) -> anyhow::Result<()> {
    let Some(provider) = store.get(id) else {
        let known: Vec<&str> = catalog::PROVIDERS.iter().map(|spec| spec.id).collect();
        anyhow::bail!("unknown provider {id} (known: {})", known.join(", "));
    };
    let mut provider = provider.clone();
    apply(&mut provider);
    store.edit(provider);
    store.commit().await?;
    Ok(())
}

async fn handle_models() -> anyhow::Result<()> {
    let mut store = ProviderStore::new(bridge_from_config()?);
    store.load().await?;

    let groups = catalog::grouped_models(store.providers());
    if groups.is_empty() {
        println!("No models available. Enable a provider with `pdesk provider enable <id>`.");
        return Ok(());
    }

    for (provider_id, models) in groups {
        let name = catalog::provider_spec(provider_id).map_or(provider_id, |spec| spec.name);
        println!("{name}:");
        for model in models {
            println!("  {:<32} {}", model.value, model.label);
        }
    }

    if let Some(model) = catalog::default_model(store.providers()) {
        println!("\nDefault: {}", model.value);
    }

    Ok(())
}

async fn handle_run(task_id: &str, model: Option<&str>, input: &str) -> anyhow::Result<()> {
    if input.trim().is_empty() {
        anyhow::bail!("input text is empty");
    }

    let bridge = bridge_from_config()?;

    let mut tasks = TaskStore::new(Arc::clone(&bridge));
    tasks.load().await?;
    let Some(task) = tasks.get(task_id) else {
        anyhow::bail!("no task with id {task_id}; see `pdesk task list`");
    };

    let mut providers = ProviderStore::new(Arc::clone(&bridge));
    providers.load().await?;

    let model = match model {
        Some(value) => {
            let Some(model) = catalog::find_model(value) else {
                anyhow::bail!("unknown model {value}; see `pdesk models`");
            };
            if !catalog::is_available(value, providers.providers()) {
                anyhow::bail!("model {value} belongs to a disabled provider; see `pdesk models`");
            }
            model
        }
        None => catalog::default_model(providers.providers())
            .ok_or_else(|| anyhow::anyhow!("no models available; enable a provider first"))?,
    };

    let request = ExecuteRequest {
        task_id: task.id.clone(),
        provider_id: model.provider.to_string(),
        model: model.value.to_string(),
        input: input.to_string(),
    };

    let dispatcher = Dispatcher::new(bridge);
    let completion = dispatcher.execute(request).await?;
    println!("{}", completion.content);

    Ok(())
}

fn handle_config_command(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = Config::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommands::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
