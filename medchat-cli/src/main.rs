//! CLI entry point for medchat

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use tokio::sync::Mutex;
use tracing::info;

use medchat_agent::ConversationController;
use medchat_core::config::{Config, ConfigLoader};
use medchat_core::logging::init_logging;
use medchat_core::markdown;
use medchat_core::session::{JsonFileStorage, Sender, SessionStore};
use medchat_core::utils::{ensure_dir, truncate};
use medchat_providers::{CompletionProvider, DynamicProvider, OllamaClient};

#[derive(Parser)]
#[command(name = "medchat")]
#[command(about = "A small chat assistant with persistent sessions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat (the default)
    Chat {
        /// Model to use for this run
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Show configuration and session status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loader = match &cli.config_dir {
        Some(dir) => ConfigLoader::with_dir(dir),
        None => ConfigLoader::new(),
    };
    ensure_dir(loader.config_dir());
    let config = loader.load()?;
    let _guard = init_logging(&config.logging);

    match cli.command.unwrap_or(Commands::Chat { model: None }) {
        Commands::Chat { model } => run_chat(&loader, config, model).await,
        Commands::Status => run_status(&loader, &config),
    }
}

fn run_status(loader: &ConfigLoader, config: &Config) -> Result<()> {
    println!("Config dir:  {}", loader.config_dir().display());
    println!("Endpoint:    {}", config.api.base_url);
    println!("Model:       {}", config.api.model);

    let store = SessionStore::initialize(Box::new(JsonFileStorage::new(
        loader.sessions_path(config),
    )));
    let collection = store.collection();
    println!("Sessions:    {}", collection.sessions.len());
    for session in &collection.sessions {
        println!(
            "  {} ({} message(s), {})",
            session.title,
            session.messages.len(),
            session.created
        );
    }
    Ok(())
}

async fn run_chat(loader: &ConfigLoader, config: Config, model: Option<String>) -> Result<()> {
    let model = model.unwrap_or_else(|| config.api.model.clone());
    let provider = Arc::new(DynamicProvider::new(Arc::new(OllamaClient::new(
        config.api.base_url.clone(),
        model,
    ))));

    let storage = JsonFileStorage::new(loader.sessions_path(&config));
    let store = Arc::new(Mutex::new(SessionStore::initialize(Box::new(storage))));
    let controller = ConversationController::new(store.clone(), provider.clone());

    info!("Interactive chat started with model {}", provider.model());
    println!(
        "{} (model: {}). Type {} for commands.",
        style("medchat").cyan().bold(),
        provider.model(),
        style("/help").green()
    );

    let stdin = std::io::stdin();
    loop {
        {
            let store = store.lock().await;
            let collection = store.collection();
            let title = collection
                .active()
                .map(|s| s.title.as_str())
                .unwrap_or("?");
            print!("{} ", style(format!("[{}]>", title)).dim());
        }
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            if !handle_command(command, &store, &provider, &config).await? {
                break;
            }
            continue;
        }

        let session_id = store.lock().await.collection().active_id;
        controller.send(session_id, line).await;
        print_last_reply(&store, session_id).await;
    }

    Ok(())
}

/// Handle a slash command. Returns false when the loop should exit.
async fn handle_command(
    command: &str,
    store: &Arc<Mutex<SessionStore>>,
    provider: &Arc<DynamicProvider>,
    config: &Config,
) -> Result<bool> {
    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "quit" | "exit" => return Ok(false),
        "help" => {
            println!("/new [title]     start a new chat");
            println!("/rename <title>  rename the current chat");
            println!("/list            list chats");
            println!("/switch <n>      switch to chat n");
            println!("/model <name>    switch model");
            println!("/quit            leave");
        }
        "new" => {
            let mut store = store.lock().await;
            let title = if arg.is_empty() {
                config.chat.default_title.as_str()
            } else {
                arg
            };
            let collection = store.create_session(Some(title));
            println!("Started {}", style(&collection.sessions[0].title).bold());
        }
        "rename" => {
            let mut store = store.lock().await;
            let active_id = store.collection().active_id;
            store.rename_session(active_id, arg);
        }
        "list" => {
            let store = store.lock().await;
            let collection = store.collection();
            for (i, session) in collection.sessions.iter().enumerate() {
                let marker = if session.id == collection.active_id {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {}. {} ({} message(s))",
                    marker,
                    i + 1,
                    session.title,
                    session.messages.len()
                );
            }
        }
        "switch" => {
            let mut store = store.lock().await;
            let index = arg.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
            match index.and_then(|i| store.collection().sessions.get(i).map(|s| s.id)) {
                Some(id) => {
                    store.select_session(id);
                }
                None => println!("No such chat: {}", arg),
            }
        }
        "model" => {
            if arg.is_empty() {
                println!("Current model: {}", provider.model());
                for name in &config.api.models {
                    println!("  {}", name);
                }
            } else {
                provider.update(Arc::new(OllamaClient::new(
                    config.api.base_url.clone(),
                    arg,
                )));
                println!("Switched to {}", style(arg).bold());
            }
        }
        _ => println!("Unknown command: /{}", name),
    }

    Ok(true)
}

/// Print the assistant's reply to the turn that just finished.
///
/// Assistant text goes through the markdown renderer; human text is
/// never rendered.
async fn print_last_reply(store: &Arc<Mutex<SessionStore>>, session_id: uuid::Uuid) {
    let store = store.lock().await;
    let Some(session) = store.collection().find(session_id) else {
        return;
    };
    if let Some(message) = session.messages.last() {
        if message.sender == Sender::Assistant {
            println!("{}", markdown::render(&message.text));
            tracing::debug!("Rendered reply: {}", truncate(&message.text, 80));
        }
    }
}
