use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;

use movavi_core::{
    format_response, ChatMessage, Config, Environment, MovaviClient, MovieBackend, MovieOverview,
};

mod app;
mod handler;
mod logging;
mod render;
mod tui;
mod ui;

use app::App;

#[derive(Parser)]
#[command(name = "movavi")]
#[command(about = "Chat with an AI movie reviewer from your terminal")]
#[command(version)]
struct Cli {
    /// Backend to talk to (defaults to MOVAVI_ENV, the config file, then the build profile)
    #[arg(long, value_enum, global = true)]
    env: Option<EnvArg>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum EnvArg {
    Production,
    Local,
}

impl From<EnvArg> for Environment {
    fn from(arg: EnvArg) -> Self {
        match arg {
            EnvArg::Production => Environment::Production,
            EnvArg::Local => Environment::Local,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive chat (default)
    Chat,
    /// Ask one question and print the answer
    Ask {
        /// Your question
        question: String,
        /// Print the rendered HTML instead of terminal text
        #[arg(long)]
        html: bool,
    },
    /// Check that the backend is up
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_else(|_| Config::new());

    let environment = cli
        .env
        .map(Environment::from)
        .unwrap_or_else(|| config.environment());
    let client = MovaviClient::new(environment.base_url());

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let _guard = logging::init_file(&config)?;
            tracing::info!(env = environment.as_str(), url = client.base_url(), "starting chat");
            run_tui(Arc::new(client), environment).await
        }
        Commands::Ask { question, html } => {
            logging::init_stderr(&config);
            ask_once(&client, &question, html).await
        }
        Commands::Health => {
            logging::init_stderr(&config);
            check_health(&client, client.base_url()).await
        }
    }
}

async fn run_tui(backend: Arc<dyn MovieBackend>, environment: Environment) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let mut app = App::new(backend, environment);
    let mut events = tui::EventHandler::new();

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    if let Some(task) = app.reply_task.take() {
        task.abort();
    }
    tui::restore()?;
    result
}

async fn run_loop(
    terminal: &mut tui::Tui,
    app: &mut App,
    events: &mut tui::EventHandler,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        let Some(event) = events.next().await else {
            break;
        };
        handler::handle_event(app, event)?;
        app.poll_reply().await;
    }
    Ok(())
}

async fn ask_once(backend: &dyn MovieBackend, question: &str, html: bool) -> Result<()> {
    if question.trim().is_empty() {
        return Ok(());
    }

    println!("🎬 Asking about: {}\n", question.bold().cyan());

    let answer = backend
        .ask(question.trim())
        .await
        .context("Sorry, something went wrong")?;

    let formatted = format_response(&answer.ai_response);
    if html {
        println!("{}", ChatMessage::assistant(formatted).markup());
        return Ok(());
    }

    if let Some(overview) = &formatted.overview {
        print_overview(overview);
    }
    println!("{}", formatted.body);

    Ok(())
}

fn print_overview(overview: &MovieOverview) {
    println!("{}", overview.title().bold().cyan());
    println!("{}", overview.rating().yellow());
    println!("{} · {}", overview.genre(), overview.runtime());
    println!("{} {}", "Director:".bold(), overview.director());
    println!("{} {}", "Cast:".bold(), overview.cast());
    if let Some(plot) = overview.plot() {
        println!("{}", plot.italic());
    }
    if let Some(poster) = overview.poster() {
        println!("{} {}", "Poster:".dimmed(), poster.dimmed());
    }
    println!("{}", "─".repeat(40).dimmed());
}

async fn check_health(backend: &dyn MovieBackend, base_url: &str) -> Result<()> {
    println!("Checking {}", base_url.bold());

    let health = backend
        .health()
        .await
        .with_context(|| format!("Backend unreachable at {}", base_url))?;

    if !health.is_healthy() {
        println!("{} status: {}", "!".yellow(), health.status.yellow());
        bail!("backend reported status {:?}", health.status);
    }

    println!(
        "{} {}",
        "✓".green(),
        health.service.as_deref().unwrap_or("backend").green()
    );
    Ok(())
}
