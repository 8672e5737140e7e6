mod cli;
mod config;
mod error;
mod model;
mod prompt;
mod tracker;
mod triage;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use cli::Args;
use config::Settings;
use prompt::terminal::TerminalPrompter;
use tracker::jira::JiraClient;
use triage::poll::TokioPause;
use triage::{Outcome, Triage};
use ui::console::Console;
use ui::theme::Palette;

fn init_tracing(level: tracing::Level, ansi: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_ansi(ansi)
        .with_max_level(level)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level(), !args.nocolor);

    let config = config::load_config(args.config.as_deref())?;
    let settings = Settings::resolve(&args, config, config::login())?;
    // Fail on a missing credential before anything touches the network.
    let token = config::api_token()?;
    debug!(board = settings.board, assignee = ?settings.assignee, dry_run = settings.dry_run, "settings resolved");

    let client = JiraClient::new(settings.jira.clone(), &token);
    let palette = Palette::new(settings.color);
    let console = Console::new(palette);
    let mut prompter = TerminalPrompter::new(palette);
    let pause = TokioPause;

    let outcome = Triage::new(
        &client,
        &mut prompter,
        &pause,
        &console,
        &settings.catalog,
        settings.triage_options(),
    )
    .run()
    .await?;
    debug!(?outcome, "done");
    if let Outcome::Completed { split } = outcome {
        console.success(&format!("Processed {split} issue(s)."));
    }

    Ok(())
}
