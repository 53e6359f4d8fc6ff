// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, load config, create the API client
//   and hand everything to the menu loop.
// - Returns `anyhow::Result` so startup failures print with context.

use anyhow::Context;
use ialctl::{api::ApiClient, config::Config, ui::{main_menu, TerminalPrompter}};
use std::io::IsTerminal;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the menu on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    tracing::info!(server_url = %config.server_url, room_id = %config.room_id, "config loaded");

    let api = ApiClient::new(&config.server_url)
        .context("failed to set up API client")?
        .with_progress(std::io::stderr().is_terminal());
    let mut prompter = TerminalPrompter::new();

    // Blocks until the user leaves the menu.
    main_menu(&config, &mut prompter, &api)?;
    Ok(())
}
