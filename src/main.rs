// Entrypoint for the CLI application.
// - Keeps `main` small: read config, set up logging, build the auth
//   service and hand it to the menu loop.
// - Returns `anyhow::Result` so terminal I/O failures end the program with
//   a readable message.

use clap::Parser;
use tenantdesk_cli::{config::Config, store::UserStore, ui::main_menu, AuthService};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so they never interleave with the menus on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level)?)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let store = UserStore::new(config.store_path());
    if let Err(e) = store.initialize() {
        // Not fatal: loads will report the problem and read as empty.
        warn!(path = %store.path().display(), "Store not initialized: {}", e);
    }
    info!(path = %store.path().display(), scheme = ?config.credentials, "Starting account manager");

    let auth = AuthService::new(store, config.credentials.into_verifier());

    // Blocks until the user chooses "Exit".
    main_menu(&auth)?;
    Ok(())
}
