// Command-line and environment configuration for the `tenantdesk` binary.

use crate::credentials::CredentialScheme;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(name = "tenantdesk", version, about = "Interactive account manager")]
pub struct Config {
    /// Path of the JSON user store. A leading `~/` refers to the home directory.
    #[arg(long, env = "TENANTDESK_USERS_FILE", default_value = "users.json")]
    pub store: PathBuf,

    /// How passwords are kept in the store.
    #[arg(long, value_enum, env = "TENANTDESK_CREDENTIALS", default_value_t = CredentialScheme::Plaintext)]
    pub credentials: CredentialScheme,

    /// Log filter directive, e.g. `info` or `tenantdesk_cli=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

impl Config {
    /// The store path with `~/` expanded.
    pub fn store_path(&self) -> PathBuf {
        expand_home(&self.store)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
