// Library root
// -----------
// This crate exposes the account manager as a library; the binary
// (`main.rs`) wires configuration and logging and runs the menu loop.
//
// Module responsibilities:
// - `store`: the JSON user store, read and written whole.
// - `credentials`: how passwords are sealed for storage and verified.
// - `privilege`: the three account tiers and their display names.
// - `session`: who is logged in, owned by the caller.
// - `auth`: registration, login and privilege-gated listing.
// - `ui`: the interactive menus, which only delegate to `auth`.
// - `config`: command-line and environment settings.
//
// Keeping the menus thin means the auth rules can be exercised directly
// from tests or from a different front end.
pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod privilege;
pub mod session;
pub mod store;
pub mod ui;

pub use auth::{AuthService, UserListing};
pub use error::AuthError;
pub use privilege::Privilege;
pub use session::{Identity, Session};
pub use store::{AccountRecord, UserStore, Users};
