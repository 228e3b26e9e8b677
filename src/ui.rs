// UI layer: interactive menus built with `dialoguer`. The menus only
// collect input and print results; every decision is made by `AuthService`.

use crate::auth::{AuthService, UserListing};
use crate::error::AuthError;
use crate::privilege::Privilege;
use crate::session::{Identity, Session};
use anyhow::Result;
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Top-level menu. Runs until the user chooses "Exit"; after a successful
/// login the user menu takes over until logout.
///
/// Note: `Select::interact()` is keyboard-driven: use the arrow keys and
/// Enter to choose an option.
pub fn main_menu(auth: &AuthService) -> Result<()> {
    let mut session = Session::default();
    loop {
        println!("\n=== Login System ===");
        let items = ["Register", "Login", "Exit"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_register(auth)?,
            1 => handle_login(auth, &mut session)?,
            2 => {
                println!("Exiting...");
                break;
            }
            _ => println!("Invalid option!"),
        }

        if session.is_authenticated() {
            user_menu(auth, &mut session)?;
        }
    }
    Ok(())
}

/// Menu for an authenticated session. Returns once the user logs out.
fn user_menu(auth: &AuthService, session: &mut Session) -> Result<()> {
    while let Some(identity) = session.identity().cloned() {
        println!("\n--- User Menu ---");
        let mut items = vec!["View Profile", "Logout"];
        if identity.is_admin() {
            items.extend([
                "List All Users",
                "View User",
                "Delete User",
                "Reset User Password",
                "Change User Tier",
            ]);
        }
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                println!("\n--- Your Profile ---");
                println!("{}", format_profile(&identity));
            }
            1 => {
                auth.logout(session);
                println!("Logged out successfully!");
            }
            2 => match auth.list_all_users(session) {
                Ok(users) => {
                    println!("\n--- All Users ---");
                    for user in &users {
                        println!("{}", format_listing(user));
                    }
                }
                Err(e) => println!("{}", e),
            },
            3 => {
                let username = prompt_username()?;
                match auth.get_user(session, &username) {
                    Ok(user) => println!("{}", format_listing(&user)),
                    Err(e) => println!("{}", e),
                }
            }
            4 => {
                let username = prompt_username()?;
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete {}?", username.trim()))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    continue;
                }
                match auth.delete_user(session, &username) {
                    Ok(()) => println!("User deleted successfully!"),
                    Err(e) => println!("{}", e),
                }
            }
            5 => {
                let username = prompt_username()?;
                match auth.reset_password(session, &username) {
                    Ok(password) => {
                        println!("Password reset successfully.");
                        println!("New password: {}", password);
                    }
                    Err(e) => println!("{}", e),
                }
            }
            6 => {
                let username = prompt_username()?;
                let Some(requested_tier) = prompt_tier()? else {
                    continue;
                };
                match auth.change_tier(session, &username, requested_tier) {
                    Ok(()) => println!("Account type updated!"),
                    Err(e) => println!("{}", e),
                }
            }
            _ => println!("Invalid option!"),
        }
    }
    Ok(())
}

fn prompt_username() -> Result<String> {
    Ok(Input::<String>::new().with_prompt("Enter username").interact_text()?)
}

/// Show the tiers and read a numeric choice. Non-numeric input is reported
/// as an invalid account type and yields `None`.
fn prompt_tier() -> Result<Option<i64>> {
    println!("\nSelect account type:");
    for tier in Privilege::ALL {
        println!("{}. {} (Privilege {})", tier.level(), tier, tier.level());
    }
    let choice: String = Input::new().with_prompt("Enter choice").interact_text()?;
    match choice.trim().parse::<i64>() {
        Ok(tier) => Ok(Some(tier)),
        Err(_) => {
            println!("{}", AuthError::InvalidTier(0));
            Ok(None)
        }
    }
}

/// Collect registration details. The name is checked first so a taken
/// username does not cost a password prompt.
fn handle_register(auth: &AuthService) -> Result<()> {
    println!("\n--- Registration ---");
    let username = prompt_username()?;
    if let Err(e) = auth.ensure_available(&username) {
        println!("{}", e);
        return Ok(());
    }

    let password: String = Password::new()
        .with_prompt("Enter password")
        .allow_empty_password(true)
        .interact()?;

    let Some(requested_tier) = prompt_tier()? else {
        return Ok(());
    };

    let spinner = spinner("Registering...")?;
    let outcome = auth.register(&username, &password, requested_tier);
    spinner.finish_and_clear();

    match outcome {
        Ok(()) => println!("Registration successful!"),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

/// Collect credentials and try to open `session`.
fn handle_login(auth: &AuthService, session: &mut Session) -> Result<()> {
    println!("\n--- Login ---");
    let username = prompt_username()?;
    let password: String = Password::new()
        .with_prompt("Enter password")
        .allow_empty_password(true)
        .interact()?;

    let spinner = spinner("Logging in...")?;
    let outcome = auth.login(session, &username, &password);
    spinner.finish_and_clear();

    match outcome {
        Ok(identity) => {
            println!("Login successful!");
            println!("Welcome, {}!", identity.username);
            println!("Account type: {}", identity.privilege);
        }
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

pub fn format_profile(identity: &Identity) -> String {
    format!(
        "Username: {}\nAccount Type: {}\nPrivilege Level: {}",
        identity.username,
        identity.privilege,
        identity.privilege.level()
    )
}

pub fn format_listing(user: &UserListing) -> String {
    format!(
        "Username: {} | Type: {} | Privilege: {}",
        user.username, user.tier_name, user.privilege
    )
}
