// Registration, login and privilege checks on top of the user store.
//
// Each call loads a fresh snapshot of the store, so the service itself
// holds no user data between calls. The caller owns the `Session` and
// passes it in wherever a call depends on or changes who is logged in.

use crate::credentials::{generate_password, CredentialVerifier, GENERATED_PASSWORD_LEN};
use crate::error::{AuthError, Result};
use crate::privilege::{tier_name, Privilege};
use crate::session::{Identity, Session};
use crate::store::{AccountRecord, UserStore, Users};
use tracing::{info, warn};

/// One row of the admin user listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserListing {
    pub username: String,
    pub tier_name: &'static str,
    pub privilege: i64,
}

pub struct AuthService {
    store: UserStore,
    verifier: Box<dyn CredentialVerifier>,
}

impl AuthService {
    pub fn new(store: UserStore, verifier: Box<dyn CredentialVerifier>) -> Self {
        AuthService { store, verifier }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// Check that `username` could be registered, before asking for the rest
    /// of the details.
    pub fn ensure_available(&self, username: &str) -> Result<()> {
        let username = normalize(username)?;
        check_available(&self.store.load(), username)
    }

    /// Create a new account. Does not log the user in.
    pub fn register(&self, username: &str, password: &str, requested_tier: i64) -> Result<()> {
        let username = normalize(username)?;
        let mut users = self.store.load();
        check_available(&users, username)?;
        let privilege = Privilege::try_from(requested_tier).inspect_err(|_| {
            warn!(username, requested_tier, "Registration rejected: invalid tier");
        })?;

        let record = AccountRecord {
            password: self.verifier.seal(password)?,
            privilege: privilege.level(),
        };
        users.insert(username.to_string(), record);
        self.store.save(&users)?;

        info!(username, tier = %privilege, "Registered user");
        Ok(())
    }

    /// Check credentials and, on success, make `session` authenticated as
    /// that user. A failed attempt leaves `session` untouched.
    pub fn login(&self, session: &mut Session, username: &str, password: &str) -> Result<Identity> {
        let username = username.trim();
        let users = self.store.load();
        let record = users.get(username).ok_or_else(|| {
            warn!(username, "Login rejected: unknown user");
            AuthError::UserNotFound(username.to_string())
        })?;

        if !self.verifier.verify(&record.password, password) {
            warn!(username, "Login rejected: incorrect password");
            return Err(AuthError::IncorrectPassword);
        }

        // Records with an out-of-range tier are listed but can never hold a session.
        let privilege = Privilege::try_from(record.privilege).inspect_err(|_| {
            warn!(username, level = record.privilege, "Login rejected: stored tier is invalid");
        })?;

        let identity = Identity {
            username: username.to_string(),
            privilege,
        };
        info!(username, tier = %privilege, "User logged in");
        *session = Session::Authenticated(identity.clone());
        Ok(identity)
    }

    pub fn logout(&self, session: &mut Session) {
        if let Some(identity) = session.end() {
            info!(username = %identity.username, "User logged out");
        }
    }

    /// Every registered account, in store order. Admins only.
    pub fn list_all_users(&self, session: &Session) -> Result<Vec<UserListing>> {
        require_admin(session, "list users")?;
        Ok(self
            .store
            .load()
            .into_iter()
            .map(|(username, record)| listing(username, &record))
            .collect())
    }

    /// A single account by name. Admins only.
    pub fn get_user(&self, session: &Session, username: &str) -> Result<UserListing> {
        require_admin(session, "view user")?;
        let username = username.trim();
        let users = self.store.load();
        let record = existing(&users, username)?;
        Ok(listing(username.to_string(), record))
    }

    /// Remove an account. Admins only, and never the caller's own account.
    pub fn delete_user(&self, session: &Session, username: &str) -> Result<()> {
        let admin = require_admin(session, "delete user")?;
        let username = username.trim();
        let mut users = self.store.load();
        existing(&users, username)?;
        if admin.username == username {
            warn!(username, "Deletion rejected: own account");
            return Err(AuthError::OwnAccount);
        }

        users.shift_remove(username);
        self.store.save(&users)?;
        info!(username, admin = %admin.username, "Deleted user");
        Ok(())
    }

    /// Replace an account's password with a freshly generated one and
    /// return it so it can be handed to the user. Admins only.
    pub fn reset_password(&self, session: &Session, username: &str) -> Result<String> {
        let admin = require_admin(session, "reset password")?;
        let username = username.trim();
        let mut users = self.store.load();
        existing(&users, username)?;

        let new_password = generate_password(GENERATED_PASSWORD_LEN);
        let sealed = self.verifier.seal(&new_password)?;
        if let Some(record) = users.get_mut(username) {
            record.password = sealed;
        }
        self.store.save(&users)?;
        info!(username, admin = %admin.username, "Reset password");
        Ok(new_password)
    }

    /// Move an account to another tier. Admins only, and never their own
    /// account, so a store always keeps the admin that made the change.
    pub fn change_tier(&self, session: &Session, username: &str, requested_tier: i64) -> Result<()> {
        let admin = require_admin(session, "change tier")?;
        let username = username.trim();
        let mut users = self.store.load();
        existing(&users, username)?;
        if admin.username == username {
            warn!(username, "Tier change rejected: own account");
            return Err(AuthError::OwnAccount);
        }
        let privilege = Privilege::try_from(requested_tier).inspect_err(|_| {
            warn!(username, requested_tier, "Tier change rejected: invalid tier");
        })?;

        if let Some(record) = users.get_mut(username) {
            record.privilege = privilege.level();
        }
        self.store.save(&users)?;
        info!(username, tier = %privilege, admin = %admin.username, "Changed tier");
        Ok(())
    }
}

fn require_admin<'a>(session: &'a Session, action: &str) -> Result<&'a Identity> {
    match session.identity() {
        Some(identity) if identity.is_admin() => Ok(identity),
        Some(identity) => {
            warn!(username = %identity.username, action, "Permission denied");
            Err(AuthError::PermissionDenied)
        }
        None => {
            warn!(action, "Permission denied for anonymous session");
            Err(AuthError::PermissionDenied)
        }
    }
}

fn check_available(users: &Users, username: &str) -> Result<()> {
    if users.contains_key(username) {
        warn!(username, "Registration rejected: username taken");
        return Err(AuthError::DuplicateUser(username.to_string()));
    }
    Ok(())
}

fn existing<'a>(users: &'a Users, username: &str) -> Result<&'a AccountRecord> {
    users
        .get(username)
        .ok_or_else(|| AuthError::UserNotFound(username.to_string()))
}

fn listing(username: String, record: &AccountRecord) -> UserListing {
    UserListing {
        username,
        tier_name: tier_name(record.privilege),
        privilege: record.privilege,
    }
}

fn normalize(username: &str) -> Result<&str> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AuthError::EmptyUsername);
    }
    Ok(username)
}
