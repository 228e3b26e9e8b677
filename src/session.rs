// Session state owned by whoever drives the auth service (the menu loop,
// a test). Nothing here is global, so independent sessions never interfere.

use crate::privilege::Privilege;

/// The authenticated user of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub privilege: Privilege,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.privilege == Privilege::Admin
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl Session {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(identity) => Some(identity),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }

    /// Drop back to anonymous, returning whoever was logged in.
    pub fn end(&mut self) -> Option<Identity> {
        match std::mem::take(self) {
            Session::Anonymous => None,
            Session::Authenticated(identity) => Some(identity),
        }
    }
}
