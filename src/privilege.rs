// Privilege tiers. The store keeps the raw integer; everything that gates
// an action goes through the closed `Privilege` enum instead.

use crate::error::AuthError;
use std::fmt;

/// One of the three fixed account tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Privilege {
    Tenant = 1,
    PropertyOwner = 2,
    Admin = 3,
}

impl Privilege {
    pub const ALL: [Privilege; 3] = [
        Privilege::Tenant,
        Privilege::PropertyOwner,
        Privilege::Admin,
    ];

    /// Integer level as persisted in the store.
    pub fn level(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            Privilege::Tenant => "Tenant",
            Privilege::PropertyOwner => "Property Owner",
            Privilege::Admin => "Admin",
        }
    }
}

impl TryFrom<i64> for Privilege {
    type Error = AuthError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Privilege::Tenant),
            2 => Ok(Privilege::PropertyOwner),
            3 => Ok(Privilege::Admin),
            other => Err(AuthError::InvalidTier(other)),
        }
    }
}

impl From<Privilege> for i64 {
    fn from(privilege: Privilege) -> Self {
        privilege.level()
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name for a raw stored level. Levels outside the known tiers
/// come from hand-edited or legacy stores and render as "Unknown".
pub fn tier_name(level: i64) -> &'static str {
    Privilege::try_from(level)
        .map(Privilege::name)
        .unwrap_or("Unknown")
}
