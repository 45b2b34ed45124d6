//! Account-level types consumed by the notification subsystem.
//!
//! The account directory is an external collaborator; the core only needs
//! the role taxonomy, the active flag and the registered channel endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role an account holds in the system (distinct from [`TargetRole`], the
/// capacity a person is notified in for one event)
///
/// [`TargetRole`]: super::notification::TargetRole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountRole {
    User,
    Officer,
    Admin,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::User => "User",
            AccountRole::Officer => "Officer",
            AccountRole::Admin => "Admin",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(AccountRole::User),
            "Officer" => Ok(AccountRole::Officer),
            "Admin" => Ok(AccountRole::Admin),
            other => Err(format!("unknown account role: {}", other)),
        }
    }
}

/// Directory view of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub role: AccountRole,
    pub is_active: bool,
    /// Opaque channel endpoint registered by the person's device, if any
    pub channel_endpoint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [AccountRole::User, AccountRole::Officer, AccountRole::Admin] {
            assert_eq!(role.as_str().parse::<AccountRole>().unwrap(), role);
        }
        assert!("Citizen".parse::<AccountRole>().is_err());
    }
}
