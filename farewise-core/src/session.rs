use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::currency::DisplayCurrency;
use crate::CoreError;

/// Which dashboard a visitor is looking at
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Company,
    Admin,
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "company" => Ok(Role::Company),
            "admin" => Ok(Role::Admin),
            other => Err(CoreError::ValidationError(format!("unknown role '{}'", other))),
        }
    }
}

/// View context handed to role-gated rendering.
///
/// Carries no credentials; it only selects what a view shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SessionContext {
    pub role: Role,
    pub currency: DisplayCurrency,
}

impl SessionContext {
    pub fn new(role: Role, currency: DisplayCurrency) -> Self {
        Self { role, currency }
    }

    pub fn can_manage_fares(&self) -> bool {
        matches!(self.role, Role::Company | Role::Admin)
    }

    pub fn can_moderate_reports(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_gates() {
        let user = SessionContext::default();
        assert!(!user.can_manage_fares());
        assert!(!user.can_moderate_reports());

        let company = SessionContext::new(Role::Company, DisplayCurrency::Ngn);
        assert!(company.can_manage_fares());
        assert!(!company.can_moderate_reports());

        let admin = SessionContext::new("ADMIN".parse().unwrap(), DisplayCurrency::Usd);
        assert!(admin.can_manage_fares());
        assert!(admin.can_moderate_reports());
    }
}
