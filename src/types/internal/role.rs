use std::fmt;
use std::str::FromStr;

use poem_openapi::Enum;
use serde::{Deserialize, Serialize};

use crate::errors::InternalError;

/// Application role held in `user_roles`. Exactly one per user.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppRole {
    Admin,
    Staff,
    Guest,
}

impl AppRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppRole::Admin => "admin",
            AppRole::Staff => "staff",
            AppRole::Guest => "guest",
        }
    }

    /// Admin and staff run the back office
    pub fn is_back_office(&self) -> bool {
        matches!(self, AppRole::Admin | AppRole::Staff)
    }
}

impl fmt::Display for AppRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppRole {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(AppRole::Admin),
            "staff" => Ok(AppRole::Staff),
            "guest" => Ok(AppRole::Guest),
            other => Err(InternalError::parse("app_role", format!("unknown role '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_lowercase_names() {
        assert_eq!("admin".parse::<AppRole>().unwrap(), AppRole::Admin);
        assert_eq!("staff".parse::<AppRole>().unwrap(), AppRole::Staff);
        assert_eq!("guest".parse::<AppRole>().unwrap(), AppRole::Guest);
    }

    #[test]
    fn test_role_rejects_unknown_and_mixed_case() {
        assert!("owner".parse::<AppRole>().is_err());
        assert!("Admin".parse::<AppRole>().is_err());
        assert!("".parse::<AppRole>().is_err());
    }

    #[test]
    fn test_role_display_matches_stored_value() {
        for role in [AppRole::Admin, AppRole::Staff, AppRole::Guest] {
            assert_eq!(role.to_string().parse::<AppRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_only_admin_and_staff_are_back_office() {
        assert!(AppRole::Admin.is_back_office());
        assert!(AppRole::Staff.is_back_office());
        assert!(!AppRole::Guest.is_back_office());
    }
}
