//! Identity and authorization level derived from token claims.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::auth::TokenClaims;

/// Role assumed when the token carries none.
pub const DEFAULT_ROLE: &str = "Employee";
pub const HR_ROLE: &str = "HR";

/// Label used when there is no identity to format.
pub const UNKNOWN_USER: &str = "Unknown User";

/// Read-only view of the signed-in user, recomputed from the token on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    pub user_id: String,
    pub role: String,
    pub name: String,
    pub department: String,
    pub is_hr: bool,
    pub is_employee: bool,
}

impl UserIdentity {
    pub fn from_claims(claims: &TokenClaims) -> Self {
        let role = claims
            .role
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());
        Self {
            user_id: claims.sub.clone().unwrap_or_default(),
            is_hr: role == HR_ROLE,
            is_employee: role == DEFAULT_ROLE,
            role,
            name: claims.name.clone().unwrap_or_default(),
            department: claims.department.clone().unwrap_or_default(),
        }
    }
}

/// Local UI gating level: `None < Employee < Hr`.
///
/// Never a substitute for server-side enforcement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AuthLevel {
    #[default]
    None,
    Employee,
    Hr,
}

impl AuthLevel {
    /// Level for an identity. Any role other than `"HR"` counts as employee.
    pub fn for_identity(identity: Option<&UserIdentity>) -> Self {
        match identity {
            None => AuthLevel::None,
            Some(user) if user.is_hr => AuthLevel::Hr,
            Some(_) => AuthLevel::Employee,
        }
    }

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AuthLevel::None => "none",
            AuthLevel::Employee => "employee",
            AuthLevel::Hr => "hr",
        }
    }
}

impl fmt::Display for AuthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(AuthLevel::None),
            "employee" => Ok(AuthLevel::Employee),
            "hr" => Ok(AuthLevel::Hr),
            other => Err(format!("unknown authorization level: {other}")),
        }
    }
}

/// Name variants for headers and avatars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedName {
    pub full: String,
    /// Up to two upper-cased initials.
    pub initials: String,
    /// `"<name> (<user_id>)"`.
    pub display: String,
}

pub fn format_user_name(identity: Option<&UserIdentity>) -> FormattedName {
    let Some(user) = identity else {
        return FormattedName {
            full: UNKNOWN_USER.to_string(),
            initials: "?".to_string(),
            display: UNKNOWN_USER.to_string(),
        };
    };

    let initials = user
        .name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();

    FormattedName {
        full: user.name.clone(),
        initials,
        display: format!("{} ({})", user.name, user.user_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str, role: &str) -> UserIdentity {
        UserIdentity::from_claims(&TokenClaims {
            sub: Some("E001".into()),
            role: Some(role.into()),
            name: Some(name.into()),
            department: Some("Engineering".into()),
            exp: Some(0.0),
        })
    }

    #[test]
    fn role_flags_follow_exact_role_string() {
        let hr = identity("Jane Doe", "HR");
        assert!(hr.is_hr && !hr.is_employee);

        let emp = identity("Jane Doe", "Employee");
        assert!(!emp.is_hr && emp.is_employee);

        let other = identity("Jane Doe", "Contractor");
        assert!(!other.is_hr && !other.is_employee);

        let lower = identity("Jane Doe", "hr");
        assert!(!lower.is_hr);
    }

    #[test]
    fn missing_role_defaults_to_employee() {
        let user = UserIdentity::from_claims(&TokenClaims {
            sub: Some("E009".into()),
            ..Default::default()
        });
        assert_eq!(user.role, "Employee");
        assert!(user.is_employee);
        assert_eq!(user.name, "");
    }

    #[test]
    fn levels_are_totally_ordered() {
        assert!(AuthLevel::None < AuthLevel::Employee);
        assert!(AuthLevel::Employee < AuthLevel::Hr);
        assert_eq!(AuthLevel::None.rank(), 0);
        assert_eq!(AuthLevel::Employee.rank(), 1);
        assert_eq!(AuthLevel::Hr.rank(), 2);
    }

    #[test]
    fn unknown_role_collapses_to_employee_level() {
        let other = identity("Sam", "Contractor");
        assert_eq!(AuthLevel::for_identity(Some(&other)), AuthLevel::Employee);
        assert_eq!(AuthLevel::for_identity(None), AuthLevel::None);
        assert_eq!(
            AuthLevel::for_identity(Some(&identity("Sam", "HR"))),
            AuthLevel::Hr
        );
    }

    #[test]
    fn level_parses_and_prints() {
        assert_eq!("HR".parse::<AuthLevel>().unwrap(), AuthLevel::Hr);
        assert_eq!("employee".parse::<AuthLevel>().unwrap(), AuthLevel::Employee);
        assert!("admin".parse::<AuthLevel>().is_err());
        assert_eq!(AuthLevel::None.to_string(), "none");
    }

    #[test]
    fn initials_from_two_words() {
        let name = format_user_name(Some(&identity("Jane Doe", "HR")));
        assert_eq!(name.initials, "JD");
        assert_eq!(name.full, "Jane Doe");
        assert_eq!(name.display, "Jane Doe (E001)");
    }

    #[test]
    fn initials_from_single_word_and_long_names() {
        assert_eq!(format_user_name(Some(&identity("Cher", "HR"))).initials, "C");
        assert_eq!(
            format_user_name(Some(&identity("mary ann van dyke", "HR"))).initials,
            "MA"
        );
        assert_eq!(
            format_user_name(Some(&identity("  ravi   kumar ", "HR"))).initials,
            "RK"
        );
    }

    #[test]
    fn absent_identity_formats_to_placeholder() {
        let name = format_user_name(None);
        assert_eq!(name.display, UNKNOWN_USER);
        assert_eq!(name.full, UNKNOWN_USER);
        assert_eq!(name.initials, "?");
    }
}
