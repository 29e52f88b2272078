use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Technician,
    Customer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Technician => "TECHNICIAN",
            UserRole::Customer => "CUSTOMER",
        }
    }

    /// Customers only ever see their own organization's tickets.
    pub fn requires_org_scope(&self) -> bool {
        matches!(self, UserRole::Customer)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "TECHNICIAN" | "TECH" => Ok(UserRole::Technician),
            "CUSTOMER" => Ok(UserRole::Customer),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    pub id: String,
    pub name: String,
}

impl Technician {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// First letters of the first two words, or the first two characters
    /// of the name when it has fewer than two words.
    pub fn initials(&self) -> String {
        let mut words = self.name.split_whitespace();
        match (words.next(), words.next()) {
            (Some(first), Some(second)) => first
                .chars()
                .take(1)
                .chain(second.chars().take(1))
                .collect(),
            _ => self.name.chars().take(2).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_from_two_words() {
        assert_eq!(Technician::new("t1", "Dana Levi").initials(), "DL");
    }

    #[test]
    fn test_initials_ignore_extra_words_and_spacing() {
        assert_eq!(Technician::new("t1", "  Mary  Ann Smith ").initials(), "MA");
    }

    #[test]
    fn test_initials_single_word_falls_back_to_two_chars() {
        assert_eq!(Technician::new("t1", "Alice").initials(), "Al");
    }

    #[test]
    fn test_initials_non_ascii() {
        assert_eq!(Technician::new("t1", "דנה כהן").initials(), "דכ");
    }

    #[test]
    fn test_initials_empty_name() {
        assert_eq!(Technician::new("t1", "").initials(), "");
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("customer".parse::<UserRole>(), Ok(UserRole::Customer));
        assert_eq!("TECH".parse::<UserRole>(), Ok(UserRole::Technician));
        assert!("guest".parse::<UserRole>().is_err());
    }
}
