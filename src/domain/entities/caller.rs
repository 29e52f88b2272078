use crate::domain::entities::UserRole;
use crate::domain::errors::{AnalyticsError, AnalyticsResult};

/// Identity of the user requesting analytics, resolved upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
    pub role: UserRole,
    pub org_id: Option<String>,
}

impl Caller {
    pub fn new(user_id: impl Into<String>, role: UserRole, org_id: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            org_id,
        }
    }

    /// Resolve which tickets this caller may aggregate over.
    pub fn org_scope(&self) -> AnalyticsResult<OrgScope> {
        if !self.role.requires_org_scope() {
            return Ok(OrgScope::All);
        }

        match self.org_id.as_deref() {
            Some(org_id) if !org_id.trim().is_empty() => Ok(OrgScope::Org(org_id.to_string())),
            _ => Err(AnalyticsError::ScopeRequired {
                role: self.role,
                user_id: self.user_id.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgScope {
    /// Internal staff: every organization.
    All,
    Org(String),
}

impl OrgScope {
    pub fn org_id(&self) -> Option<&str> {
        match self {
            OrgScope::All => None,
            OrgScope::Org(id) => Some(id),
        }
    }
}
