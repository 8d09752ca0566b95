use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::auth::model::AuthenticatedUser;

/// Name and role of a member as last asserted by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

impl From<&AuthenticatedUser> for MemberSnapshot {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.member_id,
            name: user.display_name.clone(),
            role: user.role.clone(),
        }
    }
}

/// A member expected to report, with the delivery time of their report if any
#[derive(Debug, Clone, FromRow)]
pub struct MemberSubmission {
    pub member_id: Uuid,
    pub member_name: String,
    pub whatsapp: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
}
