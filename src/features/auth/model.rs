use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Caller identity resolved once per request.
///
/// `privileged` is decided by [`PrivilegePolicy`](super::PrivilegePolicy) when the
/// token is validated; downstream code reads the flag and never the role name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub member_id: Uuid,
    pub display_name: String,
    pub role: String,
    pub privileged: bool,
}

/// Claims carried by access tokens from the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Member id (UUID)
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: String,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}
