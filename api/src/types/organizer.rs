use super::OrganizerId;
use serde::{Deserialize, Serialize};

/// Public organizer profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organizer {
    /// Identifier
    pub id: OrganizerId,
    /// Organization name
    pub name: String,
    /// About text
    pub description: Option<String>,
    /// Contact address
    pub contact_email: Option<String>,
    /// Logo URL
    pub logo_url: Option<String>,
    /// Vetted by the platform
    #[serde(default, alias = "isVerified")]
    pub verified: bool,
}
