use super::{CategoryId, LocationId};
use serde::{Deserialize, Serialize};

/// Event category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Identifier
    pub id: CategoryId,
    /// Display name
    pub name: String,
    /// Short description
    pub description: Option<String>,
}

/// Place events are held in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Identifier
    pub id: LocationId,
    /// Display name
    pub name: String,
    /// City
    pub city: Option<String>,
    /// Country
    pub country: Option<String>,
}
