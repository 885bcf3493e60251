use super::{Category, CategoryId, EventId, Location, LocationId, OrganizerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication state of an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Not visible to attendees
    Draft,
    /// On sale
    Published,
    /// Called off
    Cancelled,
    /// Already took place
    Completed,
    /// Status this client does not know
    #[default]
    #[serde(other)]
    Unknown,
}

/// Image attached to an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventImage {
    /// Public URL
    pub url: String,
    /// Whether this is the cover image
    #[serde(default)]
    pub is_primary: bool,
}

/// An event as listed to attendees and organizers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Identifier
    pub id: EventId,
    /// Title
    pub title: String,
    /// Long description
    pub description: Option<String>,
    /// When doors open
    pub start_time: DateTime<Utc>,
    /// When it ends
    pub end_time: Option<DateTime<Utc>>,
    /// Venue name
    pub venue: Option<String>,
    /// City-level location
    pub location: Option<Location>,
    /// Category
    pub category: Option<Category>,
    /// Organizer running the event
    pub organizer_id: Option<OrganizerId>,
    /// Publication state
    #[serde(default)]
    pub status: EventStatus,
    /// Shown on the featured carousel
    #[serde(default, rename = "isFeatured")]
    pub featured: bool,
    /// Images, cover first when the server sorts them
    #[serde(default)]
    pub images: Vec<EventImage>,
    /// Cheapest ticket price
    pub min_price: Option<f64>,
}

impl Event {
    /// The cover image, or the first one when none is marked primary
    #[must_use]
    pub fn primary_image(&self) -> Option<&EventImage> {
        self.images
            .iter()
            .find(|i| i.is_primary)
            .or_else(|| self.images.first())
    }
}

/// Body for creating or updating an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    /// Title
    pub title: String,
    /// Long description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Start time
    pub start_time: DateTime<Utc>,
    /// End time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Venue name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    /// Category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

/// Query for the event list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Free-text search
    pub search: Option<String>,
    /// Only this category
    pub category_id: Option<CategoryId>,
    /// Only this location
    pub location_id: Option<LocationId>,
    /// Zero-based page
    pub page: Option<u32>,
    /// Page size
    pub size: Option<u32>,
}

impl EventFilter {
    /// Query parameters for the set fields, in a stable order
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("search".to_string(), search.to_string()));
        }
        if let Some(category) = &self.category_id {
            query.push(("categoryId".to_string(), category.to_string()));
        }
        if let Some(location) = &self.location_id {
            query.push(("locationId".to_string(), location.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            query.push(("size".to_string(), size.to_string()));
        }
        query
    }
}

/// Image file to upload
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name sent with the part
    pub file_name: String,
    /// MIME type
    pub content_type: String,
    /// Raw bytes
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_event_with_unknown_status() {
        let event: Result<Event, _> = serde_json::from_value(json!({
            "id": "e1",
            "title": "Jazz Night",
            "startTime": "2026-03-01T19:00:00Z",
            "status": "POSTPONED",
            "isFeatured": true,
            "images": [
                { "url": "https://cdn/a.png" },
                { "url": "https://cdn/b.png", "isPrimary": true }
            ]
        }));

        let event = event.ok();
        assert!(event.is_some());
        if let Some(event) = event {
            assert_eq!(event.status, EventStatus::Unknown);
            assert!(event.featured);
            assert_eq!(
                event.primary_image().map(|i| i.url.as_str()),
                Some("https://cdn/b.png")
            );
            assert_eq!(event.min_price, None);
        }
    }

    #[test]
    fn filter_skips_unset_and_blank_fields() {
        let filter = EventFilter {
            search: Some("  ".to_string()),
            category_id: Some(CategoryId::new("music")),
            page: Some(0),
            ..EventFilter::default()
        };

        assert_eq!(
            filter.to_query(),
            vec![
                ("categoryId".to_string(), "music".to_string()),
                ("page".to_string(), "0".to_string()),
            ]
        );
    }
}
