//! User-facing fallback messages, used when the server sends none

/// Event list
pub const EVENTS_FAILED: &str = "Failed to load events";
/// Featured carousel
pub const FEATURED_FAILED: &str = "Failed to load featured events";
/// Event detail
pub const EVENT_FAILED: &str = "Failed to load event details";
/// Event create/update
pub const EVENT_SAVE_FAILED: &str = "Failed to save event";
/// Event delete
pub const EVENT_DELETE_FAILED: &str = "Failed to delete event";
/// Image upload
pub const IMAGE_UPLOAD_FAILED: &str = "Failed to upload image";
/// Featured toggle
pub const FEATURE_TOGGLE_FAILED: &str = "Failed to update featured status";

/// Ticket types of an event
pub const TICKET_TYPES_FAILED: &str = "Failed to load ticket types";
/// Ticket type create/update
pub const TICKET_TYPE_SAVE_FAILED: &str = "Failed to save ticket type";
/// Ticket type delete
pub const TICKET_TYPE_DELETE_FAILED: &str = "Failed to delete ticket type";

/// My tickets
pub const TICKETS_FAILED: &str = "No tickets found";
/// Single ticket
pub const TICKET_FAILED: &str = "Failed to load ticket";
/// Attendee list
pub const EVENT_TICKETS_FAILED: &str = "Failed to load attendees";
/// Purchase
pub const PURCHASE_FAILED: &str = "Purchase failed. Please try again.";
/// Check-in call
pub const CHECK_IN_FAILED: &str = "Check-in failed";

/// Categories
pub const CATEGORIES_FAILED: &str = "Failed to load categories";
/// Locations
pub const LOCATIONS_FAILED: &str = "Failed to load locations";

/// Notification list
pub const NOTIFICATIONS_FAILED: &str = "Failed to load notifications";
/// Unread badge
pub const UNREAD_COUNT_FAILED: &str = "Failed to load unread count";
/// Mark read
pub const MARK_READ_FAILED: &str = "Failed to update notification";

/// Organizer profile
pub const ORGANIZER_FAILED: &str = "Failed to load organizer";
/// Organizer's events
pub const ORGANIZER_EVENTS_FAILED: &str = "Failed to load organizer events";

/// Payment start
pub const PAYMENT_INITIATION_FAILED: &str = "Failed to start payment";
/// Payment history
pub const PAYMENTS_FAILED: &str = "Failed to load payments";
/// Single payment
pub const PAYMENT_FAILED_TO_LOAD: &str = "Failed to load payment";
/// Provider declined
pub const PAYMENT_FAILED: &str = "Payment failed. Please try again or use another method.";
/// Attendee abandoned
pub const PAYMENT_CANCELLED: &str = "Payment was cancelled";
/// Polling exhausted
pub const PAYMENT_UNCONFIRMED: &str =
    "We could not confirm your payment yet. Check My Tickets in a few minutes.";

/// Login
pub const LOGIN_FAILED: &str = "Login failed. Check your email and password.";
/// Registration
pub const REGISTER_FAILED: &str = "Registration failed";
/// Profile
pub const PROFILE_FAILED: &str = "Failed to load profile";
/// Profile update
pub const PROFILE_UPDATE_FAILED: &str = "Failed to update profile";

/// Dashboard totals
pub const DASHBOARD_FAILED: &str = "Failed to load dashboard";
/// Per-event sales
pub const EVENT_SALES_FAILED: &str = "Failed to load event sales";
/// Revenue series
pub const REVENUE_FAILED: &str = "Failed to load revenue";
/// Per-ticket-type sales
pub const TICKET_TYPE_SALES_FAILED: &str = "Failed to load ticket type sales";
