use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Inquiry status, driven by the admin inbox
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InquiryStatus {
    /// Not yet looked at
    #[default]
    New,
    /// Seen by an admin
    Read,
    /// Handled and filed away
    Archived,
}

/// Inquiry entity - represents a buyer inquiry stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Inquiry {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Reference to the stored listing, absent for off-catalog listings
    #[serde(default)]
    pub listing_id: Option<Uuid>,
    /// Listing title snapshot at submission time
    pub listing_title: String,
    /// Listing price snapshot in cents
    pub listing_price: i64,
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Sender phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Inquiry message
    pub message: String,
    /// Current status
    pub status: InquiryStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for submitting a new inquiry
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateInquiry {
    /// Stored listing this inquiry refers to, if any
    pub listing_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub listing_title: String,
    /// Listing price snapshot in cents
    #[validate(range(min = 0))]
    pub listing_price: i64,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

/// DTO for updating an inquiry's status
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateInquiryStatus {
    pub status: InquiryStatus,
}

/// Query filters for listing inquiries
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct InquiryFilter {
    /// Filter by status
    pub status: Option<InquiryStatus>,
    /// Filter by referenced listing
    pub listing_id: Option<Uuid>,
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for InquiryFilter {
    fn default() -> Self {
        Self {
            status: None,
            listing_id: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// One page of inquiries with pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InquiryPage {
    /// Total number of inquiries matching the filter
    pub total: u64,
    /// Current page number (1-based)
    pub page: u64,
    /// Page size
    pub limit: i64,
    /// Total number of pages
    pub total_pages: u64,
    /// Inquiries on this page
    pub data: Vec<Inquiry>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> i64 {
    10
}

impl Inquiry {
    /// Create a new inquiry from a CreateInquiry DTO
    pub fn new(input: CreateInquiry) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            listing_id: input.listing_id,
            listing_title: input.listing_title,
            listing_price: input.listing_price,
            name: input.name,
            email: input.email,
            phone: input.phone,
            message: input.message,
            status: InquiryStatus::New,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_inquiry_starts_as_new() {
        let inquiry = Inquiry::new(CreateInquiry {
            listing_id: None,
            listing_title: "Toyota Corolla 2020".to_string(),
            listing_price: 1_550_000,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            message: "Is it still available?".to_string(),
        });

        assert_eq!(inquiry.status, InquiryStatus::New);
        assert!(inquiry.listing_id.is_none());
        assert_eq!(inquiry.created_at, inquiry.updated_at);
    }

    #[test]
    fn test_filter_defaults() {
        let filter = InquiryFilter::default();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 10);
    }
}
