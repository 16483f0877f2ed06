use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Contact message status, driven by the admin inbox
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
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Archived,
}

/// Contact entity - represents a contact-form message stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Sender phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Message subject
    pub subject: String,
    /// Message body
    pub message: String,
    /// Current status
    pub status: ContactStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for submitting a contact message
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContact {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

/// DTO for updating a contact message's status
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateContactStatus {
    pub status: ContactStatus,
}

/// Query filters for listing contact messages
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ContactFilter {
    /// Filter by status
    pub status: Option<ContactStatus>,
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for ContactFilter {
    fn default() -> Self {
        Self {
            status: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// One page of contact messages with pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactPage {
    /// Total number of messages matching the filter
    pub total: u64,
    /// Current page number (1-based)
    pub page: u64,
    /// Page size
    pub limit: i64,
    /// Total number of pages
    pub total_pages: u64,
    /// Messages on this page
    pub data: Vec<Contact>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> i64 {
    10
}

impl Contact {
    /// Create a new contact message from a CreateContact DTO
    pub fn new(input: CreateContact) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            subject: input.subject,
            message: input.message,
            status: ContactStatus::New,
            created_at: now,
            updated_at: now,
        }
    }
}
