use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ContactResult;
use crate::models::{Contact, ContactFilter, ContactStatus, CreateContact};

/// Repository trait for Contact persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Create a new contact message
    async fn create(&self, input: CreateContact) -> ContactResult<Contact>;

    /// Get a contact message by ID
    async fn get_by_id(&self, id: Uuid) -> ContactResult<Option<Contact>>;

    /// List contact messages with optional filters, newest first
    async fn list(&self, filter: ContactFilter) -> ContactResult<Vec<Contact>>;

    /// Update a contact message's status
    async fn update_status(&self, id: Uuid, status: ContactStatus) -> ContactResult<Contact>;

    /// Count contact messages matching a filter
    async fn count(&self, filter: ContactFilter) -> ContactResult<u64>;
}
