//! Contact Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ContactError, ContactResult};
use crate::models::{Contact, ContactFilter, ContactPage, ContactStatus, CreateContact};
use crate::repository::ContactRepository;

/// Contact service providing business logic operations
pub struct ContactService<R: ContactRepository> {
    repository: Arc<R>,
}

impl<R: ContactRepository> ContactService<R> {
    /// Create a new ContactService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Submit a new contact message
    #[instrument(skip(self, input), fields(subject = %input.subject))]
    pub async fn create_contact(&self, input: CreateContact) -> ContactResult<Contact> {
        // Validate input
        input
            .validate()
            .map_err(|e| ContactError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a contact message by ID
    #[instrument(skip(self))]
    pub async fn get_contact(&self, id: Uuid) -> ContactResult<Contact> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ContactError::NotFound(id))
    }

    /// List contact messages with optional filters, returning one page with totals
    #[instrument(skip(self))]
    pub async fn list_contacts(&self, filter: ContactFilter) -> ContactResult<ContactPage> {
        let page = filter.page.max(1);
        let limit = filter.limit;

        let data = self.repository.list(filter.clone()).await?;
        let total = self.repository.count(filter).await?;
        let total_pages = if limit > 0 {
            total.div_ceil(limit as u64)
        } else {
            0
        };

        Ok(ContactPage {
            total,
            page,
            limit,
            total_pages,
            data,
        })
    }

    /// Update a contact message's status
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: Uuid, status: ContactStatus) -> ContactResult<Contact> {
        self.repository.update_status(id, status).await
    }

    /// Count contact messages matching a filter
    #[instrument(skip(self))]
    pub async fn count_contacts(&self, filter: ContactFilter) -> ContactResult<u64> {
        self.repository.count(filter).await
    }
}

impl<R: ContactRepository> Clone for ContactService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
