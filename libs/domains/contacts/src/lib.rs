//! Contacts Domain
//!
//! Contact-form messages sent to the site operators, with an admin inbox
//! workflow (new → read → archived).
//!
//! Follows the same layering as the listings domain: handlers → service →
//! repository (trait + MongoDB implementation) → models.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ContactError, ContactResult};
pub use handlers::ApiDoc;
pub use models::{
    Contact, ContactFilter, ContactPage, ContactStatus, CreateContact, UpdateContactStatus,
};
pub use mongodb::MongoContactRepository;
pub use repository::ContactRepository;
pub use service::ContactService;
