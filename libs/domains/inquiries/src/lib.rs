//! Inquiries Domain
//!
//! Buyer inquiries about a listing: "is this car still available?".
//! Inquiries snapshot the listing title and price at submission time, so
//! they stay meaningful when the listing is edited or removed; a reference
//! to the stored listing is optional (off-catalog listings have none).
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
pub use error::{InquiryError, InquiryResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateInquiry, Inquiry, InquiryFilter, InquiryPage, InquiryStatus, UpdateInquiryStatus,
};
pub use mongodb::MongoInquiryRepository;
pub use repository::{InquiryRepository, ListingDirectory};
pub use service::InquiryService;
