//! Custom extractors for Axum handlers.

pub mod form_fields;
pub mod uuid_path;

pub use form_fields::FormFields;
pub use uuid_path::UuidPath;
