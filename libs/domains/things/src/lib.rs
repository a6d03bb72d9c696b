//! Things Domain
//!
//! A single REST resource ("things") stored in MongoDB: create, list, read,
//! partial update and delete, with input sanitisation on every write.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, body extraction, response envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, existence checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + MongoDB and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs, sanitisation
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_things::{handlers, MongoThingRepository, ThingService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = mongodb::Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoThingRepository::new(client.database("shop"));
//! let router = handlers::router(ThingService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod sanitize;
pub mod service;

pub use error::{ThingError, ThingResult};
pub use handlers::ApiDoc;
pub use models::{CreateThing, Thing, UpdateThing};
pub use mongodb::MongoThingRepository;
pub use repository::{InMemoryThingRepository, ThingRepository};
pub use service::ThingService;
