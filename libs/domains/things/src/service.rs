//! Thing Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ThingError, ThingResult};
use crate::models::{CreateThing, Thing, UpdateThing};
use crate::repository::ThingRepository;

/// Validation, sanitisation and existence checks in front of a [`ThingRepository`].
pub struct ThingService<R: ThingRepository> {
    repository: Arc<R>,
}

impl<R: ThingRepository> ThingService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate, sanitise and persist a new thing
    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    pub async fn create_thing(&self, input: CreateThing) -> ThingResult<Thing> {
        input.validate()?;

        let thing = Thing::new(input)?;
        self.repository.create(thing).await
    }

    #[instrument(skip(self))]
    pub async fn list_things(&self) -> ThingResult<Vec<Thing>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_thing(&self, id: Uuid) -> ThingResult<Thing> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ThingError::NotFound(id))
    }

    /// Apply a partial update to an existing thing
    #[instrument(skip(self, input))]
    pub async fn update_thing(&self, id: Uuid, input: UpdateThing) -> ThingResult<Thing> {
        input.validate()?;

        let mut thing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ThingError::NotFound(id))?;

        thing.apply_update(input)?;
        self.repository.save(thing).await
    }

    #[instrument(skip(self))]
    pub async fn delete_thing(&self, id: Uuid) -> ThingResult<()> {
        if self.repository.get_by_id(id).await?.is_none() {
            return Err(ThingError::NotFound(id));
        }

        if !self.repository.delete(id).await? {
            return Err(ThingError::NotFound(id));
        }
        Ok(())
    }
}

impl<R: ThingRepository> Clone for ThingService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
