use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ThingError, ThingResult};
use crate::models::Thing;

/// Persistence for things.
///
/// Implementations own the storage metadata: `save` stamps `updatedAt` and
/// bumps the `__v` counter, and `list` leaves the counter out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThingRepository: Send + Sync {
    /// Insert a new record
    async fn create(&self, thing: Thing) -> ThingResult<Thing>;

    /// All records, without the version counter
    async fn list(&self) -> ThingResult<Vec<Thing>>;

    async fn get_by_id(&self, id: Uuid) -> ThingResult<Option<Thing>>;

    /// Replace an existing record; `NotFound` if it no longer exists
    async fn save(&self, thing: Thing) -> ThingResult<Thing>;

    /// Remove a record, returning whether one was removed
    async fn delete(&self, id: Uuid) -> ThingResult<bool>;
}

/// Stamp a record for the next save.
pub(crate) fn touch(thing: &mut Thing) {
    thing.updated_at = Utc::now();
    thing.version = Some(thing.version.unwrap_or(0) + 1);
}

/// In-memory implementation for tests and database-less runs.
#[derive(Default)]
pub struct InMemoryThingRepository {
    things: RwLock<HashMap<Uuid, Thing>>,
}

impl InMemoryThingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThingRepository for InMemoryThingRepository {
    #[instrument(skip(self, thing), fields(thing_id = %thing.id))]
    async fn create(&self, thing: Thing) -> ThingResult<Thing> {
        let mut things = self.things.write().await;
        things.insert(thing.id, thing.clone());
        tracing::info!(thing_id = %thing.id, "Thing created");
        Ok(thing)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ThingResult<Vec<Thing>> {
        let things = self.things.read().await;
        Ok(things
            .values()
            .cloned()
            .map(|mut thing| {
                thing.version = None;
                thing
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ThingResult<Option<Thing>> {
        let things = self.things.read().await;
        Ok(things.get(&id).cloned())
    }

    #[instrument(skip(self, thing), fields(thing_id = %thing.id))]
    async fn save(&self, mut thing: Thing) -> ThingResult<Thing> {
        let mut things = self.things.write().await;
        let stored = things
            .get_mut(&thing.id)
            .ok_or(ThingError::NotFound(thing.id))?;

        touch(&mut thing);
        *stored = thing.clone();
        tracing::info!(thing_id = %thing.id, version = ?thing.version, "Thing saved");
        Ok(thing)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ThingResult<bool> {
        let mut things = self.things.write().await;
        let removed = things.remove(&id).is_some();
        if removed {
            tracing::info!(thing_id = %id, "Thing deleted");
        }
        Ok(removed)
    }
}
