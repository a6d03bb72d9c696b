//! MongoDB implementation of ThingRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
    options::FindOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ThingError, ThingResult};
use crate::models::Thing;
use crate::repository::{ThingRepository, touch};

/// Default collection name
pub const THINGS_COLLECTION: &str = "things";

/// MongoDB-backed [`ThingRepository`]
pub struct MongoThingRepository {
    collection: Collection<Thing>,
}

impl MongoThingRepository {
    /// Repository over the `things` collection of `db`.
    ///
    /// # Example
    /// ```ignore
    /// let client = database::mongodb::connect("mongodb://localhost:27017").await?;
    /// let repo = MongoThingRepository::new(client.database("shop"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, THINGS_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Thing>(collection_name);
        Self { collection }
    }

    pub fn collection(&self) -> &Collection<Thing> {
        &self.collection
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": id.to_string() }
    }

    fn list_options() -> FindOptions {
        FindOptions::builder().projection(doc! { "__v": 0 }).build()
    }
}

#[async_trait]
impl ThingRepository for MongoThingRepository {
    #[instrument(skip(self, thing), fields(thing_id = %thing.id))]
    async fn create(&self, thing: Thing) -> ThingResult<Thing> {
        self.collection.insert_one(&thing).await?;

        tracing::info!(thing_id = %thing.id, "Thing created");
        Ok(thing)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ThingResult<Vec<Thing>> {
        let cursor = self
            .collection
            .find(doc! {})
            .with_options(Self::list_options())
            .await?;
        let things: Vec<Thing> = cursor.try_collect().await?;

        Ok(things)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ThingResult<Option<Thing>> {
        let thing = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(thing)
    }

    #[instrument(skip(self, thing), fields(thing_id = %thing.id))]
    async fn save(&self, mut thing: Thing) -> ThingResult<Thing> {
        touch(&mut thing);

        let result = self
            .collection
            .replace_one(Self::id_filter(thing.id), &thing)
            .await?;

        if result.matched_count == 0 {
            return Err(ThingError::NotFound(thing.id));
        }

        tracing::info!(thing_id = %thing.id, version = ?thing.version, "Thing saved");
        Ok(thing)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ThingResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count > 0 {
            tracing::info!(thing_id = %id, "Thing deleted");
        }
        Ok(result.deleted_count > 0)
    }
}
