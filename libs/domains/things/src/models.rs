use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ThingError, ThingResult};
use crate::sanitize::{
    escape, optional_scalar_text, optional_trimmed_text, parse_price, scalar_text, trimmed_text,
    validate_price, validate_title, validate_user_id,
};

/// Keys a client can never overwrite through an update.
pub const PROTECTED_FIELDS: [&str; 4] = ["_id", "__v", "createdAt", "updatedAt"];

/// Thing entity, stored in the `things` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Thing {
    /// Unique identifier (stored as `_id`)
    #[serde(rename = "_id", with = "id_string")]
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub user_id: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Save counter; left out of list responses
    #[serde(rename = "__v", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    /// Fields written by updates that are not part of the model
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// DTO for creating a thing.
///
/// Every field is read as text, whatever its JSON type, and all but `price`
/// are trimmed; a missing field reads as empty and fails validation where
/// emptiness is not allowed.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateThing {
    #[serde(default, deserialize_with = "trimmed_text")]
    #[validate(custom(function = "validate_title"))]
    #[schema(example = "Desk lamp")]
    pub title: String,
    #[serde(default, deserialize_with = "trimmed_text")]
    pub description: String,
    #[serde(default, deserialize_with = "trimmed_text")]
    pub image_url: String,
    #[serde(rename = "userId", default, deserialize_with = "trimmed_text")]
    #[validate(custom(function = "validate_user_id"))]
    #[schema(example = "user42")]
    pub user_id: String,
    #[serde(default, deserialize_with = "scalar_text")]
    #[validate(custom(function = "validate_price"))]
    #[schema(example = "19.99")]
    pub price: String,
}

/// DTO for a partial update.
///
/// Known fields follow the same rules as [`CreateThing`] when present. Any
/// other key is collected into `extra` and written onto the record as-is,
/// except for [`PROTECTED_FIELDS`].
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateThing {
    #[serde(default, deserialize_with = "optional_trimmed_text")]
    #[validate(custom(function = "validate_title"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "optional_trimmed_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_trimmed_text")]
    pub image_url: Option<String>,
    #[serde(rename = "userId", default, deserialize_with = "optional_trimmed_text")]
    #[validate(custom(function = "validate_user_id"))]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_text")]
    #[validate(custom(function = "validate_price"))]
    pub price: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Body of a successful create.
#[derive(Debug, Serialize, ToSchema)]
pub struct ThingCreated {
    #[schema(example = "Object created !")]
    pub message: String,
    pub thing: Thing,
}

/// Body of a successful read.
#[derive(Debug, Serialize, ToSchema)]
pub struct ThingEnvelope {
    pub thing: Thing,
}

/// Body of a successful update.
#[derive(Debug, Serialize, ToSchema)]
pub struct ThingUpdated {
    #[schema(example = "Object updated successfully")]
    pub message: String,
    pub thing: Thing,
}

/// Body of a successful delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

fn price_from(raw: &str) -> ThingResult<f64> {
    parse_price(raw).ok_or_else(|| ThingError::InvalidInput(format!("invalid price: {raw}")))
}

impl Thing {
    /// Build a new record from validated input, escaping its text fields.
    pub fn new(input: CreateThing) -> ThingResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::now_v7(),
            price: price_from(&input.price)?,
            title: escape(&input.title),
            description: escape(&input.description),
            image_url: escape(&input.image_url),
            user_id: escape(&input.user_id),
            created_at: now,
            updated_at: now,
            version: Some(0),
            extra: HashMap::new(),
        })
    }

    /// Apply validated update fields. Storage metadata is left alone.
    pub fn apply_update(&mut self, input: UpdateThing) -> ThingResult<()> {
        if let Some(price) = input.price {
            self.price = price_from(&price)?;
        }
        if let Some(title) = input.title {
            self.title = escape(&title);
        }
        if let Some(description) = input.description {
            self.description = escape(&description);
        }
        if let Some(image_url) = input.image_url {
            self.image_url = escape(&image_url);
        }
        if let Some(user_id) = input.user_id {
            self.user_id = escape(&user_id);
        }

        for (key, value) in input.extra {
            if PROTECTED_FIELDS.contains(&key.as_str()) {
                tracing::debug!(field = %key, "Ignoring protected field in update");
                continue;
            }
            self.extra.insert(key, value);
        }
        Ok(())
    }
}

/// Ids are kept as hyphenated strings in storage, so filters built from
/// `Uuid::to_string` match the stored documents.
mod id_string {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(de::Error::custom)
    }
}
