use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored event row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub venue_name: String,
    pub address: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub contact_mobile: Option<String>,
    pub contact_email: Option<String>,
    pub contact_instagram: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw request body for creating or replacing an event.
///
/// Required fields default to an empty string when missing or `null` so
/// that validation, not deserialization, reports them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub venue_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub time: String,
    pub contact_mobile: Option<String>,
    pub contact_email: Option<String>,
    pub contact_instagram: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub type CreateEventRequest = EventRequest;
pub type UpdateEventRequest = EventRequest;

/// Validated event fields, ready to be written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInput {
    pub name: String,
    pub description: Option<String>,
    pub venue_name: String,
    pub address: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub contact_mobile: Option<String>,
    pub contact_email: Option<String>,
    pub contact_instagram: Option<String>,
}

impl Event {
    /// Builds a fresh event from validated input, stamping both timestamps
    /// with the same instant.
    pub fn new(input: EventInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            venue_name: input.venue_name,
            address: input.address,
            date: input.date,
            time: input.time,
            contact_mobile: input.contact_mobile,
            contact_email: input.contact_email,
            contact_instagram: input.contact_instagram,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every mutable field. `id` and `created_at` are left alone.
    pub fn apply(&mut self, input: EventInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.description = input.description;
        self.venue_name = input.venue_name;
        self.address = input.address;
        self.date = input.date;
        self.time = input.time;
        self.contact_mobile = input.contact_mobile;
        self.contact_email = input.contact_email;
        self.contact_instagram = input.contact_instagram;
        self.updated_at = now;
    }
}
