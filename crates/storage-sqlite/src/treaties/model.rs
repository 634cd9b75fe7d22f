//! Database models for treaty destinations.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tradewise_core::opportunities::TreatyDestinationRecord;
use uuid::Uuid;

use crate::errors::StorageError;

/// Database model for treaty destinations
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::treaty_destinations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TreatyDestinationDB {
    pub id: String,
    pub origin: String,
    pub destination: String,
    /// JSON array of agreement names
    pub agreements: String,
}

/// Database model for inserting a treaty destination
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::treaty_destinations)]
#[serde(rename_all = "camelCase")]
pub struct NewTreatyDestinationDB {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub agreements: String,
}

impl TryFrom<TreatyDestinationDB> for TreatyDestinationRecord {
    type Error = StorageError;

    fn try_from(db: TreatyDestinationDB) -> Result<Self, Self::Error> {
        // Blank columns are treated as "no agreements"
        let agreements = if db.agreements.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&db.agreements).map_err(|e| StorageError::MalformedRow {
                table: "treaty_destinations",
                message: format!("row {}: {}", db.id, e),
            })?
        };
        Ok(Self {
            origin: db.origin,
            destination: db.destination,
            agreements,
        })
    }
}

impl TryFrom<TreatyDestinationRecord> for NewTreatyDestinationDB {
    type Error = StorageError;

    fn try_from(record: TreatyDestinationRecord) -> Result<Self, Self::Error> {
        let agreements =
            serde_json::to_string(&record.agreements).map_err(|e| StorageError::MalformedRow {
                table: "treaty_destinations",
                message: e.to_string(),
            })?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            origin: record.origin.trim().to_ascii_uppercase(),
            destination: record.destination.trim().to_ascii_uppercase(),
            agreements,
        })
    }
}
