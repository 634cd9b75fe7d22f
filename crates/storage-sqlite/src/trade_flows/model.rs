//! Database models for trade flows.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tradewise_core::opportunities::MarketFlowRecord;
use uuid::Uuid;

/// Database model for trade flows
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::trade_flows)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TradeFlowDB {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub commodity_code: String,
    pub year: i32,
    pub volume: f64,
    pub value: f64,
}

/// Database model for inserting a trade flow
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::trade_flows)]
#[serde(rename_all = "camelCase")]
pub struct NewTradeFlowDB {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub commodity_code: String,
    pub year: i32,
    pub volume: f64,
    pub value: f64,
}

impl From<TradeFlowDB> for MarketFlowRecord {
    fn from(db: TradeFlowDB) -> Self {
        Self {
            origin: db.origin,
            destination: db.destination,
            commodity_code: db.commodity_code,
            year: db.year,
            volume: db.volume,
            value: db.value,
        }
    }
}

impl From<MarketFlowRecord> for NewTradeFlowDB {
    fn from(record: MarketFlowRecord) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            origin: record.origin.trim().to_ascii_uppercase(),
            destination: record.destination.trim().to_ascii_uppercase(),
            commodity_code: record.commodity_code.trim().to_string(),
            year: record.year,
            volume: record.volume,
            value: record.value,
        }
    }
}
