use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use tradewise_core::opportunities::{MarketFlowRecord, TradeFlowRepositoryTrait};
use tradewise_core::Result;

use super::model::{NewTradeFlowDB, TradeFlowDB};
use crate::db::{get_connection, run_blocking, DbPool};
use crate::errors::{IntoCore, StorageError};
use crate::schema::trade_flows;

#[derive(Clone)]
pub struct TradeFlowRepository {
    pool: Arc<DbPool>,
}

impl TradeFlowRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        TradeFlowRepository { pool }
    }

    pub fn load_flows_by_prefix_impl(&self, prefix: &str) -> Result<Vec<MarketFlowRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = trade_flows::table
            .filter(trade_flows::commodity_code.like(format!("{}%", prefix)))
            .order((trade_flows::destination.asc(), trade_flows::year.asc()))
            .select(TradeFlowDB::as_select())
            .load::<TradeFlowDB>(&mut conn)
            .map_err(StorageError::from)?;
        debug!("Loaded {} trade flow row(s) for prefix {}", rows.len(), prefix);
        Ok(rows.into_iter().map(MarketFlowRecord::from).collect())
    }

    /// Stores flow records, each under a fresh id.
    pub fn insert_flows(&self, records: Vec<MarketFlowRecord>) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<NewTradeFlowDB> = records.into_iter().map(NewTradeFlowDB::from).collect();
        diesel::insert_into(trade_flows::table)
            .values(&rows)
            .execute(&mut conn)
            .into_core()
    }
}

#[async_trait]
impl TradeFlowRepositoryTrait for TradeFlowRepository {
    async fn find_flows_by_prefix(&self, prefix: &str) -> Result<Vec<MarketFlowRecord>> {
        let repo = self.clone();
        let prefix = prefix.to_string();
        run_blocking("trade_flows", move || repo.load_flows_by_prefix_impl(&prefix)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn flow(origin: &str, destination: &str, code: &str, volume: f64) -> MarketFlowRecord {
        MarketFlowRecord {
            origin: origin.to_string(),
            destination: destination.to_string(),
            commodity_code: code.to_string(),
            year: 2023,
            volume,
            value: volume * 200.0,
        }
    }

    #[tokio::test]
    async fn test_find_flows_by_prefix() {
        let (_dir, pool) = test_pool();
        let repo = TradeFlowRepository::new(pool);
        repo.insert_flows(vec![
            flow("AR", "BR", "100199", 10.0),
            flow("AR", "CL", "1001", 20.0),
            flow("AR", "CL", "1005", 30.0),
            flow("US", "CN", "0201", 40.0),
        ])
        .unwrap();

        let found = repo.find_flows_by_prefix("1001").await.unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|f| f.commodity_code.starts_with("1001")));
        assert_eq!(found[0].destination, "BR");
    }

    #[tokio::test]
    async fn test_inserted_country_codes_are_normalized() {
        let (_dir, pool) = test_pool();
        let repo = TradeFlowRepository::new(pool);
        repo.insert_flows(vec![flow(" ar", "br ", "1001", 1.0)]).unwrap();

        let found = repo.find_flows_by_prefix("1001").await.unwrap();

        assert_eq!(found[0].origin, "AR");
        assert_eq!(found[0].destination, "BR");
    }

    #[tokio::test]
    async fn test_unknown_prefix_returns_empty() {
        let (_dir, pool) = test_pool();
        let repo = TradeFlowRepository::new(pool);

        assert!(repo.find_flows_by_prefix("9999").await.unwrap().is_empty());
    }
}
