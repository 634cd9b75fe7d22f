use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use tradewise_core::opportunities::{TreatyDestinationRecord, TreatyDestinationRepositoryTrait};
use tradewise_core::Result;

use super::model::{NewTreatyDestinationDB, TreatyDestinationDB};
use crate::db::{get_connection, run_blocking, DbPool};
use crate::errors::StorageError;
use crate::schema::treaty_destinations;

#[derive(Clone)]
pub struct TreatyDestinationRepository {
    pool: Arc<DbPool>,
}

impl TreatyDestinationRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        TreatyDestinationRepository { pool }
    }

    pub fn load_treaty_destinations_impl(
        &self,
        origin: Option<&str>,
    ) -> Result<Vec<TreatyDestinationRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = treaty_destinations::table
            .select(TreatyDestinationDB::as_select())
            .order((treaty_destinations::origin.asc(), treaty_destinations::destination.asc()))
            .into_boxed();
        if let Some(origin) = origin {
            let origin = origin.trim().to_ascii_uppercase();
            query = query.filter(treaty_destinations::origin.eq(origin));
        }
        let rows = query
            .load::<TreatyDestinationDB>(&mut conn)
            .map_err(StorageError::from)?;
        debug!("Loaded {} treaty destination row(s)", rows.len());
        rows.into_iter()
            .map(|row| TreatyDestinationRecord::try_from(row).map_err(Into::into))
            .collect()
    }

    pub fn insert_treaty_destinations(
        &self,
        records: Vec<TreatyDestinationRecord>,
    ) -> Result<usize> {
        let rows = records
            .into_iter()
            .map(NewTreatyDestinationDB::try_from)
            .collect::<std::result::Result<Vec<_>, StorageError>>()?;
        let mut conn = get_connection(&self.pool)?;
        let inserted = diesel::insert_into(treaty_destinations::table)
            .values(&rows)
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(inserted)
    }
}

#[async_trait]
impl TreatyDestinationRepositoryTrait for TreatyDestinationRepository {
    async fn find_treaty_destinations(
        &self,
        origin: Option<&str>,
    ) -> Result<Vec<TreatyDestinationRecord>> {
        let repo = self.clone();
        let origin = origin.map(str::to_string);
        run_blocking("treaty_destinations", move || {
            repo.load_treaty_destinations_impl(origin.as_deref())
        })
        .await
    }
}
