//! In-process cache over the department catalog.
//!
//! The catalog feeds the `department_id` existence check during submission,
//! so it is read on every submit; a short-lived moka cache keeps that off
//! the database.

use moka::future::Cache;
use sea_orm::{DatabaseConnection, DbErr};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::db::departments as department_db;

const INDEX_KEY: &str = "departments";

/// A point-in-time set of known department ids.
#[derive(Debug, Clone, Default)]
pub struct DepartmentIndex {
    ids: HashSet<Uuid>,
}

impl DepartmentIndex {
    pub fn from_ids(ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[derive(Clone)]
pub struct DepartmentCatalog {
    cache: Arc<Cache<&'static str, Arc<DepartmentIndex>>>,
}

impl DepartmentCatalog {
    pub fn new(ttl: Duration) -> Self {
        let cache = Arc::new(
            Cache::builder()
                .time_to_live(ttl)
                .max_capacity(1)
                .build(),
        );
        Self { cache }
    }

    /// The current department index, loaded from the database on miss.
    pub async fn index(&self, db: &DatabaseConnection) -> Result<Arc<DepartmentIndex>, DbErr> {
        if let Some(cached) = self.cache.get(INDEX_KEY).await {
            return Ok(cached);
        }

        let departments = department_db::get_all_departments(db).await?;
        let index = Arc::new(DepartmentIndex::from_ids(
            departments.into_iter().map(|d| d.id),
        ));
        tracing::debug!("Loaded {} departments into the catalog index", index.len());
        self.cache.insert(INDEX_KEY, index.clone()).await;
        Ok(index)
    }

    /// Drop the cached index after the catalog changes.
    pub async fn invalidate(&self) {
        self.cache.invalidate(INDEX_KEY).await;
    }
}
