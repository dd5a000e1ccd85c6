use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewSchool, School};
use crate::database::query::{FacetCount, Facets, SchoolQuery};
use crate::database::store::SchoolStore;

/// Process-local store used by tests and `SCHOOL_STORE=memory`
#[derive(Debug, Clone, Default)]
pub struct MemorySchoolStore {
    rows: Arc<RwLock<Vec<School>>>,
}

impl MemorySchoolStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SchoolStore for MemorySchoolStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn insert(&self, school: NewSchool) -> Result<School, DatabaseError> {
        let mut rows = self.rows.write().await;
        // Rows are append-only, so the last id is always the highest
        let id = rows.last().map(|row| row.id + 1).unwrap_or(1);
        let school = school.into_school(id);
        rows.push(school.clone());
        Ok(school)
    }

    async fn list(&self) -> Result<Vec<School>, DatabaseError> {
        Ok(self.rows.read().await.clone())
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        Ok(self.rows.read().await.len() as i64)
    }

    async fn search(&self, query: &SchoolQuery) -> Result<Vec<School>, DatabaseError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|row| query.matches(row)).cloned().collect())
    }

    async fn facets(&self) -> Result<Facets, DatabaseError> {
        let rows = self.rows.read().await;
        let mut states: BTreeMap<&str, i64> = BTreeMap::new();
        let mut cities: BTreeMap<&str, i64> = BTreeMap::new();
        for row in rows.iter() {
            *states.entry(row.state.as_str()).or_default() += 1;
            *cities.entry(row.city.as_str()).or_default() += 1;
        }
        Ok(Facets {
            states: into_counts(states),
            cities: into_counts(cities),
        })
    }
}

fn into_counts(counts: BTreeMap<&str, i64>) -> Vec<FacetCount> {
    counts
        .into_iter()
        .map(|(value, count)| FacetCount { value: value.to_string(), count })
        .collect()
}
