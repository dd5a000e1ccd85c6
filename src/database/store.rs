use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewSchool, School};
use crate::database::query::{Facets, SchoolQuery};

/// Persistence seam for school records.
///
/// Implementations must assign a fresh, never reused `id` on insert and
/// return listings in ascending `id` order.
#[async_trait]
pub trait SchoolStore: Send + Sync {
    /// Short backend name for logs and the health endpoint
    fn backend(&self) -> &'static str;

    /// Create backing storage if it does not exist yet
    async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn insert(&self, school: NewSchool) -> Result<School, DatabaseError>;

    async fn list(&self) -> Result<Vec<School>, DatabaseError>;

    async fn count(&self) -> Result<i64, DatabaseError>;

    async fn search(&self, query: &SchoolQuery) -> Result<Vec<School>, DatabaseError>;

    /// Distinct states and cities with row counts, sorted by value
    async fn facets(&self) -> Result<Facets, DatabaseError>;
}
