use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::database::manager::DatabaseError;
use crate::database::models::{NewSchool, School, SCHOOL_COLUMNS};
use crate::database::query::{FacetCount, Facets, SchoolQuery};
use crate::database::store::SchoolStore;

const CREATE_SCHOOLS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schools (
    id       BIGSERIAL PRIMARY KEY,
    name     TEXT NOT NULL DEFAULT '',
    address  TEXT NOT NULL DEFAULT '',
    city     TEXT NOT NULL DEFAULT '',
    state    TEXT NOT NULL DEFAULT '',
    contact  BIGINT,
    image    TEXT NOT NULL DEFAULT '',
    email_id TEXT NOT NULL DEFAULT ''
)
"#;

/// `SchoolStore` over the `schools` table
#[derive(Debug, Clone)]
pub struct PgSchoolStore {
    pool: PgPool,
}

impl PgSchoolStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn facet(&self, column: &'static str) -> Result<Vec<FacetCount>, DatabaseError> {
        // column is one of two literals, never user input
        let sql = format!(
            "SELECT {column} AS value, COUNT(*) AS count FROM schools GROUP BY {column} ORDER BY {column}"
        );
        let rows = sqlx::query_as::<_, FacetCount>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }
}

#[async_trait]
impl SchoolStore for PgSchoolStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_SCHOOLS_TABLE).execute(&self.pool).await?;
        info!("schools table ready");
        Ok(())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, school: NewSchool) -> Result<School, DatabaseError> {
        let sql = format!(
            "INSERT INTO schools (name, address, city, state, contact, image, email_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            SCHOOL_COLUMNS
        );
        let row = sqlx::query_as::<_, School>(&sql)
            .bind(school.name)
            .bind(school.address)
            .bind(school.city)
            .bind(school.state)
            .bind(school.contact)
            .bind(school.image)
            .bind(school.email_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<School>, DatabaseError> {
        let sql = format!("SELECT {} FROM schools ORDER BY id", SCHOOL_COLUMNS);
        let rows = sqlx::query_as::<_, School>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schools")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn search(&self, query: &SchoolQuery) -> Result<Vec<School>, DatabaseError> {
        let sql_result = query.to_sql();
        debug!(sql = %sql_result.query, params = ?sql_result.params, "school search");

        let mut q = sqlx::query_as::<_, School>(&sql_result.query);
        for param in &sql_result.params {
            q = q.bind(param.as_str());
        }
        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn facets(&self) -> Result<Facets, DatabaseError> {
        Ok(Facets {
            states: self.facet("state").await?,
            cities: self.facet("city").await?,
        })
    }
}
