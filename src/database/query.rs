use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::models::{School, SCHOOL_COLUMNS};

/// Parameterized SQL ready for binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<String>,
}

/// Operator-facing browse query: free-text search plus exact filters.
///
/// Search splits on whitespace; each term must appear (case-insensitive)
/// in at least one of [`SchoolQuery::SEARCH_FIELDS`]. `state` and `city`
/// must match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolQuery {
    pub search: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

/// One distinct value of a filterable column and how many rows carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FacetCount {
    pub value: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub states: Vec<FacetCount>,
    pub cities: Vec<FacetCount>,
}

impl SchoolQuery {
    pub const SEARCH_FIELDS: [&'static str; 4] = ["name", "city", "state", "email_id"];

    pub fn is_empty(&self) -> bool {
        self.terms().is_empty() && self.state.is_none() && self.city.is_none()
    }

    pub fn terms(&self) -> Vec<&str> {
        self.search
            .as_deref()
            .map(|s| s.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// In-process evaluation, equivalent to the SQL from [`SchoolQuery::to_sql`]
    pub fn matches(&self, school: &School) -> bool {
        if self.state.as_deref().is_some_and(|state| state != school.state) {
            return false;
        }
        if self.city.as_deref().is_some_and(|city| city != school.city) {
            return false;
        }

        let haystacks = [&school.name, &school.city, &school.state, &school.email_id]
            .map(|field| field.to_lowercase());
        self.terms().iter().all(|term| {
            let needle = term.to_lowercase();
            haystacks.iter().any(|hay| hay.contains(&needle))
        })
    }

    pub fn to_sql(&self) -> SqlResult {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        for term in self.terms() {
            params.push(format!("%{}%", escape_like(term)));
            let index = params.len();
            let any_field = Self::SEARCH_FIELDS
                .iter()
                .map(|field| format!("{} ILIKE ${} ESCAPE '\\'", field, index))
                .collect::<Vec<_>>()
                .join(" OR ");
            conditions.push(format!("({})", any_field));
        }
        if let Some(state) = &self.state {
            params.push(state.clone());
            conditions.push(format!("state = ${}", params.len()));
        }
        if let Some(city) = &self.city {
            params.push(city.clone());
            conditions.push(format!("city = ${}", params.len()));
        }

        let mut query = format!("SELECT {} FROM schools", SCHOOL_COLUMNS);
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY id");

        SqlResult { query, params }
    }
}

/// Escape LIKE wildcards so search terms match literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school(name: &str, city: &str, state: &str, email_id: &str) -> School {
        School {
            id: 1,
            name: name.to_string(),
            address: String::new(),
            city: city.to_string(),
            state: state.to_string(),
            contact: None,
            image: String::new(),
            email_id: email_id.to_string(),
        }
    }

    #[test]
    fn empty_query_selects_everything() {
        let query = SchoolQuery::default();
        assert!(query.is_empty());
        assert_eq!(
            query.to_sql(),
            SqlResult {
                query: "SELECT id, name, address, city, state, contact, image, email_id FROM schools ORDER BY id".to_string(),
                params: vec![],
            }
        );
        assert!(query.matches(&school("Oak", "Springfield", "IL", "oak@x.org")));
    }

    #[test]
    fn search_terms_and_filters_render_numbered_params() {
        let query = SchoolQuery {
            search: Some("oak  100%".to_string()),
            state: Some("IL".to_string()),
            city: None,
        };
        let sql = query.to_sql();

        assert_eq!(sql.params, vec!["%oak%", "%100\\%%", "IL"]);
        assert!(sql.query.contains(
            "WHERE (name ILIKE $1 ESCAPE '\\' OR city ILIKE $1 ESCAPE '\\' OR state ILIKE $1 ESCAPE '\\' OR email_id ILIKE $1 ESCAPE '\\')"
        ));
        assert!(sql.query.contains("AND (name ILIKE $2"));
        assert!(sql.query.ends_with("AND state = $3 ORDER BY id"));
    }

    #[test]
    fn every_term_must_hit_some_field() {
        let oak = school("Oak High", "Springfield", "IL", "office@oak.org");
        let search = |s: &str| SchoolQuery { search: Some(s.to_string()), ..Default::default() };

        assert!(search("oak").matches(&oak));
        assert!(search("OAK spring").matches(&oak));
        assert!(search("office il").matches(&oak));
        assert!(!search("oak shelbyville").matches(&oak));
    }

    #[test]
    fn exact_filters_are_case_sensitive() {
        let oak = school("Oak High", "Springfield", "IL", "");
        let by_state = |s: &str| SchoolQuery { state: Some(s.to_string()), ..Default::default() };

        assert!(by_state("IL").matches(&oak));
        assert!(!by_state("il").matches(&oak));
        assert!(!SchoolQuery { city: Some("Spring".to_string()), ..Default::default() }.matches(&oak));
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("a_b%c\\d"), "a\\_b\\%c\\\\d");
    }
}
