use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::database::models::School;
use crate::error::ApiError;
use crate::handlers::payload::SchoolPayload;
use crate::server::AppState;

/// POST /schools/create/ - Insert one school and echo it back with its id
pub async fn create(
    State(state): State<AppState>,
    SchoolPayload(new_school): SchoolPayload,
) -> Result<(StatusCode, Json<School>), ApiError> {
    let school = state.store.insert(new_school).await?;
    info!(id = school.id, name = %school.name, "created school");
    Ok((StatusCode::CREATED, Json(school)))
}

/// GET /schools/ - Every stored school, oldest first
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<School>>, ApiError> {
    let schools = state.store.list().await?;
    Ok(Json(schools))
}
