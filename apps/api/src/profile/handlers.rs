//! Axum route handlers for the Profile API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::models::profile::CandidateProfile;
use crate::render::{render_profile, TemplateKind};
use crate::state::AppState;
use crate::store::PersistedState;

#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    pub template: TemplateKind,
}

#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    pub template: Option<TemplateKind>,
}

/// GET /api/v1/profiles/:id
///
/// Unknown ids yield a fresh default state rather than 404.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PersistedState>, AppError> {
    Ok(Json(state.profiles.load(id).await?))
}

/// PUT /api/v1/profiles/:id
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(profile): AppJson<CandidateProfile>,
) -> Result<Json<PersistedState>, AppError> {
    let profile = profile.normalized();
    profile.validate()?;

    let saved = state.profiles.update(id, move |s| s.data = profile).await?;
    info!(profile_id = %id, "Profile saved");
    Ok(Json(saved))
}

/// PUT /api/v1/profiles/:id/template
pub async fn handle_put_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<TemplateRequest>,
) -> Result<Json<PersistedState>, AppError> {
    let saved = state.profiles.update(id, move |s| {
        s.template = request.template
    })
    .await?;
    Ok(Json(saved))
}

/// DELETE /api/v1/profiles/:id
pub async fn handle_reset_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.profiles.reset(id).await?;
    info!(profile_id = %id, "Profile reset");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/profiles/:id/render?template=modern|classic
///
/// Without a query parameter the stored template choice is used.
pub async fn handle_render_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppQuery(query): AppQuery<RenderQuery>,
) -> Result<Html<String>, AppError> {
    let persisted = state.profiles.load(id).await?;
    let kind = query.template.unwrap_or(persisted.template);
    Ok(Html(render_profile(&persisted.data, kind)?))
}
