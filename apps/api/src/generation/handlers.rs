//! Axum route handlers for the Generation API.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::generation::career_path::{recommend_career_path, CareerPath};
use crate::generation::cover_letter::{generate_cover_letter, CoverLetter, CoverLetterRequest};
use crate::generation::market::{get_market_insights, MarketInsights, MarketInsightsRequest};
use crate::generation::resume::{generate_resume, GeneratedResume};
use crate::generation::scoring::{score_resume, ResumeScore};
use crate::generation::skills::{suggest_skills, SkillSuggestions};
use crate::models::profile::CandidateProfile;
use crate::state::AppState;

/// Loads the stored profile and rejects it before any model call if invalid.
async fn load_valid_profile(state: &AppState, id: Uuid) -> Result<CandidateProfile, AppError> {
    let persisted = state.profiles.load(id).await?;
    persisted.data.validate()?;
    Ok(persisted.data)
}

/// POST /api/v1/profiles/:id/resume
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GeneratedResume>, AppError> {
    let profile = load_valid_profile(&state, id).await?;
    let generated = generate_resume(&profile, state.llm.as_ref()).await?;

    let resume = generated.resume.clone();
    state.profiles.update(id, move |s| {
        s.generated_resume = Some(resume)
    })
    .await?;
    info!(profile_id = %id, "Stored generated resume");

    Ok(Json(generated))
}

/// POST /api/v1/profiles/:id/score
pub async fn handle_score_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeScore>, AppError> {
    let profile = load_valid_profile(&state, id).await?;
    let score = score_resume(&profile, state.llm.as_ref()).await?;

    let stored = score.clone();
    state.profiles.update(id, move |s| {
        s.resume_score = Some(stored)
    })
    .await?;

    Ok(Json(score))
}

/// POST /api/v1/profiles/:id/skills
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SkillSuggestions>, AppError> {
    let profile = load_valid_profile(&state, id).await?;
    let suggestions = suggest_skills(&profile, state.llm.as_ref()).await?;

    let stored = suggestions.clone();
    state.profiles.update(id, move |s| {
        s.skill_suggestions = Some(stored)
    })
    .await?;

    Ok(Json(suggestions))
}

/// POST /api/v1/profiles/:id/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<CoverLetterRequest>,
) -> Result<Json<CoverLetter>, AppError> {
    let profile = load_valid_profile(&state, id).await?;
    let letter = generate_cover_letter(&profile, &request, state.llm.as_ref()).await?;
    Ok(Json(letter))
}

/// POST /api/v1/profiles/:id/career-path
pub async fn handle_career_path(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CareerPath>, AppError> {
    let profile = load_valid_profile(&state, id).await?;
    let path = recommend_career_path(&profile, state.llm.as_ref()).await?;
    Ok(Json(path))
}

/// POST /api/v1/market-insights
///
/// Does not touch the profile store.
pub async fn handle_market_insights(
    State(state): State<AppState>,
    AppJson(request): AppJson<MarketInsightsRequest>,
) -> Result<Json<MarketInsights>, AppError> {
    Ok(Json(get_market_insights(&request, state.llm.as_ref()).await?))
}
