//! Career path roadmap: 3 to 4 sequential roles from the current profile
//! towards the user's stated goal.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{CAREER_PATH_PROMPT_TEMPLATE, CAREER_STRATEGIST_PERSONA};
use crate::generation::schema::{check_count, distinct_list, require_text};
use crate::llm_client::prompts::{fill_template, system_prompt};
use crate::llm_client::{complete_json, CompletionBackend};
use crate::models::profile::CandidateProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerStep {
    pub title: String,
    pub duration: String,
    pub summary: String,
    pub skills_to_develop: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPath {
    pub roadmap: Vec<CareerStep>,
    pub overall_summary: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CareerStepReply {
    title: String,
    duration: String,
    summary: String,
    #[serde(default)]
    skills_to_develop: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CareerPathReply {
    roadmap: Vec<CareerStepReply>,
    overall_summary: String,
}

pub async fn recommend_career_path(
    profile: &CandidateProfile,
    llm: &dyn CompletionBackend,
) -> Result<CareerPath, AppError> {
    profile.validate()?;
    let desired_roles = profile.desired_roles().ok_or_else(|| {
        AppError::Validation("Add your career goals before requesting a roadmap.".to_string())
    })?;

    let prompt = fill_template(
        CAREER_PATH_PROMPT_TEMPLATE,
        &[
            ("desired_roles", desired_roles),
            ("experience", compact_experience(profile).as_str()),
            ("skills", compact_skills(profile).as_str()),
            ("education", compact_education(profile).as_str()),
        ],
    );

    let reply: CareerPathReply =
        complete_json(llm, &prompt, &system_prompt(CAREER_STRATEGIST_PERSONA))
            .await
            .map_err(|e| AppError::GenerationFailed(format!("Career path call failed: {e}")))?;

    let path = validate_reply(reply).map_err(|e| {
        warn!("Career path reply rejected: {e}");
        AppError::GenerationFailed(e)
    })?;

    info!("Recommended a {}-step career path", path.roadmap.len());
    Ok(path)
}

fn validate_reply(reply: CareerPathReply) -> Result<CareerPath, String> {
    check_count("roadmap", reply.roadmap.len(), 3..=4)?;
    let roadmap = reply
        .roadmap
        .into_iter()
        .map(|step| {
            Ok(CareerStep {
                title: require_text("roadmap.title", step.title)?,
                duration: require_text("roadmap.duration", step.duration)?,
                summary: require_text("roadmap.summary", step.summary)?,
                skills_to_develop: distinct_list(
                    "roadmap.skillsToDevelop",
                    step.skills_to_develop,
                    0..=usize::MAX,
                )?,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    Ok(CareerPath {
        roadmap,
        overall_summary: require_text("overallSummary", reply.overall_summary)?,
    })
}

fn compact_experience(profile: &CandidateProfile) -> String {
    profile
        .experience
        .iter()
        .map(|e| format!("{} at {}", e.title, e.company))
        .collect::<Vec<_>>()
        .join("; ")
}

fn compact_skills(profile: &CandidateProfile) -> String {
    profile
        .skills
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn compact_education(profile: &CandidateProfile) -> String {
    profile
        .education
        .iter()
        .map(|e| format!("{} in {}", e.degree, e.major))
        .collect::<Vec<_>>()
        .join("; ")
}
