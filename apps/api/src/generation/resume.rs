//! Resume text generation: turns the structured profile into readable resume text.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{RESUME_PROMPT_TEMPLATE, RESUME_WRITER_PERSONA};
use crate::generation::schema::require_text;
use crate::llm_client::prompts::{fill_template, format_profile, system_prompt};
use crate::llm_client::{complete_json, CompletionBackend};
use crate::models::profile::CandidateProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResume {
    pub resume: String,
}

#[derive(Debug, Deserialize)]
struct ResumeReply {
    resume: String,
}

pub async fn generate_resume(
    profile: &CandidateProfile,
    llm: &dyn CompletionBackend,
) -> Result<GeneratedResume, AppError> {
    profile.validate()?;

    let prompt = fill_template(
        RESUME_PROMPT_TEMPLATE,
        &[("profile", format_profile(profile).as_str())],
    );
    let reply: ResumeReply = complete_json(llm, &prompt, &system_prompt(RESUME_WRITER_PERSONA))
        .await
        .map_err(|e| AppError::GenerationFailed(format!("Resume generation call failed: {e}")))?;

    let resume = require_text("resume", reply.resume).map_err(|e| {
        warn!("Resume generation reply rejected: {e}");
        AppError::GenerationFailed(e)
    })?;

    info!("Generated resume text ({} chars)", resume.len());
    Ok(GeneratedResume { resume })
}
