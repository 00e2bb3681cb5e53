//! Skill-gap suggestions: skills to develop for the user's desired roles.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{SKILLS_PROMPT_TEMPLATE, SKILL_ADVISOR_PERSONA};
use crate::generation::schema::{distinct_list, require_text};
use crate::llm_client::prompts::{fill_template, format_profile, system_prompt};
use crate::llm_client::{complete_json, CompletionBackend};
use crate::models::profile::CandidateProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSuggestions {
    pub suggested_skills: Vec<String>,
    pub reasoning: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SkillsReply {
    suggested_skills: Vec<String>,
    reasoning: String,
}

pub async fn suggest_skills(
    profile: &CandidateProfile,
    llm: &dyn CompletionBackend,
) -> Result<SkillSuggestions, AppError> {
    profile.validate()?;
    let desired_roles = profile.desired_roles().ok_or_else(|| {
        AppError::Validation(
            "Add your desired job roles before requesting skill suggestions.".to_string(),
        )
    })?;

    let prompt = fill_template(
        SKILLS_PROMPT_TEMPLATE,
        &[
            ("desired_roles", desired_roles),
            ("profile", format_profile(profile).as_str()),
        ],
    );

    let reply: SkillsReply = complete_json(llm, &prompt, &system_prompt(SKILL_ADVISOR_PERSONA))
        .await
        .map_err(|e| AppError::GenerationFailed(format!("Skill suggestion call failed: {e}")))?;

    let suggestions = validate_reply(reply).map_err(|e| {
        warn!("Skill suggestion reply rejected: {e}");
        AppError::GenerationFailed(e)
    })?;

    info!("Suggested {} skills", suggestions.suggested_skills.len());
    Ok(suggestions)
}

fn validate_reply(reply: SkillsReply) -> Result<SkillSuggestions, String> {
    Ok(SkillSuggestions {
        suggested_skills: distinct_list("suggestedSkills", reply.suggested_skills, 1..=usize::MAX)?,
        reasoning: require_text("reasoning", reply.reasoning)?,
    })
}
