//! Cover letter generation for a target job title in a chosen tone.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{COVER_LETTER_PERSONA, COVER_LETTER_PROMPT_TEMPLATE};
use crate::generation::schema::require_text;
use crate::llm_client::prompts::{fill_template, format_profile, system_prompt};
use crate::llm_client::{complete_json, CompletionBackend};
use crate::models::profile::CandidateProfile;

/// Desired register of the letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverLetterTone {
    Formal,
    Creative,
    Enthusiastic,
    #[default]
    Professional,
}

impl fmt::Display for CoverLetterTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CoverLetterTone::Formal => "formal",
            CoverLetterTone::Creative => "creative",
            CoverLetterTone::Enthusiastic => "enthusiastic",
            CoverLetterTone::Professional => "professional",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub job_title: String,
    #[serde(default)]
    pub tone: CoverLetterTone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetter {
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoverLetterReply {
    cover_letter: String,
}

pub async fn generate_cover_letter(
    profile: &CandidateProfile,
    request: &CoverLetterRequest,
    llm: &dyn CompletionBackend,
) -> Result<CoverLetter, AppError> {
    let job_title = request.job_title.trim();
    if job_title.is_empty() {
        return Err(AppError::Validation("jobTitle cannot be empty".to_string()));
    }
    profile.validate()?;

    let prompt = fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("tone", request.tone.to_string().as_str()),
            ("job_title", job_title),
            ("profile", format_profile(profile).as_str()),
        ],
    );

    let reply: CoverLetterReply =
        complete_json(llm, &prompt, &system_prompt(COVER_LETTER_PERSONA))
            .await
            .map_err(|e| AppError::GenerationFailed(format!("Cover letter call failed: {e}")))?;

    let cover_letter = require_text("coverLetter", reply.cover_letter).map_err(|e| {
        warn!("Cover letter reply rejected: {e}");
        AppError::GenerationFailed(e)
    })?;

    info!("Generated {} cover letter for '{job_title}'", request.tone);
    Ok(CoverLetter { cover_letter })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedBackend;
    use crate::models::profile::fixtures::sample_profile;
    use serde_json::json;

    #[test]
    fn test_tone_serde_lowercase() {
        let tone: CoverLetterTone = serde_json::from_str(r#""enthusiastic""#).unwrap();
        assert_eq!(tone, CoverLetterTone::Enthusiastic);
        assert!(serde_json::from_str::<CoverLetterTone>(r#""sarcastic""#).is_err());
    }

    #[test]
    fn test_request_tone_defaults_to_professional() {
        let req: CoverLetterRequest = serde_json::from_str(r#"{"jobTitle": "SRE"}"#).unwrap();
        assert_eq!(req.tone, CoverLetterTone::Professional);
    }

    #[tokio::test]
    async fn test_prompt_carries_tone_and_title() {
        let llm = ScriptedBackend::new().reply(json!({"coverLetter": "Dear Hiring Manager, ..."}));
        let request = CoverLetterRequest {
            job_title: "Platform Engineer".to_string(),
            tone: CoverLetterTone::Formal,
        };
        let out = generate_cover_letter(&sample_profile(), &request, &llm)
            .await
            .unwrap();
        assert!(out.cover_letter.starts_with("Dear Hiring Manager"));
        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("TONE: formal"));
        assert!(prompt.contains("JOB TITLE: Platform Engineer"));
    }

    #[tokio::test]
    async fn test_blank_job_title_rejected_locally() {
        let llm = ScriptedBackend::new();
        let request = CoverLetterRequest {
            job_title: " ".to_string(),
            tone: CoverLetterTone::Creative,
        };
        let err = generate_cover_letter(&sample_profile(), &request, &llm)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(llm.calls(), 0);
    }
}
