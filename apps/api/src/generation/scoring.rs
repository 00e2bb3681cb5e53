//! Resume scoring: a 0-100 score plus actionable feedback points.
//!
//! No caching: two calls with identical input are two independent model calls,
//! and each reply is validated on its own.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{SCORER_PERSONA, SCORE_PROMPT_TEMPLATE};
use crate::generation::schema::{text_list, whole_score};
use crate::llm_client::prompts::{fill_template, format_profile, system_prompt};
use crate::llm_client::{complete_json, CompletionBackend};
use crate::models::profile::CandidateProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeScore {
    /// 0 to 100
    pub score: u8,
    pub feedback: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ScoreReply {
    score: f64,
    feedback: Vec<String>,
}

impl TryFrom<ScoreReply> for ResumeScore {
    type Error = String;

    fn try_from(reply: ScoreReply) -> Result<Self, Self::Error> {
        Ok(ResumeScore {
            score: whole_score("score", reply.score, 0..=100)?,
            feedback: text_list("feedback", reply.feedback, 1..=usize::MAX)?,
        })
    }
}

pub async fn score_resume(
    profile: &CandidateProfile,
    llm: &dyn CompletionBackend,
) -> Result<ResumeScore, AppError> {
    profile.validate()?;

    let prompt = fill_template(
        SCORE_PROMPT_TEMPLATE,
        &[
            ("desired_roles", profile.desired_roles().unwrap_or("Not specified")),
            ("profile", format_profile(profile).as_str()),
        ],
    );

    let reply: ScoreReply = complete_json(llm, &prompt, &system_prompt(SCORER_PERSONA))
        .await
        .map_err(|e| AppError::GenerationFailed(format!("Resume scoring call failed: {e}")))?;

    let score = ResumeScore::try_from(reply).map_err(|e| {
        warn!("Resume score reply rejected: {e}");
        AppError::GenerationFailed(e)
    })?;

    info!(
        "Resume scored {}/100 with {} feedback points",
        score.score,
        score.feedback.len()
    );
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedBackend;
    use crate::models::profile::fixtures::sample_profile;
    use serde_json::json;

    #[tokio::test]
    async fn test_score_within_range() {
        let llm = ScriptedBackend::new().reply(json!({
            "score": 78,
            "feedback": ["Quantify the mentoring outcome", "Add a summary line"]
        }));
        let score = score_resume(&sample_profile(), &llm).await.unwrap();
        assert_eq!(score.score, 78);
        assert_eq!(score.feedback.len(), 2);
    }

    #[tokio::test]
    async fn test_identical_input_makes_independent_calls() {
        let llm = ScriptedBackend::new()
            .reply(json!({"score": 70, "feedback": ["a"]}))
            .reply(json!({"score": 74, "feedback": ["b"]}));
        let profile = sample_profile();
        let first = score_resume(&profile, &llm).await.unwrap();
        let second = score_resume(&profile, &llm).await.unwrap();
        assert_eq!(llm.calls(), 2);
        assert!(first.score <= 100 && second.score <= 100);
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_out_of_range_score_rejected() {
        let llm = ScriptedBackend::new().reply(json!({"score": 140, "feedback": ["x"]}));
        let err = score_resume(&sample_profile(), &llm).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_missing_feedback_rejected() {
        let llm = ScriptedBackend::new().reply(json!({"score": 50, "feedback": []}));
        let err = score_resume(&sample_profile(), &llm).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_prompt_defaults_desired_roles() {
        let mut profile = sample_profile();
        profile.desired_job_roles = None;
        let llm = ScriptedBackend::new().reply(json!({"score": 50, "feedback": ["x"]}));
        score_resume(&profile, &llm).await.unwrap();
        assert!(llm.prompts()[0].contains("DESIRED JOB ROLES: Not specified"));
    }
}
