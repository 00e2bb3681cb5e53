//! The three interview coach contracts: question generation, answer
//! evaluation and session summarization. Each is a single stateless call.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::schema::{require_text, text_list, whole_score};
use crate::interview::prompts::{
    EVALUATE_PROMPT_TEMPLATE, EVALUATOR_PERSONA, QUESTIONS_PERSONA, QUESTIONS_PROMPT_TEMPLATE,
    SUMMARIZER_PERSONA, SUMMARY_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{fill_template, system_prompt};
use crate::llm_client::{complete_json, CompletionBackend};

pub const MIN_QUESTIONS: usize = 5;
pub const MAX_QUESTIONS: usize = 7;
const MIN_SUGGESTIONS: usize = 3;
const MAX_SUGGESTIONS: usize = 5;

/// Per-answer feedback. `score` is 1 to 5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub score: u8,
    pub feedback: String,
}

/// One completed question of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub question: String,
    pub answer: String,
    pub feedback: AnswerFeedback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSummary {
    /// 0 to 100
    pub overall_score: u8,
    pub summary: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionsReply {
    questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FeedbackReply {
    score: f64,
    feedback: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryReply {
    overall_score: f64,
    summary: String,
    suggestions: Vec<String>,
}

/// Produces 5 to 7 questions mixing behavioral, situational and technical topics.
pub async fn generate_questions(
    job_title: &str,
    llm: &dyn CompletionBackend,
) -> Result<Vec<String>, AppError> {
    let job_title = job_title.trim();
    if job_title.is_empty() {
        return Err(AppError::Validation(
            "Please enter a job title to start the interview.".to_string(),
        ));
    }

    let prompt = fill_template(QUESTIONS_PROMPT_TEMPLATE, &[("job_title", job_title)]);
    let reply: QuestionsReply = complete_json(llm, &prompt, &system_prompt(QUESTIONS_PERSONA))
        .await
        .map_err(|e| AppError::GenerationFailed(format!("Question generation call failed: {e}")))?;

    let questions = text_list("questions", reply.questions, MIN_QUESTIONS..=MAX_QUESTIONS)
        .map_err(|e| {
            warn!("Question generation reply rejected: {e}");
            AppError::GenerationFailed(e)
        })?;

    info!("Generated {} interview questions for '{job_title}'", questions.len());
    Ok(questions)
}

/// Scores one answer. Stateless: earlier questions play no part.
pub async fn evaluate_answer(
    job_title: &str,
    question: &str,
    answer: &str,
    llm: &dyn CompletionBackend,
) -> Result<AnswerFeedback, AppError> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(AppError::Validation(
            "Please provide an answer before getting feedback.".to_string(),
        ));
    }

    let prompt = fill_template(
        EVALUATE_PROMPT_TEMPLATE,
        &[
            ("job_title", job_title),
            ("question", question),
            ("answer", answer),
        ],
    );

    let reply: FeedbackReply = complete_json(llm, &prompt, &system_prompt(EVALUATOR_PERSONA))
        .await
        .map_err(|e| AppError::EvaluationFailed(format!("Answer evaluation call failed: {e}")))?;

    let feedback = validate_feedback(reply).map_err(|e| {
        warn!("Answer evaluation reply rejected: {e}");
        AppError::EvaluationFailed(e)
    })?;

    info!("Answer scored {}/5", feedback.score);
    Ok(feedback)
}

fn validate_feedback(reply: FeedbackReply) -> Result<AnswerFeedback, String> {
    Ok(AnswerFeedback {
        score: whole_score("score", reply.score, 1..=5)?,
        feedback: require_text("feedback", reply.feedback)?,
    })
}

/// Summarizes a completed session. Expects the full history, never a partial one.
pub async fn summarize_interview(
    job_title: &str,
    history: &[HistoryItem],
    llm: &dyn CompletionBackend,
) -> Result<InterviewSummary, AppError> {
    if history.is_empty() {
        return Err(AppError::Validation(
            "Cannot summarize an interview with no answered questions.".to_string(),
        ));
    }

    let prompt = fill_template(
        SUMMARY_PROMPT_TEMPLATE,
        &[
            ("job_title", job_title),
            ("transcript", format_transcript(history).as_str()),
        ],
    );

    let reply: SummaryReply = complete_json(llm, &prompt, &system_prompt(SUMMARIZER_PERSONA))
        .await
        .map_err(|e| {
            AppError::SummarizationFailed(format!("Interview summary call failed: {e}"))
        })?;

    let summary = validate_summary(reply).map_err(|e| {
        warn!("Interview summary reply rejected: {e}");
        AppError::SummarizationFailed(e)
    })?;

    info!(
        "Interview summarized: {}/100 over {} questions",
        summary.overall_score,
        history.len()
    );
    Ok(summary)
}

fn validate_summary(reply: SummaryReply) -> Result<InterviewSummary, String> {
    Ok(InterviewSummary {
        overall_score: whole_score("overallScore", reply.overall_score, 0..=100)?,
        summary: require_text("summary", reply.summary)?,
        suggestions: text_list(
            "suggestions",
            reply.suggestions,
            MIN_SUGGESTIONS..=MAX_SUGGESTIONS,
        )?,
    })
}

fn format_transcript(history: &[HistoryItem]) -> String {
    history
        .iter()
        .map(|item| {
            format!(
                "---\nQuestion: {}\nAnswer: {}\nIndividual Feedback: (Score: {}/5) {}\n---",
                item.question, item.answer, item.feedback.score, item.feedback.feedback
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::llm_client::testing::ScriptedBackend;
    use serde_json::json;

    fn history(n: usize) -> Vec<HistoryItem> {
        (1..=n)
            .map(|i| HistoryItem {
                question: format!("Question {i}?"),
                answer: format!("Answer {i}"),
                feedback: AnswerFeedback {
                    score: 3,
                    feedback: "ok".to_string(),
                },
            })
            .collect()
    }

    #[tokio::test]
    async fn test_backend_engineer_gets_five_to_seven_questions() {
        let llm = ScriptedBackend::new().reply(questions_reply(6));
        let questions = generate_questions("Backend Engineer", &llm).await.unwrap();
        assert!((MIN_QUESTIONS..=MAX_QUESTIONS).contains(&questions.len()));
        assert!(questions.iter().all(|q| !q.is_empty()));
        assert!(llm.prompts()[0].contains("job title: Backend Engineer"));
    }

    #[tokio::test]
    async fn test_too_few_questions_is_generation_failed() {
        let llm = ScriptedBackend::new().reply(questions_reply(4));
        let err = generate_questions("Backend Engineer", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_too_many_questions_is_generation_failed() {
        let llm = ScriptedBackend::new().reply(questions_reply(8));
        let err = generate_questions("Backend Engineer", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_blank_job_title_is_validation_error() {
        let llm = ScriptedBackend::new();
        let err = generate_questions("  ", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_evaluate_answer_scores_within_one_to_five() {
        let llm = ScriptedBackend::new().reply(feedback_reply(4));
        let fb = evaluate_answer(
            "Backend Engineer",
            "Question 1?",
            "I designed a caching layer...",
            &llm,
        )
        .await
        .unwrap();
        assert!((1..=5).contains(&fb.score));
        assert!(!fb.feedback.is_empty());
        assert!(llm.prompts()[0].contains("I designed a caching layer..."));
    }

    #[tokio::test]
    async fn test_placeholders_in_job_title_stay_literal() {
        let llm = ScriptedBackend::new().reply(feedback_reply(3));
        evaluate_answer("Engineer {answer}", "Q?", "SECRET-ANSWER", &llm)
            .await
            .unwrap();
        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("JOB TITLE: Engineer {answer}"));
        assert_eq!(prompt.matches("SECRET-ANSWER").count(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_rejects_zero_score() {
        let llm = ScriptedBackend::new().reply(json!({"score": 0, "feedback": "bad"}));
        let err = evaluate_answer("t", "q", "a", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::EvaluationFailed(_)));
    }

    #[tokio::test]
    async fn test_empty_answer_never_reaches_model() {
        let llm = ScriptedBackend::new().reply(feedback_reply(4));
        let err = evaluate_answer("t", "q", " \n ", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_evaluation_failed() {
        let llm = ScriptedBackend::new().fail();
        let err = evaluate_answer("t", "q", "a", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::EvaluationFailed(_)));
    }

    #[tokio::test]
    async fn test_summary_contract() {
        let llm = ScriptedBackend::new().reply(summary_reply(72));
        let summary = summarize_interview("Backend Engineer", &history(5), &llm)
            .await
            .unwrap();
        assert!(summary.overall_score <= 100);
        assert!((3..=5).contains(&summary.suggestions.len()));
        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Question 5?"));
        assert!(prompt.contains("(Score: 3/5)"));
    }

    #[tokio::test]
    async fn test_summary_with_two_suggestions_rejected() {
        let llm = ScriptedBackend::new().reply(json!({
            "overallScore": 60,
            "summary": "fine",
            "suggestions": ["a", "b"]
        }));
        let err = summarize_interview("t", &history(5), &llm).await.unwrap_err();
        assert!(matches!(err, AppError::SummarizationFailed(_)));
    }

    #[tokio::test]
    async fn test_summary_requires_history() {
        let llm = ScriptedBackend::new();
        let err = summarize_interview("t", &[], &llm).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
