//! Interview session state machine.
//!
//! NotStarted --start--> InProgress --advance on last question--> Finished --reset--> NotStarted
//!
//! Every transition either commits fully or leaves the session untouched.
//! The one exception is a failed summary: the session is already Finished
//! and keeps its full history so the summary can be retried.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::interview::contracts::{
    evaluate_answer, generate_questions, summarize_interview, AnswerFeedback, HistoryItem,
    InterviewSummary,
};
use crate::llm_client::CompletionBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterviewSession {
    job_title: Option<String>,
    questions: Vec<String>,
    current_index: usize,
    history: Vec<HistoryItem>,
    feedback: Option<AnswerFeedback>,
    summary: Option<InterviewSummary>,
    finished: bool,
    started_at: Option<DateTime<Utc>>,
}

/// Read-only view returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub job_title: Option<String>,
    pub questions: Vec<String>,
    pub current_index: usize,
    pub current_question: Option<String>,
    pub history: Vec<HistoryItem>,
    pub feedback: Option<AnswerFeedback>,
    pub summary: Option<InterviewSummary>,
    pub started_at: Option<DateTime<Utc>>,
}

impl InterviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        if self.finished {
            SessionStatus::Finished
        } else if self.questions.is_empty() {
            SessionStatus::NotStarted
        } else {
            SessionStatus::InProgress
        }
    }

    pub fn current_question(&self) -> Option<&str> {
        match self.status() {
            SessionStatus::InProgress => self.questions.get(self.current_index).map(String::as_str),
            _ => None,
        }
    }

    pub fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    pub fn summary(&self) -> Option<&InterviewSummary> {
        self.summary.as_ref()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status(),
            job_title: self.job_title.clone(),
            questions: self.questions.clone(),
            current_index: self.current_index,
            current_question: self.current_question().map(str::to_owned),
            history: self.history().to_vec(),
            feedback: self.feedback().cloned(),
            summary: self.summary().cloned(),
            started_at: self.started_at,
        }
    }

    /// Generates the question set for `job_title`. On failure nothing is stored.
    pub async fn start(
        &mut self,
        job_title: &str,
        llm: &dyn CompletionBackend,
    ) -> Result<(), AppError> {
        if self.status() != SessionStatus::NotStarted {
            return Err(AppError::Conflict(
                "Interview already started; reset it to begin a new one.".to_string(),
            ));
        }

        let questions = generate_questions(job_title, llm).await?;

        self.job_title = Some(job_title.trim().to_string());
        self.questions = questions;
        self.current_index = 0;
        self.started_at = Some(Utc::now());
        info!(
            "Interview started for '{}' with {} questions",
            job_title.trim(),
            self.questions.len()
        );
        Ok(())
    }

    /// Evaluates an answer to the current question.
    ///
    /// A second submission for the same question is a `Conflict`: the model is
    /// not called again. After an `EvaluationFailed` nothing has changed and the
    /// same answer may be resubmitted.
    pub async fn submit_answer(
        &mut self,
        answer: &str,
        llm: &dyn CompletionBackend,
    ) -> Result<&AnswerFeedback, AppError> {
        let (job_title, question) = match (self.status(), self.current_question()) {
            (SessionStatus::InProgress, Some(question)) => (
                self.job_title.clone().unwrap_or_default(),
                question.to_string(),
            ),
            _ => {
                return Err(AppError::Conflict(
                    "No question is awaiting an answer.".to_string(),
                ))
            }
        };
        if self.feedback.is_some() {
            return Err(AppError::Conflict(
                "This question has already been answered; move to the next one.".to_string(),
            ));
        }
        if answer.trim().is_empty() {
            return Err(AppError::Validation(
                "Please provide an answer before getting feedback.".to_string(),
            ));
        }

        let feedback = evaluate_answer(&job_title, &question, answer, llm).await?;

        self.history.push(HistoryItem {
            question,
            answer: answer.trim().to_string(),
            feedback: feedback.clone(),
        });
        let feedback = self.feedback.insert(feedback);
        Ok(&*feedback)
    }

    /// Moves to the next question, or finishes the interview after the last one
    /// and requests the summary.
    ///
    /// Returns the new status. If the summary call fails the session is still
    /// `Finished` (history intact) and the error is returned; see `retry_summary`.
    pub async fn advance(
        &mut self,
        llm: &dyn CompletionBackend,
    ) -> Result<SessionStatus, AppError> {
        if self.status() != SessionStatus::InProgress {
            return Err(AppError::Conflict("Interview is not in progress.".to_string()));
        }
        if self.feedback.is_none() {
            return Err(AppError::Validation(
                "Answer the current question before moving on.".to_string(),
            ));
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.feedback = None;
            return Ok(SessionStatus::InProgress);
        }

        self.finished = true;
        info!(
            "Interview finished after {} questions; requesting summary",
            self.history.len()
        );
        self.request_summary(llm).await?;
        Ok(SessionStatus::Finished)
    }

    /// Re-requests the summary after a failed attempt, with the same full history.
    pub async fn retry_summary(
        &mut self,
        llm: &dyn CompletionBackend,
    ) -> Result<&InterviewSummary, AppError> {
        if self.status() != SessionStatus::Finished {
            return Err(AppError::Conflict("Interview is not finished yet.".to_string()));
        }
        if self.summary.is_some() {
            return Err(AppError::Conflict(
                "Interview summary already exists.".to_string(),
            ));
        }
        self.request_summary(llm).await
    }

    /// Clears every field; the session is indistinguishable from a new one.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    async fn request_summary(
        &mut self,
        llm: &dyn CompletionBackend,
    ) -> Result<&InterviewSummary, AppError> {
        let job_title = self.job_title.as_deref().unwrap_or_default();
        let summary = summarize_interview(job_title, &self.history, llm).await?;
        let summary = self.summary.insert(summary);
        Ok(&*summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::contracts::fixtures::{feedback_reply, questions_reply, summary_reply};
    use crate::llm_client::testing::ScriptedBackend;

    async fn started(n: usize, llm: &ScriptedBackend) -> InterviewSession {
        let mut session = InterviewSession::new();
        session.start("Backend Engineer", llm).await.unwrap();
        assert_eq!(session.questions.len(), n);
        session
    }

    #[tokio::test]
    async fn test_full_happy_path() {
        let mut llm = ScriptedBackend::new().reply(questions_reply(5));
        for _ in 0..5 {
            llm = llm.reply(feedback_reply(4));
        }
        let llm = llm.reply(summary_reply(80));

        let mut session = started(5, &llm).await;
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.current_question(), Some("Question 1?"));

        for i in 0..5 {
            assert!(session.current_index < session.questions.len());
            let fb = session
                .submit_answer("I designed a caching layer...", &llm)
                .await
                .unwrap();
            assert!((1..=5).contains(&fb.score));
            assert_eq!(session.history().len(), i + 1);
            let status = session.advance(&llm).await.unwrap();
            if i < 4 {
                assert_eq!(status, SessionStatus::InProgress);
                assert!(session.feedback().is_none());
            } else {
                assert_eq!(status, SessionStatus::Finished);
            }
        }

        assert_eq!(session.history().len(), session.questions.len());
        let summary = session.summary().unwrap();
        assert_eq!(summary.overall_score, 80);
        assert!((3..=5).contains(&summary.suggestions.len()));
        assert_eq!(llm.calls(), 1 + 5 + 1);
    }

    #[tokio::test]
    async fn test_failed_start_stays_not_started() {
        let llm = ScriptedBackend::new().fail();
        let mut session = InterviewSession::new();
        let err = session.start("Backend Engineer", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(_)));
        assert_eq!(session, InterviewSession::new());
    }

    #[tokio::test]
    async fn test_start_twice_is_conflict() {
        let llm = ScriptedBackend::new().reply(questions_reply(5));
        let mut session = started(5, &llm).await;
        let err = session.start("Other", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_answer_rejected_without_model_call() {
        let llm = ScriptedBackend::new().reply(questions_reply(5));
        let mut session = started(5, &llm).await;
        let err = session.submit_answer("   ", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(llm.calls(), 1);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_evaluation_failure_preserves_state_and_allows_resubmit() {
        let llm = ScriptedBackend::new()
            .reply(questions_reply(5))
            .fail()
            .reply(feedback_reply(3));
        let mut session = started(5, &llm).await;

        let err = session.submit_answer("my answer", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::EvaluationFailed(_)));
        assert!(session.history().is_empty());
        assert!(session.feedback().is_none());

        session.submit_answer("my answer", &llm).await.unwrap();
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].answer, "my answer");
    }

    #[tokio::test]
    async fn test_duplicate_submission_is_conflict() {
        let llm = ScriptedBackend::new()
            .reply(questions_reply(5))
            .reply(feedback_reply(3))
            .reply(feedback_reply(5));
        let mut session = started(5, &llm).await;
        session.submit_answer("first", &llm).await.unwrap();
        let err = session.submit_answer("second", &llm).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(session.history().len(), 1);
        assert_eq!(llm.calls(), 2);
    }

    #[tokio::test]
    async fn test_advance_requires_feedback() {
        let llm = ScriptedBackend::new().reply(questions_reply(5));
        let mut session = started(5, &llm).await;
        let err = session.advance(&llm).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(session.current_index, 0);
    }

    #[tokio::test]
    async fn test_summary_failure_keeps_history_and_can_retry() {
        let mut llm = ScriptedBackend::new().reply(questions_reply(5));
        for _ in 0..5 {
            llm = llm.reply(feedback_reply(2));
        }
        let llm = llm.fail().reply(summary_reply(55));

        let mut session = started(5, &llm).await;
        for i in 0..5 {
            session.submit_answer("answer", &llm).await.unwrap();
            if i < 4 {
                session.advance(&llm).await.unwrap();
            }
        }
        let err = session.advance(&llm).await.unwrap_err();
        assert!(matches!(err, AppError::SummarizationFailed(_)));
        assert_eq!(session.status(), SessionStatus::Finished);
        assert_eq!(session.history().len(), 5);
        assert!(session.summary().is_none());

        let summary = session.retry_summary(&llm).await.unwrap();
        assert_eq!(summary.overall_score, 55);

        let err = session.retry_summary(&llm).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_retry_summary_before_finish_is_conflict() {
        let llm = ScriptedBackend::new().reply(questions_reply(5));
        let mut session = started(5, &llm).await;
        let err = session.retry_summary(&llm).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_reset_matches_fresh_session() {
        let llm = ScriptedBackend::new()
            .reply(questions_reply(6))
            .reply(feedback_reply(4));
        let mut session = started(6, &llm).await;
        session.submit_answer("answer", &llm).await.unwrap();
        session.reset();

        assert_eq!(session, InterviewSession::new());
        let snap = session.snapshot();
        assert_eq!(snap.status, SessionStatus::NotStarted);
        assert!(snap.questions.is_empty());
        assert_eq!(snap.current_index, 0);
        assert!(snap.history.is_empty());
        assert!(snap.feedback.is_none());
        assert!(snap.summary.is_none());
    }

    #[test]
    fn test_snapshot_serializes_status_snake_case() {
        let snap = InterviewSession::new().snapshot();
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["status"], "not_started");
        assert_eq!(json["currentIndex"], 0);
    }
}
