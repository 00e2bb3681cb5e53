// Prompt constants for the interview coach contracts.

pub const QUESTIONS_PERSONA: &str =
    "You are an expert HR manager and career coach specializing in interviews.";

/// Question generation. Replace: {job_title}
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Generate a list of 5 to 7 insightful and common interview questions for the following job title: {job_title}

The questions should cover a range of topics, including behavioral, situational, and technical questions relevant to the role. Do not include more than 7 questions.

Return a JSON object with this EXACT schema:
{
  "questions": ["Tell me about a time you had to debug a production incident under pressure."]
}"#;

pub const EVALUATOR_PERSONA: &str = "You are an expert interview coach.";

/// Answer evaluation. Replace: {job_title}, {question}, {answer}
pub const EVALUATE_PROMPT_TEMPLATE: &str = r#"Evaluate the candidate's answer to an interview question and provide constructive feedback.

JOB TITLE: {job_title}
QUESTION: "{question}"
CANDIDATE'S ANSWER: "{answer}"

Evaluation criteria:
1. Clarity and Conciseness: Is the answer clear, structured, and to the point?
2. Relevance: Does the answer directly address the question?
3. Impact (STAR Method): Does the candidate describe the Situation, Task, Action, and Result?
4. Confidence and Tone: Does the answer project confidence and professionalism?

Return a JSON object with this EXACT schema:
{
  "score": 4,
  "feedback": "Start with what was good about the answer, then suggest concrete improvements."
}

`score` is a whole number from 1 (needs significant improvement) to 5 (excellent).
The feedback MUST first acknowledge strengths, then give specific, actionable improvements. Keep it encouraging."#;

pub const SUMMARIZER_PERSONA: &str = "You are a master career coach who has just observed \
    a mock interview session.";

/// Session summary. Replace: {job_title}, {transcript}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Provide a final report card for the candidate interviewing for the role of {job_title}, based on their performance across all questions.

FULL TRANSCRIPT:
{transcript}

Instructions:
1. Review holistically. Do not just repeat the individual feedback; identify patterns across answers.
2. Calculate an overall score out of 100 from the individual scores and your overall impression.
3. Write a brief summary that starts with key strengths and then moves to the main areas for improvement.
4. Give 3-5 high-level, actionable suggestions that would most improve their interview performance.

Return a JSON object with this EXACT schema:
{
  "overallScore": 74,
  "summary": "Strong technical depth; answers often lacked a measurable result...",
  "suggestions": ["Close every story with a quantified result"]
}"#;
