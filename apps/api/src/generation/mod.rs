// Profile-driven generators: resume text, scoring, skill gaps, cover letters,
// market insights and career paths. Every model call goes through
// llm_client; replies are validated by `schema` before they leave here.

pub mod career_path;
pub mod cover_letter;
pub mod handlers;
pub mod market;
pub mod prompts;
pub mod resume;
pub mod schema;
pub mod scoring;
pub mod skills;
