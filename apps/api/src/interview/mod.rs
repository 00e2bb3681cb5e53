// Interview coach: question generation → per-answer evaluation → summary,
// sequenced by a per-session state machine.

pub mod contracts;
pub mod handlers;
pub mod prompts;
pub mod registry;
pub mod session;
