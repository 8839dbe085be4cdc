pub mod quiz_prompt;

pub use quiz_prompt::{build_quiz_prompt, QUIZ_SYSTEM_PROMPT};
