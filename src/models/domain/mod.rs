pub mod answer_record;
pub mod difficulty;
pub mod question;
pub mod quiz_config;
pub mod quiz_session;

pub use answer_record::AnswerRecord;
pub use difficulty::{Difficulty, ALLOWED_QUESTION_COUNTS};
pub use question::Question;
pub use quiz_config::{QuizConfig, QuizInputs};
pub use quiz_session::QuizSession;
