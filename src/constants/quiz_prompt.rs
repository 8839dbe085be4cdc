use crate::models::{domain::Difficulty, dto::quiz_dto::GeneratedQuestion};

pub const QUIZ_SYSTEM_PROMPT: &str = "You are a quiz author that writes multiple-choice questions for self-study.

### Rules:

1. **Exact Count:** Produce exactly the number of questions requested, no more and no fewer.
2. **Four Options:** Every question has exactly 4 distinct options, exactly one of which is correct.
3. **Verbatim Answer:** The `answer` field repeats the text of the correct option exactly, character for character. Never use an index or a letter.
4. **Difficulty:** Match the requested difficulty level. Easy questions test recall, Medium questions test understanding, Hard questions test application and edge cases.
5. **Explanation:** Give a short explanation (one or two sentences) of why the answer is correct.
6. **Output:** Return only a JSON array. Do not include prose, headings or commentary.";

/// Builds the user message asking for `count` questions on `topic`.
pub fn build_quiz_prompt(topic: &str, difficulty: Difficulty, count: usize) -> String {
    let schema = schemars::schema_for!(GeneratedQuestion);
    let schema_json = serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string());

    format!(
        "Generate {count} multiple-choice questions on the topic: {topic}.
Difficulty level: {difficulty}.
Each question must have:
- \"question\": the question text
- \"options\": a list of 4 options
- \"answer\": the correct option text
- \"explanation\": a short explanation for the correct answer
Each element of the array must match this JSON Schema:
{schema_json}
Return the result strictly as a JSON array."
    )
}
