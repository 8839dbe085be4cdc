use std::collections::BTreeMap;

use async_graphql::SimpleObject;
use serde::Serialize;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{AnswerRecord, Difficulty},
};

pub const CSV_HEADER: [&str; 6] = [
    "question",
    "chosen",
    "correct",
    "is_correct",
    "difficulty",
    "explanation",
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
    /// Only difficulties that have at least one answer appear here.
    pub accuracy_by_difficulty: BTreeMap<Difficulty, f64>,
}

/// One row of the per-question breakdown, in the order answers were given.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct QuestionOutcome {
    pub number: usize,
    pub question: String,
    pub chosen: String,
    pub correct: String,
    pub is_correct: bool,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    question: &'a str,
    chosen: &'a str,
    correct: &'a str,
    is_correct: bool,
    difficulty: Difficulty,
    explanation: &'a str,
}

pub struct ResultsService;

impl ResultsService {
    /// Score and per-difficulty accuracy. Independent of answer order.
    pub fn summarize(answers: &[AnswerRecord]) -> QuizSummary {
        let mut tallies: BTreeMap<Difficulty, (usize, usize)> = BTreeMap::new();

        for record in answers {
            let (correct, seen) = tallies.entry(record.difficulty).or_insert((0, 0));
            *seen += 1;
            if record.is_correct {
                *correct += 1;
            }
        }

        let accuracy_by_difficulty = tallies
            .into_iter()
            .map(|(difficulty, (correct, seen))| (difficulty, correct as f64 / seen as f64))
            .collect();

        QuizSummary {
            score: answers.iter().filter(|a| a.is_correct).count(),
            total: answers.len(),
            accuracy_by_difficulty,
        }
    }

    pub fn breakdown(answers: &[AnswerRecord]) -> Vec<QuestionOutcome> {
        answers
            .iter()
            .enumerate()
            .map(|(index, record)| QuestionOutcome {
                number: index + 1,
                question: record.question_text.clone(),
                chosen: record.chosen_option.clone(),
                correct: record.correct_option.clone(),
                is_correct: record.is_correct,
            })
            .collect()
    }

    /// Answer log as CSV, header row first, standard quoting.
    pub fn to_csv(answers: &[AnswerRecord]) -> AppResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        if answers.is_empty() {
            writer.write_record(CSV_HEADER)?;
        }

        for record in answers {
            writer.serialize(CsvRow {
                question: &record.question_text,
                chosen: &record.chosen_option,
                correct: &record.correct_option,
                is_correct: record.is_correct,
                difficulty: record.difficulty,
                explanation: &record.explanation,
            })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::InternalError(format!("CSV export error: {}", e)))?;

        String::from_utf8(bytes)
            .map_err(|e| AppError::InternalError(format!("CSV export error: {}", e)))
    }
}
