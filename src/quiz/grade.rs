use serde::Serialize;
use std::collections::HashMap;

use super::NormalizedQuestion;

/// Case-insensitive check of a learner's answer.
///
/// Matches the answer text directly, or the option sitting at `correct_index`
/// (the stored answer text can differ from the option after a partial match).
pub fn is_answer_correct(user_answer: &str, question: &NormalizedQuestion) -> bool {
    let given = user_answer.trim().to_lowercase();
    if given.is_empty() {
        return false;
    }
    if given == question.answer.trim().to_lowercase() {
        return true;
    }
    question
        .options
        .iter()
        .position(|o| o.trim().to_lowercase() == given)
        .is_some_and(|i| i as i64 == question.correct_index)
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent; 0 for an empty quiz.
    pub percent: u32,
}

/// Scores learner answers keyed by question id. Unanswered counts as wrong.
pub fn score_answers(questions: &[NormalizedQuestion], answers: &HashMap<i64, String>) -> QuizScore {
    let correct = questions
        .iter()
        .filter(|q| {
            answers
                .get(&q.id)
                .is_some_and(|a| is_answer_correct(a, q))
        })
        .count();
    let total = questions.len();
    let percent = if total == 0 {
        0
    } else {
        ((correct as f64 / total as f64) * 100.0).round() as u32
    };
    QuizScore { correct, total, percent }
}
