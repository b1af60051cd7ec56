//! Lenient quiz ingestion.
//!
//! Lesson content arrives as prose with a JSON quiz somewhere inside it,
//! usually produced by an AI generator and often slightly broken. The
//! pipeline locates the JSON, repairs it if needed, finds the question
//! collection whatever layout it uses, and normalizes each question onto
//! [`NormalizedQuestion`]. Every failure collapses to `None`.

mod extract;
mod fallback;
mod grade;
mod locate;
mod normalize;
mod raw;
mod sanitize;

pub use extract::{extract_raw_questions, extract_with_strategy, ExtractStrategy};
pub use fallback::extract_plain_text_questions;
pub use grade::{is_answer_correct, score_answers, QuizScore};
pub use locate::{locate_json_block, ContentBlock};
pub use normalize::{normalize_question, normalize_question_with};
pub use raw::{RawField, RawQuestion};
pub use sanitize::sanitize_json_string;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    FillInTheBlank,
}

impl QuestionType {
    /// Classifies a lower-cased type label; "complétez" and friends are blanks.
    pub fn classify(label: &str) -> Self {
        const BLANK_MARKERS: [&str; 4] = ["fill", "blank", "complet", "complét"];
        if BLANK_MARKERS.iter().any(|m| label.contains(m)) {
            QuestionType::FillInTheBlank
        } else {
            QuestionType::MultipleChoice
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedQuestion {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub question: String,
    pub options: Vec<String>,
    /// Text of the correct answer.
    pub answer: String,
    /// 0-based into `options`, -1 when there is nothing to point at.
    pub correct_index: i64,
    pub feedback: String,
}

/// A guess the normalizer made on malformed input.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NormalizeWarning {
    /// No usable answer; the first option was taken.
    DefaultedAnswer { position: usize },
    /// A numeric answer looked 1-based and was shifted down.
    OneBasedIndexAdjusted { position: usize },
    /// The answer only matched an option by substring.
    PartialAnswerMatch { position: usize },
    /// The id was present but not a number.
    DefaultedId { position: usize },
    ReassignedDuplicateId { position: usize, from: i64, to: i64 },
    /// No question text.
    DroppedQuestion { position: usize },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuiz {
    pub questions: Vec<NormalizedQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<NormalizeWarning>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Read numbered plain-text questions when the JSON cannot be repaired.
    pub plain_text_fallback: bool,
}

/// Parses a quiz out of lesson content. `None` means "cannot render a quiz".
pub fn parse_quiz_from_content(content: &str) -> Option<ParsedQuiz> {
    parse_quiz_with(content, &ParseOptions::default())
}

pub fn parse_quiz_with(content: &str, opts: &ParseOptions) -> Option<ParsedQuiz> {
    if content.is_empty() {
        return None;
    }

    let block = locate_json_block(content)?;
    let parsed = match parse_candidate(block.json) {
        Some(v) => v,
        None if opts.plain_text_fallback => {
            tracing::debug!("quiz JSON unrecoverable, trying plain-text layout");
            return extract_plain_text_questions(content);
        }
        None => return None,
    };

    let raw = extract_raw_questions(&parsed);
    if raw.is_empty() {
        tracing::debug!("no question collection found");
        return None;
    }

    let mut warnings = Vec::new();
    let mut questions: Vec<NormalizedQuestion> = raw
        .iter()
        .enumerate()
        .filter_map(|(i, q)| normalize_question_with(q, i, &mut warnings))
        .collect();
    if questions.is_empty() {
        return None;
    }

    dedup_ids(&mut questions, &mut warnings);

    if !warnings.is_empty() {
        tracing::debug!(count = warnings.len(), "quiz normalized with guesses");
    }

    Some(ParsedQuiz {
        questions,
        intro_text: Some(block.intro.to_string()).filter(|s| !s.is_empty()),
        warnings,
    })
}

/// Strict parse first, then one retry after sanitizing.
fn parse_candidate(json: &str) -> Option<Value> {
    serde_json::from_str(json)
        .or_else(|_| serde_json::from_str(&sanitize_json_string(json)))
        .ok()
}

/// Gives every repeated id `1000 + position`, moving up if that is taken too.
fn dedup_ids(questions: &mut [NormalizedQuestion], warnings: &mut Vec<NormalizeWarning>) {
    let mut seen = HashSet::new();
    for (i, q) in questions.iter_mut().enumerate() {
        if seen.contains(&q.id) {
            let from = q.id;
            let mut to = 1000 + i as i64;
            while seen.contains(&to) {
                to += 1;
            }
            q.id = to;
            warnings.push(NormalizeWarning::ReassignedDuplicateId { position: i, from, to });
        }
        seen.insert(q.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn fenced_block_with_intro() {
        let content = "Quiz de validation\n\n```json\n{\"questions\":[{\"id\":1,\"type\":\"multiple-choice\",\"question\":\"What is 2+2?\",\"options\":[\"3\",\"4\",\"5\",\"6\"],\"answer\":\"4\",\"feedback\":\"Correct!\"}]}\n```";
        let quiz = parse_quiz_from_content(content).unwrap();
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].answer, "4");
        assert_eq!(quiz.intro_text.as_deref(), Some("Quiz de validation"));
    }

    #[test]
    fn bare_json_single_question() {
        let quiz = parse_quiz_from_content(
            r#"{"questions":[{"question":"Q1?","options":["A","B"],"answer":"A"}]}"#,
        )
        .unwrap();
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].answer, "A");
        assert_eq!(quiz.questions[0].correct_index, 0);
        assert_eq!(quiz.intro_text, None);
        assert!(quiz.warnings.is_empty());
    }

    #[test]
    fn question_text_with_correct_answer_string() {
        let content = json!({
            "questions": [{
                "question_text": "Quel est le bon verbe?",
                "question_type": "multiple_choice",
                "options": ["être", "avoir", "aller"],
                "correct_answer": "être",
                "feedback": "Être est correct."
            }]
        })
        .to_string();
        let quiz = parse_quiz_from_content(&content).unwrap();
        assert_eq!(quiz.questions[0].question, "Quel est le bon verbe?");
        assert_eq!(quiz.questions[0].answer, "être");
    }

    #[test]
    fn question_number_keeps_its_id() {
        let content = json!({
            "questions": [{
                "question_number": 1,
                "question_type": "multiple_choice",
                "question_text": "Que fait Anna?",
                "options": ["Elle mange", "Elle dort", "Elle travaille", "Elle chante"],
                "correct_answer": 3
            }]
        })
        .to_string();
        let quiz = parse_quiz_from_content(&content).unwrap();
        assert_eq!(quiz.questions[0].id, 1);
        assert_eq!(quiz.questions[0].correct_index, 3);
    }

    #[test]
    fn quiz_wrapper_key() {
        let content = json!({
            "quiz": [{ "question": "Comment dit-on hello?", "options": ["Bonjour", "Au revoir"], "answer": "Bonjour" }]
        })
        .to_string();
        let quiz = parse_quiz_from_content(&content).unwrap();
        assert_eq!(quiz.questions[0].question, "Comment dit-on hello?");
    }

    #[test]
    fn numbered_keys_keep_numeric_order() {
        let content = r#"{"1":{"question":"Second question?","options":["X","Y","Z"],"answer":"Z"},
                          "0":{"question":"First question?","options":["A","B","C"],"answer":"B"}}"#;
        let quiz = parse_quiz_from_content(content).unwrap();
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[0].question, "First question?");
        assert_eq!(quiz.questions[1].question, "Second question?");
        assert_eq!(quiz.questions[1].correct_index, 2);
    }

    #[test]
    fn french_apostrophe_survives_sanitizing() {
        let raw = r#"{"questions":[{"question":"L\'accent est important","options":["Oui","Non"],"answer":"Oui","feedback":"C\'est correct!"}]}"#;
        let content = format!("Quiz\n\n```json\n{raw}\n```");
        let quiz = parse_quiz_from_content(&content).unwrap();
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].question, "L'accent est important");
        assert_eq!(quiz.questions[0].feedback, "C'est correct!");
        assert_eq!(quiz.intro_text.as_deref(), Some("Quiz"));
    }

    #[test]
    fn empty_and_jsonless_content() {
        assert_eq!(parse_quiz_from_content(""), None);
        assert_eq!(parse_quiz_from_content("No JSON here at all"), None);
    }

    #[test]
    fn all_questions_dropped_is_a_failure() {
        let content = json!({ "questions": [{ "text": "" }] }).to_string();
        assert_eq!(parse_quiz_from_content(&content), None);
        assert_eq!(parse_quiz_from_content(r#"{"questions": []}"#), None);
        assert_eq!(parse_quiz_from_content(r#"{"title": "Pas un quiz"}"#), None);
    }

    #[test]
    fn unrepairable_json_is_a_failure() {
        assert_eq!(parse_quiz_from_content(r#"{"questions": [ {"question": } ]}"#), None);
    }

    #[test]
    fn one_bad_question_does_not_sink_the_batch() {
        let content = json!({
            "questions": [
                { "question": "  " },
                "stray string",
                { "question": "Kept?", "options": ["a", "b"], "answer": "b" }
            ]
        })
        .to_string();
        let quiz = parse_quiz_from_content(&content).unwrap();
        assert_eq!(quiz.questions.len(), 1);
        // position-based id still reflects the original array slot
        assert_eq!(quiz.questions[0].id, 3);
        assert_eq!(
            quiz.warnings,
            vec![
                NormalizeWarning::DroppedQuestion { position: 0 },
                NormalizeWarning::DroppedQuestion { position: 1 },
            ]
        );
    }

    #[test]
    fn sequential_ids_are_unique() {
        let content = json!({
            "questions": [
                { "question": "Q1?", "options": ["A", "B"], "answer": "A" },
                { "question": "Q2?", "options": ["C", "D"], "answer": "C" },
                { "question": "Q3?", "options": ["E", "F"], "answer": "E" }
            ]
        })
        .to_string();
        let ids: Vec<i64> = parse_quiz_from_content(&content)
            .unwrap()
            .questions
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_ids_are_reassigned() {
        let content = json!({
            "questions": [
                { "id": 5, "question": "A?" },
                { "id": 5, "question": "B?" },
                { "id": 7, "question": "C?" },
                { "id": 5, "question": "D?" }
            ]
        })
        .to_string();
        let quiz = parse_quiz_from_content(&content).unwrap();
        let ids: Vec<i64> = quiz.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![5, 1001, 7, 1003]);
        assert!(quiz.warnings.contains(&NormalizeWarning::ReassignedDuplicateId {
            position: 1,
            from: 5,
            to: 1001
        }));
    }

    #[test]
    fn reassigned_id_skips_taken_values() {
        let content = json!({
            "questions": [
                { "id": 1001, "question": "A?" },
                { "id": 1001, "question": "B?" }
            ]
        })
        .to_string();
        let ids: Vec<i64> = parse_quiz_from_content(&content)
            .unwrap()
            .questions
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![1001, 1002]);
    }

    #[test]
    fn json_embedded_in_markdown() {
        let content = "## Quiz de validation des acquis\n\nTestez vos connaissances!\n\n\
            {\"questions\":[{\"question\":\"Quel est le sujet?\",\"options\":[\"Je\",\"Tu\",\"Il\"],\"answer\":\"Je\",\"feedback\":\"Correct.\"}]}\n\n\
            Bonne chance!";
        let quiz = parse_quiz_from_content(content).unwrap();
        assert_eq!(quiz.questions.len(), 1);
        assert!(quiz.intro_text.unwrap().contains("Quiz de validation"));
    }

    #[test]
    fn fenced_top_level_array() {
        let content = "```json\n[{\"question\":\"Q1?\",\"answer\":\"oui\"},{\"question\":\"Q2?\",\"answer\":\"non\"}]\n```";
        let quiz = parse_quiz_from_content(content).unwrap();
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[1].id, 2);
    }

    #[test]
    fn plain_text_fallback_is_opt_in() {
        let content = "Quiz {broken\n1. Quel est le sujet ?\nA. Je\nB. Tu\nRéponse : A\n}";
        assert_eq!(parse_quiz_from_content(content), None);

        let opts = ParseOptions { plain_text_fallback: true };
        let quiz = parse_quiz_with(content, &opts).unwrap();
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].answer, "Je");
    }

    #[test]
    fn serializes_in_camel_case() {
        let quiz = parse_quiz_from_content(
            r#"Intro {"questions":[{"question":"Q?","type":"fill","answer":"x"}]}"#,
        )
        .unwrap();
        let v = serde_json::to_value(&quiz).unwrap();
        assert_eq!(
            v,
            json!({
                "questions": [{
                    "id": 1,
                    "type": "fill-in-the-blank",
                    "question": "Q?",
                    "options": [],
                    "answer": "x",
                    "correctIndex": -1,
                    "feedback": ""
                }],
                "introText": "Intro"
            })
        );
    }
}
