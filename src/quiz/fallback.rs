//! Last-resort reader for quizzes written as numbered plain text.
//!
//! ```text
//! 1. Quel est le sujet ?
//! A. Je
//! B. Tu
//! Réponse : A
//! ```
//!
//! Only reached when the embedded JSON is beyond repair and
//! [`ParseOptions::plain_text_fallback`](super::ParseOptions) is set.

use regex::Regex;
use std::sync::OnceLock;

use super::{NormalizedQuestion, ParsedQuiz, QuestionType};

struct Patterns {
    marker: Regex,
    question: Regex,
    option: Regex,
    answer: Regex,
}

static PATTERNS: OnceLock<Option<Patterns>> = OnceLock::new();

fn patterns() -> Option<&'static Patterns> {
    PATTERNS
        .get_or_init(|| {
            Some(Patterns {
                marker: Regex::new(r"[0-9]+[.)]\s").ok()?,
                question: Regex::new(r"[0-9]+[.)]\s*(.+?)(?:\n|$)").ok()?,
                option: Regex::new(r"[A-D][.)]\s*(.+?)(?:\n|$)").ok()?,
                answer: Regex::new(r"(?i)(?:correct|answer|réponse)[:\s]*([A-D])").ok()?,
            })
        })
        .as_ref()
}

/// Reads numbered questions with lettered options out of `content`.
///
/// A block needs at least two options to count. `None` when no block does.
pub fn extract_plain_text_questions(content: &str) -> Option<ParsedQuiz> {
    let p = patterns()?;
    let mut questions: Vec<NormalizedQuestion> = Vec::new();

    for block in split_numbered_blocks(content, &p.marker) {
        let Some(question) = p
            .question
            .captures(block)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|q| !q.is_empty())
        else {
            continue;
        };

        let options: Vec<String> = p
            .option
            .captures_iter(block)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect();
        if options.len() < 2 {
            continue;
        }

        let letter = p
            .answer
            .captures(block)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().chars().next())
            .map(|c| (c.to_ascii_uppercase() as usize).saturating_sub('A' as usize))
            .unwrap_or(0);
        let correct_index = if letter < options.len() { letter } else { 0 };

        questions.push(NormalizedQuestion {
            id: questions.len() as i64 + 1,
            kind: QuestionType::MultipleChoice,
            question,
            answer: options[correct_index].clone(),
            options,
            correct_index: correct_index as i64,
            feedback: String::new(),
        });
    }

    if questions.is_empty() {
        return None;
    }
    Some(ParsedQuiz {
        questions,
        intro_text: None,
        warnings: Vec::new(),
    })
}

/// Splits before every `N.`/`N)` marker followed by whitespace.
///
/// Each digit of a marker's number starts a block of its own, so `12. x`
/// yields `1` and `2. x`. One pass over `content`.
fn split_numbered_blocks<'a>(content: &'a str, marker: &Regex) -> Vec<&'a str> {
    let mut blocks = Vec::new();
    let mut last = 0;
    for m in marker.find_iter(content) {
        let digits = m.as_str().bytes().take_while(u8::is_ascii_digit).count();
        for i in m.start()..m.start() + digits {
            if i > last {
                blocks.push(&content[last..i]);
                last = i;
            }
        }
    }
    blocks.push(&content[last..]);
    blocks
}
