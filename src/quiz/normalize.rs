use serde_json::Value;

use super::raw::{format_f64, RawQuestion};
use super::{NormalizeWarning, NormalizedQuestion, QuestionType};

/// Maps one raw question onto the canonical record.
///
/// Returns `None` only when the question has no text. Every other oddity
/// (missing answer, 1-based indices, unusable id) is absorbed.
pub fn normalize_question(raw: &Value, position: usize) -> Option<NormalizedQuestion> {
    normalize_question_with(raw, position, &mut Vec::new())
}

/// Same as [`normalize_question`], recording every guess it had to make.
pub fn normalize_question_with(
    raw: &Value,
    position: usize,
    warnings: &mut Vec<NormalizeWarning>,
) -> Option<NormalizedQuestion> {
    let Some(q) = RawQuestion::from_value(raw) else {
        warnings.push(NormalizeWarning::DroppedQuestion { position });
        return None;
    };

    let question = q.resolve_text();
    if question.is_empty() {
        warnings.push(NormalizeWarning::DroppedQuestion { position });
        return None;
    }

    let options = q.resolve_options();
    let kind = QuestionType::classify(&q.resolve_type());
    let (answer, correct_index) = resolve_answer(&q, &options, position, warnings);
    let feedback = q.resolve_feedback();

    let id = match q.resolve_id() {
        Some(id) => id,
        None => {
            if q.field("id").or(q.field("question_number")).is_present() {
                warnings.push(NormalizeWarning::DefaultedId { position });
            }
            position as i64 + 1
        }
    };

    Some(NormalizedQuestion {
        id,
        kind,
        question,
        options,
        answer,
        correct_index,
        feedback,
    })
}

fn resolve_answer(
    q: &RawQuestion<'_>,
    options: &[String],
    position: usize,
    warnings: &mut Vec<NormalizeWarning>,
) -> (String, i64) {
    let len = options.len() as f64;
    let mut answer = String::new();
    let mut correct_index = -1;

    let given = q.answer();
    let correct = q.correct_answer();

    if given.is_present() {
        if let Some(n) = given.as_number() {
            // `answer` as an index: past the end means it was probably 1-based
            let mut idx = n;
            if idx >= len && idx > 0.0 {
                idx -= 1.0;
                warnings.push(NormalizeWarning::OneBasedIndexAdjusted { position });
            }
            (answer, correct_index) = pick_option(options, idx, n);
        } else {
            answer = given.coerce_string().trim().to_string();
            correct_index = exact_match(options, &answer);
            if correct_index == -1 && !options.is_empty() {
                correct_index = partial_match(options, &answer);
                if correct_index != -1 {
                    warnings.push(NormalizeWarning::PartialAnswerMatch { position });
                }
            }
        }
    } else if correct.is_present() {
        if let Some(v) = correct.as_number() {
            // unlike `answer`, an in-range value is always taken as 0-based
            let idx = if v >= 0.0 && v < len {
                v
            } else if v >= 1.0 && v <= len {
                warnings.push(NormalizeWarning::OneBasedIndexAdjusted { position });
                v - 1.0
            } else {
                warnings.push(NormalizeWarning::DefaultedAnswer { position });
                0.0
            };
            (answer, correct_index) = pick_option(options, idx, v);
        } else {
            answer = correct.coerce_string().trim().to_string();
            correct_index = exact_match(options, &answer);
        }
    }

    if !options.is_empty() && !(0..options.len() as i64).contains(&correct_index) {
        correct_index = 0;
        answer = options[0].clone();
        warnings.push(NormalizeWarning::DefaultedAnswer { position });
    }

    (answer, correct_index)
}

/// Looks up `options[idx]`, falling back to the original number as text.
fn pick_option(options: &[String], idx: f64, original: f64) -> (String, i64) {
    if idx.fract() != 0.0 {
        return (format_f64(original), -1);
    }
    let idx = idx as i64;
    let text = usize::try_from(idx)
        .ok()
        .and_then(|i| options.get(i))
        .cloned()
        .unwrap_or_else(|| format_f64(original));
    (text, idx)
}

fn exact_match(options: &[String], answer: &str) -> i64 {
    let wanted = answer.trim().to_lowercase();
    options
        .iter()
        .position(|o| o.trim().to_lowercase() == wanted)
        .map_or(-1, |i| i as i64)
}

fn partial_match(options: &[String], answer: &str) -> i64 {
    let wanted = answer.to_lowercase();
    options
        .iter()
        .position(|o| {
            let o = o.to_lowercase();
            o.contains(&wanted) || wanted.contains(&o)
        })
        .map_or(-1, |i| i as i64)
}
