use serde_json::Value;
use std::cmp::Ordering;

/// Historical layouts a question collection has been shipped in.
///
/// Strategies are tried in [`ExtractStrategy::ORDER`]; the first one that
/// matches wins. New layouts go at the end so older content keeps resolving
/// the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStrategy {
    /// `{ "questions": [...] }`
    ByQuestionsKey,
    /// `{ "quiz": [...] }`
    ByQuizKey,
    /// `{ "0": {...}, "1": {...} }`, or a bare top-level array
    ByNumericKeys,
}

impl ExtractStrategy {
    pub const ORDER: [ExtractStrategy; 3] = [
        ExtractStrategy::ByQuestionsKey,
        ExtractStrategy::ByQuizKey,
        ExtractStrategy::ByNumericKeys,
    ];

    /// `None` when this layout does not apply to `parsed`.
    pub fn apply<'a>(&self, parsed: &'a Value) -> Option<Vec<&'a Value>> {
        match self {
            ExtractStrategy::ByQuestionsKey => array_at(parsed, "questions"),
            ExtractStrategy::ByQuizKey => array_at(parsed, "quiz"),
            ExtractStrategy::ByNumericKeys => numeric_keys(parsed),
        }
    }
}

/// Locates the raw question values inside an arbitrarily shaped document.
pub fn extract_raw_questions(parsed: &Value) -> Vec<&Value> {
    extract_with_strategy(parsed)
        .map(|(_, questions)| questions)
        .unwrap_or_default()
}

/// Like [`extract_raw_questions`], also reporting which layout matched.
pub fn extract_with_strategy(parsed: &Value) -> Option<(ExtractStrategy, Vec<&Value>)> {
    ExtractStrategy::ORDER
        .iter()
        .find_map(|strategy| strategy.apply(parsed).map(|found| (*strategy, found)))
}

fn array_at<'a>(parsed: &'a Value, key: &str) -> Option<Vec<&'a Value>> {
    parsed
        .as_object()?
        .get(key)?
        .as_array()
        .map(|items| items.iter().collect())
}

fn numeric_keys(parsed: &Value) -> Option<Vec<&Value>> {
    let mut keyed: Vec<(String, &Value)> = match parsed {
        Value::Object(map) => map
            .iter()
            .filter(|(k, _)| is_numeric_key(k))
            .map(|(k, v)| (k.clone(), v))
            .collect(),
        Value::Array(items) => items.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
        _ => return None,
    };
    if keyed.is_empty() {
        return None;
    }

    keyed.sort_by(|(a, _), (b, _)| cmp_numeric(a, b));

    Some(
        keyed
            .into_iter()
            .map(|(_, v)| v)
            .filter(|v| v.is_object() || v.is_array())
            .collect(),
    )
}

fn is_numeric_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// Compares two digit strings by value, whatever their length.
///
/// Equal values put the shorter spelling first, so `"7"` sorts before `"07"`.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let (ta, tb) = (a.trim_start_matches('0'), b.trim_start_matches('0'));
    ta.len()
        .cmp(&tb.len())
        .then_with(|| ta.cmp(tb))
        .then_with(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn questions_of(values: Vec<&Value>) -> Vec<String> {
        values
            .into_iter()
            .map(|v| v["question"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn questions_key() {
        let parsed = json!({
            "questions": [
                { "question": "Q1", "options": ["A", "B"], "answer": "A" },
                { "question": "Q2", "options": ["C", "D"], "answer": "C" }
            ]
        });
        assert_eq!(extract_raw_questions(&parsed).len(), 2);
        assert_eq!(
            extract_with_strategy(&parsed).map(|(s, _)| s),
            Some(ExtractStrategy::ByQuestionsKey)
        );
    }

    #[test]
    fn quiz_key() {
        let parsed = json!({ "quiz": [{ "question": "Q1", "options": ["A", "B"], "answer": "A" }] });
        assert_eq!(extract_raw_questions(&parsed).len(), 1);
    }

    #[test]
    fn questions_key_wins_over_quiz_key() {
        let parsed = json!({
            "quiz": [{ "question": "from quiz" }],
            "questions": [{ "question": "from questions" }]
        });
        assert_eq!(questions_of(extract_raw_questions(&parsed)), vec!["from questions"]);
    }

    #[test]
    fn non_array_questions_falls_through() {
        let parsed = json!({ "questions": "none", "quiz": [{ "question": "Q" }] });
        assert_eq!(
            extract_with_strategy(&parsed).map(|(s, _)| s),
            Some(ExtractStrategy::ByQuizKey)
        );
    }

    #[test]
    fn numeric_keys_sort_by_value() {
        let mut map = serde_json::Map::new();
        for i in [10, 2, 9, 0, 1] {
            map.insert(i.to_string(), json!({ "question": format!("Q{i}") }));
        }
        map.insert("title".into(), json!({ "question": "ignored" }));
        let parsed = Value::Object(map);

        assert_eq!(
            questions_of(extract_raw_questions(&parsed)),
            vec!["Q0", "Q1", "Q2", "Q9", "Q10"]
        );
    }

    #[test]
    fn numeric_keys_drop_scalars() {
        let parsed = json!({ "0": { "question": "Q1" }, "1": "loose text", "2": null, "3": { "question": "Q3" } });
        assert_eq!(questions_of(extract_raw_questions(&parsed)), vec!["Q1", "Q3"]);
    }

    #[test]
    fn top_level_array_behaves_like_numeric_keys() {
        let parsed = json!([{ "question": "Q1" }, 5, { "question": "Q2" }]);
        assert_eq!(questions_of(extract_raw_questions(&parsed)), vec!["Q1", "Q2"]);
    }

    #[test]
    fn unrecognized_shape_is_empty() {
        assert!(extract_raw_questions(&json!({ "title": "Not a quiz", "body": "No questions here" })).is_empty());
        assert!(extract_raw_questions(&json!("text")).is_empty());
        assert!(extract_raw_questions(&json!(null)).is_empty());
    }

    #[test]
    fn huge_numeric_keys_do_not_overflow() {
        assert_eq!(cmp_numeric("99999999999999999999999", "100000000000000000000000"), Ordering::Less);
        assert_eq!(cmp_numeric("007", "7"), Ordering::Greater);
        assert_eq!(cmp_numeric("0", "00"), Ordering::Less);
        assert_eq!(cmp_numeric("10", "9"), Ordering::Greater);
    }

    #[test]
    fn zero_padded_key_follows_plain_key() {
        let parsed = json!({
            "07": { "question": "oh-seven" },
            "7": { "question": "seven" },
            "007": { "question": "double-oh-seven" },
            "6": { "question": "six" }
        });
        assert_eq!(
            questions_of(extract_raw_questions(&parsed)),
            vec!["six", "seven", "oh-seven", "double-oh-seven"]
        );
    }
}
