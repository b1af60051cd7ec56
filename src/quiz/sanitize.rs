// Repairs for almost-valid JSON pasted out of chat tools and word processors.

/// Targets a backslash may legally escape in JSON.
fn is_json_escape(c: char) -> bool {
    matches!(c, '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' | 'u')
}

/// Makes a candidate JSON string more likely to parse.
///
/// Drops over-escaped single quotes (`\'`, common around French apostrophes),
/// drops the backslash of any escape JSON does not know, and strips raw
/// control characters other than newline, carriage return and tab. The
/// result is never longer than the input and is not guaranteed to be valid.
pub fn sanitize_json_string(raw: &str) -> String {
    let unquoted = raw.replace("\\'", "'");

    let mut out = String::with_capacity(unquoted.len());
    let mut chars = unquoted.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(&next) if !is_json_escape(next) => {
                    // keep the escaped char, lose the backslash
                    out.push(next);
                    chars.next();
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }

    out.retain(|c| !is_stray_control(c));
    out
}

fn is_stray_control(c: char) -> bool {
    match c {
        '\n' | '\r' | '\t' => false,
        '\u{0}'..='\u{1f}' | '\u{7f}' => true,
        _ => false,
    }
}
