// Finding a JSON document embedded in lesson prose.

const FENCE_OPEN: &str = "```json";
const FENCE: &str = "```";

/// A JSON candidate cut out of freeform content, plus the prose before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentBlock<'a> {
    pub json: &'a str,
    pub intro: &'a str,
}

/// Cuts the JSON candidate out of `content`.
///
/// A ```` ```json ```` fence is preferred; otherwise the first `{` and its
/// balancing `}` delimit the candidate. Braces are counted blindly, strings
/// included. `None` when neither yields a candidate.
pub fn locate_json_block(content: &str) -> Option<ContentBlock<'_>> {
    fenced_block(content).or_else(|| braced_block(content))
}

fn fenced_block(content: &str) -> Option<ContentBlock<'_>> {
    let open = content.find(FENCE_OPEN)?;
    let after_tag = &content[open + FENCE_OPEN.len()..];
    let body = after_tag.trim_start();
    let close = body.find(FENCE)?;
    Some(ContentBlock {
        json: body[..close].trim(),
        intro: content[..open].trim(),
    })
}

fn braced_block(content: &str) -> Option<ContentBlock<'_>> {
    let start = content.find('{')?;
    let mut depth: i64 = 0;
    for (offset, b) in content.as_bytes()[start..].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => continue,
        }
        if depth == 0 {
            let end = start + offset;
            return Some(ContentBlock {
                json: &content[start..=end],
                intro: content[..start].trim(),
            });
        }
    }
    None
}
