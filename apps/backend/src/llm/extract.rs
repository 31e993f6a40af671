//! Locate JSON embedded in free-form model output.
//!
//! Models often wrap the requested JSON in prose or code fences. These
//! helpers find the first balanced object/array, skipping brackets that
//! appear inside string literals.

/// First balanced `{...}` in `text`.
pub fn first_json_object(text: &str) -> Option<&str> {
    first_balanced(text, '{', '}')
}

/// First balanced `[...]` in `text`.
pub fn first_json_array(text: &str) -> Option<&str> {
    first_balanced(text, '[', ']')
}

fn first_balanced(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let body = &text[start..];

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            c if c == open => depth += 1,
            c if c == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(&body[..i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
