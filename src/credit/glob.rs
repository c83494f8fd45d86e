//! Glob-to-regex translation for query pathspecs.
//!
//! Shell glob semantics restricted to a single path segment: `*` and `?`
//! never cross a `/`. Bracket expressions support `!` negation; an
//! unterminated `[` is taken literally.

use regex::Regex;

/// Translate a glob pattern into an anchored regular expression.
pub fn compile_glob(pattern: &str) -> Result<Regex, regex::Error> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from(r"\A");
    let mut pos = 0;

    while pos < chars.len() {
        let (expression, next) = compile_expression(&chars, pos);
        out.push_str(&expression);
        pos = next;
    }

    out.push_str(r"\z");
    Regex::new(&out)
}

/// Compile one glob expression starting at `pos`.
fn compile_expression(pattern: &[char], pos: usize) -> (String, usize) {
    let character = pattern[pos];
    let pos = pos + 1;

    match character {
        '*' => ("[^/]*".to_string(), pos),
        '?' => ("[^/]".to_string(), pos),
        '[' => compile_character_class(pattern, pos),
        c => (regex::escape(&c.to_string()), pos),
    }
}

/// Compile a bracket expression; `pos` points just past the opening `[`.
///
/// Returns the original position when the class is unterminated so the
/// caller re-scans the remainder with `[` as a literal.
fn compile_character_class(pattern: &[char], pos: usize) -> (String, usize) {
    let start = pos;
    let end = pattern.len();
    let mut pos = pos;

    if pos < end && pattern[pos] == '!' {
        pos += 1;
    }
    if pos < end && pattern[pos] == ']' {
        pos += 1;
    }
    while pos < end && pattern[pos] != ']' {
        pos += 1;
    }
    if pos >= end {
        return (r"\[".to_string(), start);
    }

    let cclass: String = pattern[start..pos].iter().collect::<String>().replace('\\', "\\\\");
    pos += 1;

    let (negation, body) = match cclass.strip_prefix('!') {
        Some(rest) => ("^", rest),
        None => ("", cclass.as_str()),
    };
    // A leading `]` or `^` is literal in glob syntax; escape it for the regex.
    let body = if let Some(rest) = body.strip_prefix(']') {
        format!("\\]{rest}")
    } else if negation.is_empty() && body.starts_with('^') {
        format!("\\{body}")
    } else {
        body.to_string()
    };

    (format!("[{negation}{body}]"), pos)
}
