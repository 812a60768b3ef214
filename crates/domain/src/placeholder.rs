//! `{{placeholder}}` rendering for action configuration strings.
//!
//! Grammar: `{{`, optional spaces, an identifier path, optional spaces, `}}`.
//! An identifier path is one or more segments `[A-Za-z_][A-Za-z0-9_]*`
//! joined by `.`. Lookup is case-sensitive. There is no nesting and no
//! escaping; any `{{` that does not open a well-formed token is literal text
//! and scanning resumes one byte later, so `{{{name}}}` renders as `{Ann}`.
//!
//! A token is replaced only when its path resolves to a string, number or
//! boolean in the context. Anything else (missing, `null`, object, array)
//! leaves the token untouched so unresolved placeholders stay visible.

use serde_json::Value;

/// Resolve a dot-separated path (`donation.amount`) inside a JSON value.
///
/// Returns `None` when any segment is missing or traverses a non-object.
#[must_use]
pub fn resolve<'a>(context: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(context, |current, segment| current.as_object()?.get(segment))
}

/// Substitute every resolvable `{{token}}` in `template` from `context`.
#[must_use]
pub fn render_template(template: &str, context: &Value) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start..];
        match parse_token(after_open) {
            Some((path, len)) => {
                match resolve(context, path).and_then(scalar_text) {
                    Some(text) => out.push_str(&text),
                    None => out.push_str(&after_open[..len]),
                }
                rest = &after_open[len..];
            }
            None => {
                out.push('{');
                rest = &after_open[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// List the identifier paths of every well-formed token, in order of
/// appearance. Duplicates are kept.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after_open = &rest[start..];
        if let Some((path, len)) = parse_token(after_open) {
            found.push(path);
            rest = &after_open[len..];
        } else {
            rest = &after_open[1..];
        }
    }
    found
}

/// Render every string inside a JSON tree, leaving keys and non-string
/// leaves untouched.
#[must_use]
pub fn render_value(value: &Value, context: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(render_template(s, context)),
        Value::Array(items) => Value::Array(items.iter().map(|v| render_value(v, context)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), render_value(v, context)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Collect the placeholders of every string inside a JSON tree.
pub fn collect_placeholders<'a>(value: &'a Value, into: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => into.extend(placeholders(s)),
        Value::Array(items) => items.iter().for_each(|v| collect_placeholders(v, into)),
        Value::Object(map) => map.values().for_each(|v| collect_placeholders(v, into)),
        _ => {}
    }
}

/// Parse a token at the start of `input` (which begins with `{{`).
///
/// Returns the trimmed identifier path and the byte length of the whole
/// token including braces.
fn parse_token(input: &str) -> Option<(&str, usize)> {
    let body_start = 2;
    let close = input[body_start..].find("}}")? + body_start;
    let inner = &input[body_start..close];
    let path = inner.trim_matches(' ');
    if is_identifier_path(path) {
        Some((path, close + 2))
    } else {
        None
    }
}

fn is_identifier_path(path: &str) -> bool {
    !path.is_empty() && path.split('.').all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
