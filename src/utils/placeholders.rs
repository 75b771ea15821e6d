use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static BRACKETED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{\{[^{}]*?\[\s*"([^"]+)"\s*\][^{}]*?\}\}"#).expect("bracketed placeholder regex")
});

static BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("bare placeholder regex"));

#[derive(Debug)]
enum Segment {
    Literal(String),
    Resolved(String),
    Unresolved(String),
}

fn substitute_pass<F>(
    segments: Vec<Segment>,
    pattern: &Regex,
    lookup: &F,
    missing: &mut Vec<String>,
) -> Vec<Segment>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        let Segment::Literal(text) = segment else {
            out.push(segment);
            continue;
        };
        let mut last = 0;
        for caps in pattern.captures_iter(&text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > last {
                out.push(Segment::Literal(text[last..whole.start()].to_string()));
            }
            let name = name.as_str().trim();
            match lookup(name) {
                Some(value) => out.push(Segment::Resolved(value)),
                None => {
                    if !missing.iter().any(|m| m == name) {
                        missing.push(name.to_string());
                    }
                    out.push(Segment::Unresolved(whole.as_str().to_string()));
                }
            }
            last = whole.end();
        }
        if last < text.len() {
            out.push(Segment::Literal(text[last..].to_string()));
        }
    }
    out
}

/// Replaces every placeholder in `template` using `lookup`. The bracketed
/// `{{$parameter["x"]}}` pass runs first; its output is never rescanned.
///
/// Returns the names without a value (in order of appearance) when any
/// placeholder stays unresolved.
pub fn substitute<F>(template: &str, lookup: F) -> Result<String, Vec<String>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing = Vec::new();
    let segments = vec![Segment::Literal(template.to_string())];
    let segments = substitute_pass(segments, &BRACKETED, &lookup, &mut missing);
    let segments = substitute_pass(segments, &BARE, &lookup, &mut missing);
    if !missing.is_empty() {
        return Err(missing);
    }
    Ok(segments
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) | Segment::Resolved(text) | Segment::Unresolved(text) => text,
        })
        .collect())
}

/// Rewrites bracketed placeholders into the bare `{name}` form.
pub fn canonicalize(template: &str) -> String {
    BRACKETED.replace_all(template, "{$1}").into_owned()
}

pub fn placeholder_names(template: &str) -> Vec<String> {
    let canonical = canonicalize(template);
    let mut names: Vec<String> = Vec::new();
    for caps in BARE.captures_iter(&canonical) {
        if let Some(name) = caps.get(1) {
            let name = name.as_str().trim().to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// String form of a parameter value inside a URL path; null and "" count as absent.
pub fn render_path_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(num) => Some(num.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        other => serde_json::to_string(other).ok(),
    }
}

/// Percent-encodes one path segment. Dot segments cannot be encoded away.
pub fn encode_path_segment(raw: &str) -> Option<String> {
    match raw {
        "." | ".." => None,
        _ => Some(urlencoding::encode(raw).into_owned()),
    }
}
