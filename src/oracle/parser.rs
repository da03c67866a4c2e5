// Oracle output parser
//
// The model is asked for JSON but nothing enforces it. Each field is recovered
// on its own: first from an embedded JSON object, then from labelled text
// ("Themes in Text 1: ...", "Similarity score: 82%", numbered suggestion
// lists). A field that cannot be found stays unavailable without affecting the
// others.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::types::{Availability, OracleResponse};

/// Score keyword, whole words only ("similarity_score" yes, "dissimilarity" no)
const SCORE_LABEL: &str =
    r"\b(?:semantic[ _-]?similarity(?:[ _-]?score)?|similarity[ _-]?score|similarity|score)\b";

/// Optional range hint after the label: "(0-1)", "(0.0 to 1.0)", "(overall)",
/// "from 0 to 1", "on a scale of 0 to 1"
const RANGE_HINT: &str = r"(?:\s*\((?:\s*\d+(?:\.\d+)?\s*(?:-|–|to)\s*\d+(?:\.\d+)?\s*|[^)\d]*)\)|\s+(?:from|between|on\s+a\s+scale\s+of)\s+\d+(?:\.\d+)?\s*(?:-|–|to|and)\s*\d+(?:\.\d+)?)?";

/// The number plus an optional "%", "/N" or "out of N"
const SCORE_VALUE: &str =
    r"(\d+(?:\.\d+)?|\.\d+)(?:\s*(%|/\s*\d+(?:\.\d+)?|out\s+of\s+\d+(?:\.\d+)?))?";

/// "Similarity score: 0.82", "**Semantic Similarity (0.0 to 1.0):** 82%", "score = 4/5"
static SCORE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"(?i){SCORE_LABEL}{RANGE_HINT}[\s*"'`]*[:=][\s*"'`]*{SCORE_VALUE}"#
    ))
    .expect("Failed to compile score regex")
});

/// Unpunctuated form: "similarity is about 0.8", "overall score 4/5"
///
/// At least one separator before the number, so digits of a range hint can
/// never be split into a score. The word after the number is captured so prose
/// like "similarity of 3 themes" can be told apart from a score.
static LOOSE_SCORE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"(?i){SCORE_LABEL}{RANGE_HINT}(?:\s+(?:is|of|at|about|around|approximately|roughly)\b)*[\s*"'`\-–]+{SCORE_VALUE}[ \t]*([a-z]+)?"#
    ))
    .expect("Failed to compile loose score regex")
});

/// Words that may follow a loose score without turning it into a count
const SCORE_FOLLOWERS: &[&str] = &[
    "and", "as", "because", "given", "indicates", "indicating", "meaning", "overall",
    "reflecting", "showing", "shows", "since", "suggesting", "suggests", "which", "with",
];

static THEMES_TEXT1_REGEX: Lazy<Regex> = Lazy::new(|| theme_label("1|one|a"));
static THEMES_TEXT2_REGEX: Lazy<Regex> = Lazy::new(|| theme_label("2|two|b"));

static STYLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    label(r"(?:writing\s+)?styles?(?:\s+comparison)?\b")
});

static SUGGESTIONS_REGEX: Lazy<Regex> = Lazy::new(|| {
    label(r"(?:improvement\s+)?suggestions?(?:\s+for\s+improvement)?\b|recommendations?\b")
});

static INSIGHTS_REGEX: Lazy<Regex> = Lazy::new(|| label(r"(?:key\s+)?insights?\b"));

static DIFFERENCES_REGEX: Lazy<Regex> = Lazy::new(|| label(r"(?:key\s+)?differences?\b"));

/// Bullet or numbered list item: "- foo", "* foo", "• foo", "1. foo", "2) foo"
static BULLET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+(.+)$").expect("Failed to compile bullet regex")
});

/// Label at the start of a line, allowing markdown/bullet decoration and a numbered prefix
fn label(names: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)^[\s*#>\-]*(?:\d+[.)]\s*)?\**\s*(?:{names})\s*\**\s*[:\-–]?\s*\**"
    ))
    .expect("Failed to compile label regex")
}

/// "Themes in Text 1:", "Main topics (text one):", "Text 1 themes -"
fn theme_label(index: &str) -> Regex {
    let themes = r"(?:main\s+|key\s+)?(?:themes?|topics?)";
    label(&format!(
        r"{themes}\s+(?:in|of|for)\s+text\s*(?:{index})\b|{themes}\s*\(\s*text\s*(?:{index})\s*\)|text\s*(?:{index})\s+{themes}\b"
    ))
}

/// Parse raw oracle output into an `OracleResponse`
///
/// Never fails: unrecoverable fields are marked unavailable.
pub fn parse_oracle_output(raw: &str) -> OracleResponse {
    let from_json = extract_json_object(raw)
        .map(|object| parse_json_fields(&object))
        .unwrap_or_default();

    let from_text = OracleResponse {
        semantic_similarity: score_from_text(raw).into(),
        themes_text1: list_section(raw, &THEMES_TEXT1_REGEX).into(),
        themes_text2: list_section(raw, &THEMES_TEXT2_REGEX).into(),
        writing_style_comparison: prose_section(raw, &STYLE_REGEX).into(),
        suggestions: list_section(raw, &SUGGESTIONS_REGEX).into(),
        insights: prose_section(raw, &INSIGHTS_REGEX).into(),
        key_differences: prose_section(raw, &DIFFERENCES_REGEX).into(),
    };

    let response = OracleResponse {
        semantic_similarity: from_json.semantic_similarity.or(from_text.semantic_similarity),
        themes_text1: from_json.themes_text1.or(from_text.themes_text1),
        themes_text2: from_json.themes_text2.or(from_text.themes_text2),
        writing_style_comparison: from_json
            .writing_style_comparison
            .or(from_text.writing_style_comparison),
        suggestions: from_json.suggestions.or(from_text.suggestions),
        insights: from_json.insights.or(from_text.insights),
        key_differences: from_json.key_differences.or(from_text.key_differences),
    };

    if !response.has_content() {
        tracing::warn!(len = raw.len(), "Nothing recoverable in oracle output");
    } else if !response.semantic_similarity.is_available() {
        tracing::debug!("Oracle output has no recognizable score");
    }

    response
}

/// Decode the outermost `{ ... }` span, if it is a JSON object
fn extract_json_object(raw: &str) -> Option<Map<String, Value>> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }

    match serde_json::from_str::<Value>(&raw[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Embedded JSON did not parse: {}", e);
            None
        }
    }
}

fn parse_json_fields(object: &Map<String, Value>) -> OracleResponse {
    let field = |names: &[&str]| names.iter().find_map(|name| object.get(*name));

    OracleResponse {
        semantic_similarity: field(&["semantic_similarity", "similarity_score", "similarity", "score"])
            .and_then(json_score)
            .into(),
        themes_text1: field(&["themes_text1", "themes_text_1", "text1_themes"])
            .and_then(json_list)
            .into(),
        themes_text2: field(&["themes_text2", "themes_text_2", "text2_themes"])
            .and_then(json_list)
            .into(),
        writing_style_comparison: field(&["writing_style_comparison", "style_comparison", "writing_style"])
            .and_then(json_text)
            .into(),
        suggestions: field(&["suggestions", "improvement_suggestions"])
            .and_then(json_list)
            .into(),
        insights: field(&["insights"]).and_then(json_text).into(),
        key_differences: field(&["key_differences", "differences"])
            .and_then(json_text)
            .into(),
    }
}

fn json_score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().and_then(|v| normalize_score(v, None)),
        Value::String(s) => score_from_text(&format!("score: {}", s)),
        _ => None,
    }
}

fn json_list(value: &Value) -> Option<Vec<String>> {
    let items: Vec<String> = match value {
        Value::Array(values) => values
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(clean_item(s)),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(s) => split_items(s),
        _ => return None,
    };

    let items: Vec<String> = items.into_iter().filter(|s| !s.is_empty()).collect();
    (!items.is_empty()).then_some(items)
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Array(_) => json_list(value).map(|items| items.join("; ")),
        _ => None,
    }
}

/// Labelled score in free text
///
/// A number after ":" or "=" wins over one that merely follows the label.
fn score_from_text(raw: &str) -> Option<f64> {
    SCORE_REGEX
        .captures_iter(raw)
        .find_map(|caps| score_from_captures(&caps))
        .or_else(|| {
            LOOSE_SCORE_REGEX.captures_iter(raw).find_map(|caps| {
                if let Some(word) = caps.get(3) {
                    let word = word.as_str().to_lowercase();
                    if !SCORE_FOLLOWERS.contains(&word.as_str()) {
                        return None;
                    }
                }
                score_from_captures(&caps)
            })
        })
}

fn score_from_captures(caps: &regex::Captures<'_>) -> Option<f64> {
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    normalize_score(value, caps.get(2).map(|m| m.as_str()))
}

/// Map a raw number onto [0, 1]
///
/// `%` reads as a percentage, "x/N" and "x out of N" divide by N; anything
/// else is clamped.
fn normalize_score(value: f64, suffix: Option<&str>) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }

    let scaled = match suffix.map(str::trim) {
        None => value,
        Some("%") => value / 100.0,
        Some(fraction) => {
            let denominator: f64 = fraction
                .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.')
                .parse()
                .ok()?;
            if denominator <= 0.0 {
                return None;
            }
            value / denominator
        }
    };

    Some(scaled.clamp(0.0, 1.0))
}

/// Text following a label: the rest of its line plus the lines under it
struct Section {
    inline: String,
    body: Vec<String>,
}

fn find_section(raw: &str, label: &Regex) -> Option<Section> {
    let lines: Vec<&str> = raw.lines().collect();

    for (idx, line) in lines.iter().enumerate() {
        let Some(m) = label.find(line) else {
            continue;
        };

        let inline = line[m.end()..].trim().trim_matches('*').trim().to_string();

        let mut body = Vec::new();
        let mut in_list = false;
        for next in lines.iter().skip(idx + 1) {
            let trimmed = next.trim();
            if trimmed.is_empty() {
                if body.is_empty() {
                    continue;
                }
                break;
            }

            let is_bullet = BULLET_REGEX.is_match(next);
            if body.is_empty() {
                in_list = is_bullet;
            } else if in_list != is_bullet {
                break;
            }
            // Another heading
            if !in_list && trimmed.ends_with(':') {
                break;
            }
            body.push(trimmed.to_string());
        }

        return Some(Section { inline, body });
    }

    None
}

fn list_section(raw: &str, label: &Regex) -> Option<Vec<String>> {
    let section = find_section(raw, label)?;

    let items = if !section.inline.is_empty() {
        split_items(&section.inline)
    } else {
        section
            .body
            .iter()
            .map(|line| match BULLET_REGEX.captures(line) {
                Some(caps) => clean_item(&caps[1]),
                None => clean_item(line),
            })
            .collect()
    };

    let items: Vec<String> = items.into_iter().filter(|s| !s.is_empty()).collect();
    (!items.is_empty()).then_some(items)
}

fn prose_section(raw: &str, label: &Regex) -> Option<String> {
    let section = find_section(raw, label)?;

    let text = if !section.inline.is_empty() {
        section.inline
    } else {
        section.body.join(" ")
    };

    let text = text.trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Split "a, b; c" or a multi-line numbered list into items
fn split_items(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() > 1 {
        return lines
            .iter()
            .map(|line| match BULLET_REGEX.captures(line) {
                Some(caps) => clean_item(&caps[1]),
                None => clean_item(line),
            })
            .collect();
    }

    text.split([',', ';']).map(clean_item).collect()
}

fn clean_item(item: &str) -> String {
    item.trim()
        .trim_matches(|c: char| c == '*' || c == '"' || c == '`')
        .trim()
        .trim_end_matches('.')
        .to_string()
}
