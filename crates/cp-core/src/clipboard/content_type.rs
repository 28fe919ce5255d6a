use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Category of a captured text payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    Url,
    Email,
    Phone,
    Json,
    ColorHex,
    Plain,
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$").expect("valid email regex")
});

static COLOR_HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color regex"));

const PHONE_SYMBOLS: &str = "0123456789 +-()";

/// Classifies text into exactly one [`ContentType`].
///
/// Checks run in a fixed order and the first match wins:
/// URL, email, phone, JSON, hex colour, plain.
pub fn classify_content(text: &str) -> ContentType {
    if is_url(text) {
        ContentType::Url
    } else if EMAIL_RE.is_match(text) {
        ContentType::Email
    } else if is_phone(text) {
        ContentType::Phone
    } else if is_json(text) {
        ContentType::Json
    } else if COLOR_HEX_RE.is_match(text) {
        ContentType::ColorHex
    } else {
        ContentType::Plain
    }
}

fn is_url(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn is_phone(text: &str) -> bool {
    if text.chars().any(char::is_alphabetic) {
        return false;
    }
    let digits = text.chars().filter(|c| c.is_numeric()).count();
    (7..=15).contains(&digits) && text.chars().all(|c| PHONE_SYMBOLS.contains(c))
}

fn is_json(text: &str) -> bool {
    let trimmed = text.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return false;
    }
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}
