//! Display formatters for finding fields.
//!
//! Every function here is total: any JSON value (or its absence) maps to a
//! display string, never an error.

use serde_json::Value;

/// Format a raw claim value as Brazilian reais, e.g. `R$ 1.234,56`.
///
/// The value is coerced to a number first: numbers pass through, strings are
/// parsed after trimming, `true` is 1, and everything else (null, empty or
/// non-numeric strings, NaN, infinities) counts as 0.
pub fn format_currency(value: &Value) -> String {
    brl(coerce_number(value))
}

/// [`format_currency`] for a field that may be absent; absence counts as 0.
pub fn format_currency_opt(value: Option<&Value>) -> String {
    value.map_or_else(|| brl(0.0), format_currency)
}

fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

fn brl(n: f64) -> String {
    // Half cents round away from zero, as the page's locale formatting does.
    let cents = (n.abs() * 100.0).round();
    let int_part = format!("{:.0}", (cents / 100.0).trunc());
    let frac = (cents % 100.0) as u8;
    let sign = if n < 0.0 && cents > 0.0 { "-" } else { "" };
    format!("{sign}R$ {},{frac:02}", group_thousands(&int_part))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Severity tier of a risk label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskTier {
    /// Highest severity.
    Vermelho,
    Laranja,
    /// Default tier for anything unrecognised.
    Amarelo,
}

impl RiskTier {
    /// Case-insensitive exact match against the two named tiers.
    pub fn classify(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "vermelho" => Self::Vermelho,
            "laranja" => Self::Laranja,
            _ => Self::Amarelo,
        }
    }

    /// Stylesheet class for the badge.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Vermelho => "vermelho",
            Self::Laranja => "laranja",
            Self::Amarelo => "amarelo",
        }
    }
}

/// A rendered risk badge: tier class plus the label as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskBadge {
    pub tier: RiskTier,
    pub text: String,
}

/// Badge for a risk label; an absent label gets the default tier and no text.
pub fn risk_badge(label: Option<&str>) -> RiskBadge {
    let text = label.unwrap_or_default();
    RiskBadge {
        tier: RiskTier::classify(text),
        text: text.to_string(),
    }
}

/// Text for a field that falls back to empty when missing.
///
/// Null, `false`, zero and empty strings all render empty, matching how the
/// page has always shown blank spreadsheet cells.
pub fn display_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(other) => verbatim_text(Some(other)),
    }
}

/// Text for a field shown as-is; only absence and null render empty.
pub fn verbatim_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

fn number_text(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        // Whole floats print without a trailing ".0".
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => format!("{f}"),
        None => n.to_string(),
    }
}
