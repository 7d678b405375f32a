//! Raw cell values and units

use serde::{Deserialize, Serialize};

/// Placeholder cell contents for unpublished results
const PLACEHOLDERS: &[&str] =
    &["wip", "tbd", "todo", "n/a", "na", "-", "--", "pending", "coming soon", "unpublished"];

/// One cell of a raw source row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    /// JSON `null`
    Empty,
}

impl RawValue {
    /// Trimmed text, or `None` for numbers and empty cells
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s.trim()),
            _ => None,
        }
    }

    /// Cell is absent or whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::Number(_) => false,
        }
    }

    /// Cell holds a work-in-progress marker such as `WIP` or `N/A`
    pub fn is_placeholder(&self) -> bool {
        self.as_text().is_some_and(|s| PLACEHOLDERS.contains(&s.to_lowercase().as_str()))
    }

    /// Cell rendered as a plain string
    pub fn to_text(&self) -> String {
        match self {
            RawValue::Number(v) => v.to_string(),
            RawValue::Text(s) => s.trim().to_string(),
            RawValue::Empty => String::new(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// Unit marker carried by a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricUnit {
    /// Canonical value, taken as-is (percentages already in [0, 1])
    Fraction,
    /// Raw percentage (`76.87%`)
    Percent,
    /// Multiplier (`2.5x`)
    Ratio,
}

/// A parsed number with its optional unit marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricValue {
    pub value: f64,
    pub unit: Option<MetricUnit>,
}

impl MetricValue {
    pub fn new(value: f64, unit: Option<MetricUnit>) -> Self {
        Self { value, unit }
    }
}

/// Parse a raw cell into a number.
///
/// Returns `Ok(None)` for blank cells and `Err(text)` for text that is not a
/// number. Non-finite numbers are returned as-is; rejecting them is the
/// validator's job. A trailing `%` yields [`MetricUnit::Percent`], a trailing
/// `x` yields [`MetricUnit::Ratio`], and thousands separators are ignored.
pub fn parse_value(raw: &RawValue) -> std::result::Result<Option<MetricValue>, String> {
    match raw {
        RawValue::Empty => Ok(None),
        RawValue::Number(v) => Ok(Some(MetricValue::new(*v, None))),
        RawValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }

            let (body, unit) = if let Some(body) = trimmed.strip_suffix('%') {
                (body, Some(MetricUnit::Percent))
            } else if let Some(body) =
                trimmed.strip_suffix('x').or_else(|| trimmed.strip_suffix('X'))
            {
                (body, Some(MetricUnit::Ratio))
            } else {
                (trimmed, None)
            };

            let cleaned: String = body.trim().chars().filter(|c| *c != ',').collect();
            cleaned
                .parse::<f64>()
                .map(|v| Some(MetricValue::new(v, unit)))
                .map_err(|_| trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        let parsed = parse_value(&RawValue::Number(76.87)).unwrap().unwrap();
        assert_eq!(parsed.value, 76.87);
        assert_eq!(parsed.unit, None);
    }

    #[test]
    fn test_parse_percent_text() {
        let parsed = parse_value(&"-0.87%".into()).unwrap().unwrap();
        assert!((parsed.value + 0.87).abs() < 1e-12);
        assert_eq!(parsed.unit, Some(MetricUnit::Percent));
    }

    #[test]
    fn test_parse_ratio_text() {
        let parsed = parse_value(&"2.51x".into()).unwrap().unwrap();
        assert!((parsed.value - 2.51).abs() < 1e-12);
        assert_eq!(parsed.unit, Some(MetricUnit::Ratio));
    }

    #[test]
    fn test_parse_thousands_separator() {
        let parsed = parse_value(&" 1,234.5 ".into()).unwrap().unwrap();
        assert!((parsed.value - 1234.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(parse_value(&RawValue::Empty).unwrap(), None);
        assert_eq!(parse_value(&"   ".into()).unwrap(), None);
    }

    #[test]
    fn test_parse_non_finite_text_is_a_number() {
        let parsed = parse_value(&"NaN".into()).unwrap().unwrap();
        assert!(parsed.value.is_nan());
        let parsed = parse_value(&"inf".into()).unwrap().unwrap();
        assert!(parsed.value.is_infinite());
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_value(&"fast".into()), Err("fast".to_string()));
    }

    #[test]
    fn test_placeholders() {
        assert!(RawValue::from("WIP").is_placeholder());
        assert!(RawValue::from(" n/a ").is_placeholder());
        assert!(RawValue::from("Coming Soon").is_placeholder());
        assert!(!RawValue::from("76.2").is_placeholder());
        assert!(!RawValue::Number(1.0).is_placeholder());
    }

    #[test]
    fn test_raw_value_from_json() {
        let values: Vec<RawValue> = serde_json::from_str(r#"[1.5, "WIP", null]"#).unwrap();
        assert_eq!(values, vec![RawValue::Number(1.5), "WIP".into(), RawValue::Empty]);
    }
}
