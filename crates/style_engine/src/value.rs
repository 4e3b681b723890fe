//! Declaration value coercion.

/// A parsed declaration value: either numeric or an uninterpreted keyword.
///
/// Percentages stay keywords (`"50%"`); the layout engine resolves them
/// against a containing box when one is known.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Number(f32),
    Keyword(String),
}

impl StyleValue {
    pub fn as_number(&self) -> Option<f32> {
        match self {
            StyleValue::Number(value) => Some(*value),
            StyleValue::Keyword(_) => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            StyleValue::Number(_) => None,
            StyleValue::Keyword(text) => Some(text),
        }
    }

    /// Render the value back to declaration text.
    pub fn to_text(&self) -> String {
        match self {
            StyleValue::Number(value) => {
                if value.fract() == 0.0 {
                    format!("{}", *value as i64)
                } else {
                    format!("{value}")
                }
            }
            StyleValue::Keyword(text) => text.clone(),
        }
    }
}

/// True for a plain signed decimal: `-?\d+(\.\d+)?`.
fn is_plain_number(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() {
        return false;
    }
    let mut parts = digits.splitn(2, '.');
    let integer = parts.next().unwrap_or("");
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(integer) {
        return false;
    }
    match parts.next() {
        Some(fraction) => all_digits(fraction),
        None => true,
    }
}

/// True for a zero with a unit suffix (`0px`, `0%`, ...), which collapses to 0.
fn is_zero_with_unit(text: &str) -> bool {
    match text.strip_prefix('0') {
        Some(unit) => matches!(unit, "px" | "%" | "em" | "rem" | "pt" | "vh" | "vw"),
        None => false,
    }
}

/// Coerce a raw declaration value.
///
/// Plain decimals become numbers, `0` with any known unit collapses to `0`,
/// everything else survives as a keyword (`auto`, `50%`, `vertical`, ...).
pub fn coerce_value(raw: &str) -> StyleValue {
    let text = raw.trim();
    if is_plain_number(text) {
        if let Ok(value) = text.parse::<f32>() {
            return StyleValue::Number(value);
        }
    }
    if is_zero_with_unit(text) {
        return StyleValue::Number(0.0);
    }
    StyleValue::Keyword(text.to_owned())
}

/// Extract the numeric part of a percentage keyword (`"50%"` → `50.0`).
pub fn parse_percentage(text: &str) -> Option<f32> {
    let number = text.trim().strip_suffix('%')?;
    let trimmed = number.trim();
    if is_plain_number(trimmed) {
        trimmed.parse::<f32>().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_coerce() {
        assert_eq!(coerce_value("200"), StyleValue::Number(200.0));
        assert_eq!(coerce_value("-3.5"), StyleValue::Number(-3.5));
        assert_eq!(coerce_value(" 12 "), StyleValue::Number(12.0));
    }

    #[test]
    fn zero_with_unit_collapses() {
        assert_eq!(coerce_value("0px"), StyleValue::Number(0.0));
        assert_eq!(coerce_value("0%"), StyleValue::Number(0.0));
        assert_eq!(coerce_value("0vh"), StyleValue::Number(0.0));
    }

    #[test]
    fn non_zero_units_stay_keywords() {
        assert_eq!(coerce_value("50%"), StyleValue::Keyword("50%".into()));
        assert_eq!(coerce_value("12px"), StyleValue::Keyword("12px".into()));
        assert_eq!(coerce_value("vertical"), StyleValue::Keyword("vertical".into()));
    }

    #[test]
    fn malformed_decimals_stay_keywords() {
        assert_eq!(coerce_value("1."), StyleValue::Keyword("1.".into()));
        assert_eq!(coerce_value(".5"), StyleValue::Keyword(".5".into()));
        assert_eq!(coerce_value("1.2.3"), StyleValue::Keyword("1.2.3".into()));
    }

    #[test]
    fn percentage_extraction() {
        assert_eq!(parse_percentage("50%"), Some(50.0));
        assert_eq!(parse_percentage("12.5%"), Some(12.5));
        assert_eq!(parse_percentage("auto"), None);
        assert_eq!(parse_percentage("%"), None);
    }
}
