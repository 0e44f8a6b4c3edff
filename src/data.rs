use std::fmt;

/// Placeholder written into missing cells by the cleaner.
pub const MISSING_SENTINEL: &str = "N/A";

/// Field values the loader treats as missing, matching the null tokens the
/// usual dataframe CSV readers recognise.
pub const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Builds a cell from a raw field, mapping null tokens to [`Cell::Missing`].
    pub fn from_field(raw: &str) -> Self {
        if is_null_token(raw) {
            Cell::Missing
        } else {
            Cell::Text(raw.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric coercion: text that does not parse becomes missing.
    pub fn coerce_numeric(&self) -> Cell {
        match self {
            Cell::Number(n) if !n.is_nan() => Cell::Number(*n),
            Cell::Text(s) => match s.trim().parse::<f64>() {
                Ok(parsed) if !parsed.is_nan() => Cell::Number(parsed),
                _ => Cell::Missing,
            },
            _ => Cell::Missing,
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

pub fn is_null_token(raw: &str) -> bool {
    NULL_TOKENS.contains(&raw)
}

/// Integral values drop the fractional part; everything else uses the
/// shortest representation that parses back to the same `f64`.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Float rendering used in reports: `30.0`, `33.33`, `nan`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "inf" } else { "-inf" };
        text.to_string()
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Rounds half to even at `places` decimal places; NaN stays NaN.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
