use std::fmt;

use serde::{Serialize, Serializer};

/// A single cell after coercion. Every cell in a dataset is exactly one of
/// these three shapes; downstream statistics never see raw strings.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Number(f64),
    Text(String),
    Null,
}

impl TypedValue {
    /// Coerces one raw cell. Empty or missing cells become `Null`; a cell
    /// whose full text parses as a finite number becomes `Number`; everything
    /// else stays `Text` with its original spelling. The parse is strict:
    /// no trimming, and `inf`/`NaN` spellings remain text.
    pub fn coerce(raw: Option<&str>) -> TypedValue {
        match raw {
            None | Some("") => TypedValue::Null,
            Some(text) => match text.parse::<f64>() {
                Ok(number) if number.is_finite() => TypedValue::Number(number),
                _ => TypedValue::Text(text.to_string()),
            },
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            TypedValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Display form used by tables, mode counting, and exports. Whole numbers
    /// print without a fractional part; nulls render as the empty string.
    pub fn as_display(&self) -> String {
        match self {
            TypedValue::Number(number) => {
                if number.fract() == 0.0 {
                    (*number as i64).to_string()
                } else {
                    number.to_string()
                }
            }
            TypedValue::Text(text) => text.clone(),
            TypedValue::Null => String::new(),
        }
    }

    /// Identity key for unique counting. Numbers and text never collide even
    /// when they display identically (`Number(3.0)` vs `Text("3")`), and the
    /// two zero signs collapse into one key. Nulls have no key.
    pub fn unique_key(&self) -> Option<ValueKey> {
        match self {
            TypedValue::Number(number) => {
                // +0.0 and -0.0 count as the same value.
                let normalized = if *number == 0.0 { 0.0 } else { *number };
                Some(ValueKey::Number(normalized.to_bits()))
            }
            TypedValue::Text(text) => Some(ValueKey::Text(text.clone())),
            TypedValue::Null => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypedValue::Number(number) => serializer.serialize_f64(*number),
            TypedValue::Text(text) => serializer.serialize_str(text),
            TypedValue::Null => serializer.serialize_none(),
        }
    }
}

/// Hashable identity of a non-null cell. Coercion guarantees the stored bits
/// are never NaN, so bit equality is value equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Number(u64),
    Text(String),
}
