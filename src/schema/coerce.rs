//! Coercion of locale-formatted strings to numbers.
//!
//! Values such as `"1,234 "` become `1234.0`. Anything that does not parse
//! becomes a null and is reported back to the caller as a warning.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Builder, StringArray};

use crate::error::{Error, Result, ValueCoercionWarning};

/// Parse a locale-formatted number.
///
/// Thousands separators (ASCII and full-width commas) and all whitespace,
/// including the ideographic space, are stripped before parsing. Blank and
/// non-finite inputs yield `None`.
#[must_use]
pub fn parse_locale_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && *c != '，' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Convert a `Utf8` column to `Float64`, nulling values that fail to parse.
///
/// When `allow_negative` is false, negative values are treated as
/// malformed as well. Blank cells become null without a warning.
pub fn coerce_numeric_array(
    array: &ArrayRef,
    column: &str,
    allow_negative: bool,
) -> Result<(ArrayRef, Vec<ValueCoercionWarning>)> {
    let string_array = array
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| {
            Error::schema(
                "population",
                format!(
                    "column '{column}' expected Utf8 but found {:?}",
                    array.data_type()
                ),
            )
        })?;

    let mut builder = Float64Builder::with_capacity(string_array.len());
    let mut warnings = Vec::new();

    for i in 0..string_array.len() {
        if string_array.is_null(i) {
            builder.append_null();
            continue;
        }

        let raw = string_array.value(i);
        match parse_locale_number(raw) {
            Some(v) if allow_negative || v >= 0.0 => builder.append_value(v),
            _ => {
                builder.append_null();
                if !raw.trim().is_empty() {
                    warnings.push(ValueCoercionWarning {
                        column: column.to_string(),
                        row: i,
                        raw: raw.to_string(),
                    });
                }
            }
        }
    }

    Ok((Arc::new(builder.finish()) as ArrayRef, warnings))
}
