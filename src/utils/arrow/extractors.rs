//! Typed cell and column reads from the cleaned tables.
//!
//! An absent optional column reads as `None`, so narrow tables still yield
//! typed records with the missing figures left empty.

use arrow::array::{Array, Float64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::arrow::array_utils::{downcast_array, get_column};

/// Trimmed text of one cell; blank and null cells read as `None`
pub fn extract_string(
    batch: &RecordBatch,
    row: usize,
    column_name: &str,
    required: bool,
) -> Result<Option<String>> {
    let Some(array) = get_column(batch, column_name, &DataType::Utf8, required)? else {
        return Ok(None);
    };
    let text = downcast_array::<StringArray>(&array, column_name, "String")?;

    Ok((row < text.len() && text.is_valid(row))
        .then(|| text.value(row).trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string))
}

/// Numeric value of one cell; null cells and absent columns read as `None`
pub fn extract_float64(
    batch: &RecordBatch,
    row: usize,
    column_name: &str,
    required: bool,
) -> Result<Option<f64>> {
    let Some(array) = get_column(batch, column_name, &DataType::Float64, required)? else {
        return Ok(None);
    };
    let numbers = downcast_array::<Float64Array>(&array, column_name, "Float64")?;

    Ok((row < numbers.len() && numbers.is_valid(row)).then(|| numbers.value(row)))
}

/// Every value of a `Float64` column, in row order
pub fn extract_float64_column(
    batch: &RecordBatch,
    column_name: &str,
    required: bool,
) -> Result<Option<Vec<Option<f64>>>> {
    let Some(array) = get_column(batch, column_name, &DataType::Float64, required)? else {
        return Ok(None);
    };
    let numbers = downcast_array::<Float64Array>(&array, column_name, "Float64")?;

    Ok(Some(numbers.iter().collect()))
}
