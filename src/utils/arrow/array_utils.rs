//! Column lookup, downcasting and row filtering on record batches.

use arrow::array::{Array, ArrayRef, BooleanArray};
use arrow::compute::filter_record_batch;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{Error, Result};

/// Look a column up by name and check its Arrow type.
///
/// Returns `Ok(None)` for an absent column unless `required` is set, in
/// which case the lookup fails with [`Error::ColumnNotFound`]. A column of
/// the wrong type is always a schema error.
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
    required: bool,
) -> Result<Option<ArrayRef>> {
    let Ok(idx) = batch.schema().index_of(column_name) else {
        if required {
            return Err(Error::ColumnNotFound {
                column: column_name.to_string(),
            });
        }
        debug!("Column '{column_name}' absent, reading as missing");
        return Ok(None);
    };

    let column = batch.column(idx);
    if column.data_type() != expected_type {
        return Err(Error::schema(
            "record batch",
            format!(
                "column '{column_name}' has type {:?}, expected {expected_type:?}",
                column.data_type()
            ),
        ));
    }

    Ok(Some(ArrayRef::clone(column)))
}

/// Downcast a column to its concrete array type
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array.as_any().downcast_ref::<A>().ok_or_else(|| {
        Error::schema(
            "record batch",
            format!("column '{column_name}' is not a {expected_type_name} array"),
        )
    })
}

/// Keep only the rows where `mask` is true
pub fn filter_rows(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    Ok(filter_record_batch(batch, mask)?)
}
