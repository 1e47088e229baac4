//! Arrow helpers shared by the cleaners and the typed table views.

pub mod array_utils;
pub mod extractors;

pub use array_utils::{downcast_array, filter_rows, get_column};
pub use extractors::{extract_float64, extract_float64_column, extract_string};
