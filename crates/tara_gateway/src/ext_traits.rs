//! Extension traits over foreign types.

use bytes::Bytes;
use error_stack::ResultExt;

use crate::errors::{CustomResult, ParsingError};

/// Deserialize a byte payload into a typed struct, naming the target type in
/// the failure report.
pub trait BytesExt {
    fn parse_struct<'de, T>(&'de self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: serde::Deserialize<'de>;
}

impl BytesExt for Bytes {
    fn parse_struct<'de, T>(&'de self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: serde::Deserialize<'de>,
    {
        serde_json::from_slice::<T>(self)
            .change_context(ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| {
                let variable_type = std::any::type_name::<T>();
                format!("Unable to parse {variable_type} from bytes")
            })
    }
}
