use {
    crate::{shape::index_path, DecodeError, JsonShape},
    serde_json::Value,
};

/// Implement Display for a given class by formatting it as pretty-printed JSON.
#[macro_export]
macro_rules! display_json {
    ($cls:ident) => {
        impl std::fmt::Display for $cls {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                let buf = Vec::new();
                let serde_formatter = ::serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut ser = ::serde_json::Serializer::with_formatter(buf, serde_formatter);
                match self.serialize(&mut ser) {
                    Ok(()) => (),
                    Err(e) => {
                        ::log::error!("Failed to serialize: {}", e);
                        return Err(::std::fmt::Error {});
                    }
                };
                match std::str::from_utf8(&ser.into_inner()) {
                    Ok(s) => write!(f, "{}", s),
                    Err(e) => {
                        ::log::error!("JSON serialization contained non-UTF-8 characters: {}", e);
                        Err(::std::fmt::Error {})
                    }
                }
            }
        }
    };
}

/// Implement FromStr for a given class by running its decoder over the string.
#[macro_export]
macro_rules! from_str_json {
    ($cls:ident) => {
        impl ::std::str::FromStr for $cls {
            type Err = $crate::DecodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match Self::from_slice(s.as_bytes()) {
                    Ok(result) => Ok(result),
                    Err(e) => {
                        ::log::debug!("Failed to decode: {}: {:?}", s, e);
                        Err(e)
                    }
                }
            }
        }
    };
}

/// A value that may appear as an element of a scalar-or-array field.
pub trait ScalarElement: Sized {
    /// The JSON shape a single element takes.
    const SHAPE: JsonShape;

    /// Converts a single JSON value into an element, or returns `None` if the value has the wrong shape.
    fn from_scalar(value: &Value) -> Option<Self>;
}

impl ScalarElement for String {
    const SHAPE: JsonShape = JsonShape::String;

    fn from_scalar(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

/// Decode a field that may be absent, `null`, a single scalar, or an array of scalars into an ordered list.
///
/// Absent and `null` both yield an empty list. A scalar is promoted to a single-element list. Array elements are
/// kept in source order; any element of the wrong shape fails the whole field.
pub fn scalar_or_list<T: ScalarElement>(field: &str, value: Option<&Value>) -> Result<Vec<T>, DecodeError> {
    let value = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(value) => value,
    };

    if let Some(element) = T::from_scalar(value) {
        return Ok(vec![element]);
    }

    match value {
        Value::Array(elements) => {
            let mut result = Vec::with_capacity(elements.len());
            for (i, element) in elements.iter().enumerate() {
                match T::from_scalar(element) {
                    Some(e) => result.push(e),
                    None => return Err(DecodeError::shape_mismatch(index_path(field, i), &[T::SHAPE], element)),
                }
            }
            Ok(result)
        }
        _ => Err(DecodeError::shape_mismatch(field, &[T::SHAPE, JsonShape::Array], value)),
    }
}

/// Decode an optional plain string field. Absent and `null` yield the empty string; no other type is coerced.
pub(crate) fn optional_string(field: &str, value: Option<&Value>) -> Result<String, DecodeError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(value) => Err(DecodeError::shape_mismatch(field, &[JsonShape::String], value)),
    }
}
