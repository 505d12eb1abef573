use {
    serde_json::Value,
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// The runtime shape of a JSON value, as far as the policy grammar cares about it.
///
/// [JsonShape::Wildcard] only ever appears in the `expected` list of a shape mismatch. [JsonShape::of] never
/// returns it; a `"*"` found where it is not accepted is reported as [JsonShape::String].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum JsonShape {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,

    /// The literal string `"*"`. Used only as an expected shape, never as an actual one.
    Wildcard,
}

impl JsonShape {
    /// Returns the shape of the given value. Strings are always reported as [JsonShape::String], even if they
    /// happen to be `"*"`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl Display for JsonShape {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool => f.write_str("boolean"),
            Self::Number => f.write_str("number"),
            Self::String => f.write_str("string"),
            Self::Array => f.write_str("array"),
            Self::Object => f.write_str("object"),
            Self::Wildcard => f.write_str(r#""*""#),
        }
    }
}

/// Path of a key below `parent`. The document root is the empty path.
pub(crate) fn key_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Path of an array element below `parent`.
pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}
