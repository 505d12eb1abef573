use {
    crate::JsonShape,
    log::debug,
    serde_json::Value,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// Errors produced while decoding a policy document.
///
/// Field paths are rooted at the document, e.g. `Statement[1].Principal.AWS[0]`. The document itself is the
/// empty path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// A field's JSON value is not one of the shapes accepted for that field.
    ShapeMismatch {
        field: String,
        expected: Vec<JsonShape>,
        actual: JsonShape,
    },

    /// A field with no valid default is absent.
    MissingRequiredField(String),

    /// The input is not syntactically valid JSON.
    MalformedJson {
        message: String,
        line: usize,
        column: usize,
    },

    /// A key outside the policy grammar was found while unknown fields are denied.
    UnknownField {
        field: String,
        allowed: &'static [&'static str],
    },
}

impl DecodeError {
    pub(crate) fn shape_mismatch<F: Into<String>>(field: F, expected: &[JsonShape], actual: &Value) -> Self {
        let field = field.into();
        let actual = JsonShape::of(actual);
        debug!("Shape mismatch at {}: expected {:?}, found {}", display_path(&field), expected, actual);
        Self::ShapeMismatch {
            field,
            expected: expected.to_vec(),
            actual,
        }
    }

    /// The path of the field this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ShapeMismatch {
                field,
                ..
            } => Some(field),
            Self::MissingRequiredField(field) => Some(field),
            Self::MalformedJson {
                ..
            } => None,
            Self::UnknownField {
                field,
                ..
            } => Some(field),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        debug!("Failed to parse policy JSON: {:?}", e);
        Self::MalformedJson {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        }
    }
}

fn display_path(field: &str) -> &str {
    if field.is_empty() {
        "<root>"
    } else {
        field
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::ShapeMismatch {
                field,
                expected,
                actual,
            } => {
                write!(f, "Shape mismatch at {}: expected ", display_path(field))?;
                for (i, shape) in expected.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{}", shape)?;
                }
                write!(f, ", found {}", actual)
            }
            Self::MissingRequiredField(field) => write!(f, "Missing required field: {}", display_path(field)),
            Self::MalformedJson {
                message,
                ..
            } => write!(f, "Malformed JSON: {}", message),
            Self::UnknownField {
                field,
                allowed,
            } => write!(f, "Unknown field {}, expected one of: {}", display_path(field), allowed.join(", ")),
        }
    }
}

impl Error for DecodeError {}

#[cfg(test)]
mod tests {
    use {
        crate::{DecodeError, JsonShape},
        pretty_assertions::{assert_eq, assert_ne},
        serde_json::json,
    };

    #[test_log::test]
    fn test_display() {
        let e = DecodeError::shape_mismatch(
            "Statement[0].Action",
            &[JsonShape::String, JsonShape::Array],
            &json!(42),
        );
        assert_eq!(e.to_string(), "Shape mismatch at Statement[0].Action: expected string or array, found number");

        let e = DecodeError::shape_mismatch("", &[JsonShape::Object], &json!([]));
        assert_eq!(e.to_string(), "Shape mismatch at <root>: expected object, found array");

        assert_eq!(
            DecodeError::MissingRequiredField("Statement".to_string()).to_string(),
            "Missing required field: Statement"
        );

        let e = DecodeError::UnknownField {
            field: "Foo".to_string(),
            allowed: &["Version", "Id", "Statement"],
        };
        assert_eq!(e.to_string(), "Unknown field Foo, expected one of: Version, Id, Statement");
    }

    #[test_log::test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{\n  \"Version\": }").unwrap_err();
        let e = DecodeError::from(json_err);
        match &e {
            DecodeError::MalformedJson {
                message,
                line,
                column,
            } => {
                assert_eq!(*line, 2);
                assert!(*column > 0);
                assert!(message.starts_with("expected value at line 2"));
            }
            _ => panic!("Expected MalformedJson, got {:?}", e),
        }
        assert!(e.to_string().starts_with("Malformed JSON: "));
        assert_eq!(e.field(), None);
    }

    #[test_log::test]
    fn test_eq() {
        let e1a = DecodeError::MissingRequiredField("Statement".to_string());
        let e1b = DecodeError::MissingRequiredField("Statement".to_string());
        let e2 = DecodeError::shape_mismatch("Statement", &[JsonShape::Object, JsonShape::Array], &json!(null));
        let e3 = DecodeError::shape_mismatch("Statement", &[JsonShape::Object, JsonShape::Array], &json!(3));

        assert_eq!(e1a, e1b);
        assert_ne!(e1a, e2);
        assert_ne!(e2, e3);
        assert_eq!(e1a.field(), Some("Statement"));
        assert_eq!(e2.field(), Some("Statement"));
    }
}
