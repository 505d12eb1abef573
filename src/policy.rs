use {
    crate::{
        display_json, from_str_json,
        serutil::optional_string,
        statement::{check_known_fields, statement_list},
        DecodeError, DecodeOptions, JsonShape, Statement,
    },
    derive_builder::Builder,
    log::debug,
    serde::{
        de::{self, Deserializer},
        ser::{SerializeMap, Serializer},
        Deserialize, Serialize,
    },
    serde_json::Value,
};

const POLICY_FIELDS: &[&str] = &["Version", "Id", "Statement"];

/// The top-level structure for holding a decoded policy document.
///
/// Every field is in canonical form: absent strings are empty and `Statement` is always a list, even when the
/// source document held a single statement object.
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
pub struct Policy {
    /// The policy language version tag, e.g. `2012-10-17`. Stored verbatim; empty if absent.
    #[builder(setter(into), default)]
    version: String,

    /// An optional identifier for the policy; empty if absent.
    #[builder(setter(into), default)]
    id: String,

    /// The statements of the policy, in source order.
    #[builder(setter(into))]
    statements: Vec<Statement>,
}

impl Policy {
    #[inline]
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    /// Decode a policy from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::from_slice_with(bytes, &DecodeOptions::default())
    }

    pub fn from_slice_with(bytes: &[u8], options: &DecodeOptions) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value_with(&value, options)
    }

    /// Decode a policy from an already-parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Self::from_value_with(value, &DecodeOptions::default())
    }

    pub fn from_value_with(value: &Value, options: &DecodeOptions) -> Result<Self, DecodeError> {
        let entries = match value {
            Value::Object(entries) => entries,
            _ => return Err(DecodeError::shape_mismatch("", &[JsonShape::Object], value)),
        };

        if options.deny_unknown_fields() {
            check_known_fields("", entries, POLICY_FIELDS)?;
        }

        let version = optional_string("Version", entries.get("Version"))?;
        let id = optional_string("Id", entries.get("Id"))?;
        let statements = statement_list("Statement", entries.get("Statement"), options)?;
        debug!("Decoded policy {:?} with {} statement(s)", id, statements.len());

        Ok(Self {
            version,
            id,
            statements,
        })
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

display_json!(Policy);
from_str_json!(Policy);

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Policy, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(de::Error::custom)
    }
}

impl Serialize for Policy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(None)?;
        if !self.version.is_empty() {
            state.serialize_entry("Version", &self.version)?;
        }
        if !self.id.is_empty() {
            state.serialize_entry("Id", &self.id)?;
        }
        state.serialize_entry("Statement", &self.statements)?;
        state.end()
    }
}
