use {
    crate::{
        display_json, from_str_json,
        principal::{is_wildcard, principal_block, PrincipalMap},
        serutil::{optional_string, scalar_or_list},
        shape::{index_path, key_path},
        DecodeError, DecodeOptions, JsonShape,
    },
    derive_builder::Builder,
    log::{debug, trace},
    serde::{
        de::{self, Deserializer},
        ser::{SerializeMap, Serializer},
        Deserialize, Serialize,
    },
    serde_json::{Map, Value},
};

pub(crate) const STATEMENT_FIELDS: &[&str] = &[
    "Sid",
    "Effect",
    "Principal",
    "NotPrincipal",
    "Action",
    "NotAction",
    "Resource",
    "NotResource",
    "Condition",
];

/// A single access rule with every field in its canonical shape.
///
/// List and map fields are never absent: a field missing from the source document decodes to an empty list or
/// map. `Effect` is kept verbatim; checking it against `Allow`/`Deny` is left to the caller.
#[derive(Builder, Clone, Debug, Default, Eq, PartialEq)]
pub struct Statement {
    #[builder(setter(into), default)]
    sid: String,

    #[builder(setter(into), default)]
    effect: String,

    #[builder(setter(into), default)]
    principal: PrincipalMap,

    #[builder(setter(into), default)]
    not_principal: PrincipalMap,

    #[builder(setter(into), default)]
    action: Vec<String>,

    #[builder(setter(into), default)]
    not_action: Vec<String>,

    #[builder(setter(into), default)]
    resource: Vec<String>,

    #[builder(setter(into), default)]
    not_resource: Vec<String>,

    /// Flat list of condition strings. Nested operator maps are not accepted.
    #[builder(setter(into), default)]
    condition: Vec<String>,
}

impl Statement {
    #[inline]
    pub fn builder() -> StatementBuilder {
        StatementBuilder::default()
    }

    /// Decode a standalone statement object.
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Self::decode("", value, &DecodeOptions::default())
    }

    /// Decode a standalone statement from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(&value)
    }

    pub(crate) fn decode(field: &str, value: &Value, options: &DecodeOptions) -> Result<Self, DecodeError> {
        let entries = match value {
            Value::Object(entries) => entries,
            _ => return Err(DecodeError::shape_mismatch(field, &[JsonShape::Object], value)),
        };

        if options.deny_unknown_fields() {
            check_known_fields(field, entries, STATEMENT_FIELDS)?;
        }

        let path = |key: &str| key_path(field, key);
        let statement = Self {
            sid: optional_string(&path("Sid"), entries.get("Sid"))?,
            effect: optional_string(&path("Effect"), entries.get("Effect"))?,
            principal: principal_block(&path("Principal"), entries.get("Principal"))?,
            not_principal: principal_block(&path("NotPrincipal"), entries.get("NotPrincipal"))?,
            action: scalar_or_list(&path("Action"), entries.get("Action"))?,
            not_action: scalar_or_list(&path("NotAction"), entries.get("NotAction"))?,
            resource: scalar_or_list(&path("Resource"), entries.get("Resource"))?,
            not_resource: scalar_or_list(&path("NotResource"), entries.get("NotResource"))?,
            condition: scalar_or_list(&path("Condition"), entries.get("Condition"))?,
        };

        trace!("Decoded statement at {:?}: {:?}", field, statement);
        Ok(statement)
    }

    #[inline]
    pub fn sid(&self) -> &str {
        &self.sid
    }

    #[inline]
    pub fn effect(&self) -> &str {
        &self.effect
    }

    #[inline]
    pub fn principal(&self) -> &PrincipalMap {
        &self.principal
    }

    #[inline]
    pub fn not_principal(&self) -> &PrincipalMap {
        &self.not_principal
    }

    #[inline]
    pub fn action(&self) -> &[String] {
        &self.action
    }

    #[inline]
    pub fn not_action(&self) -> &[String] {
        &self.not_action
    }

    #[inline]
    pub fn resource(&self) -> &[String] {
        &self.resource
    }

    #[inline]
    pub fn not_resource(&self) -> &[String] {
        &self.not_resource
    }

    #[inline]
    pub fn condition(&self) -> &[String] {
        &self.condition
    }

    /// Indicates whether `Principal` names every AWS principal, whether it was written as `"*"` or `{"AWS": "*"}`.
    #[inline]
    pub fn has_wildcard_principal(&self) -> bool {
        is_wildcard(&self.principal)
    }
}

display_json!(Statement);
from_str_json!(Statement);

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(de::Error::custom)
    }
}

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(None)?;
        if !self.sid.is_empty() {
            state.serialize_entry("Sid", &self.sid)?;
        }
        if !self.effect.is_empty() {
            state.serialize_entry("Effect", &self.effect)?;
        }
        if !self.principal.is_empty() {
            state.serialize_entry("Principal", &self.principal)?;
        }
        if !self.not_principal.is_empty() {
            state.serialize_entry("NotPrincipal", &self.not_principal)?;
        }
        if !self.action.is_empty() {
            state.serialize_entry("Action", &self.action)?;
        }
        if !self.not_action.is_empty() {
            state.serialize_entry("NotAction", &self.not_action)?;
        }
        if !self.resource.is_empty() {
            state.serialize_entry("Resource", &self.resource)?;
        }
        if !self.not_resource.is_empty() {
            state.serialize_entry("NotResource", &self.not_resource)?;
        }
        if !self.condition.is_empty() {
            state.serialize_entry("Condition", &self.condition)?;
        }
        state.end()
    }
}

/// Decode the document's `Statement` field, which may be a single statement object or an array of them.
///
/// Unlike list fields inside a statement, an absent `Statement` or an empty array of statements is an error.
pub fn statement_list(
    field: &str,
    value: Option<&Value>,
    options: &DecodeOptions,
) -> Result<Vec<Statement>, DecodeError> {
    match value {
        None => {
            debug!("Policy is missing {}", field);
            Err(DecodeError::MissingRequiredField(field.to_string()))
        }
        Some(value @ Value::Object(_)) => Ok(vec![Statement::decode(field, value, options)?]),
        Some(Value::Array(elements)) if elements.is_empty() => {
            debug!("Policy has no statements in {}", field);
            Err(DecodeError::MissingRequiredField(field.to_string()))
        }
        Some(Value::Array(elements)) => {
            let mut result = Vec::with_capacity(elements.len());
            for (i, element) in elements.iter().enumerate() {
                result.push(Statement::decode(&index_path(field, i), element, options)?);
            }
            Ok(result)
        }
        Some(value) => Err(DecodeError::shape_mismatch(field, &[JsonShape::Object, JsonShape::Array], value)),
    }
}

pub(crate) fn check_known_fields(
    field: &str,
    entries: &Map<String, Value>,
    allowed: &'static [&'static str],
) -> Result<(), DecodeError> {
    for key in entries.keys() {
        if !allowed.contains(&key.as_str()) {
            let field = key_path(field, key);
            debug!("Unknown field {}", field);
            return Err(DecodeError::UnknownField {
                field,
                allowed,
            });
        }
    }
    Ok(())
}
