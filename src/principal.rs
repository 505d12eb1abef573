use {
    crate::{serutil::scalar_or_list, shape::key_path, DecodeError, JsonShape},
    serde_json::Value,
    std::collections::BTreeMap,
};

/// Principal type (`AWS`, `Service`, `Federated`, `CanonicalUser`, ...) to the identifiers listed under it.
///
/// Keys are ordered so that two maps decoded from the same principals compare and serialize identically.
pub type PrincipalMap = BTreeMap<String, Vec<String>>;

/// The key a bare `"*"` principal is stored under.
pub const WILDCARD_PRINCIPAL_KEY: &str = "AWS";

/// The identifier that matches every principal.
pub const WILDCARD: &str = "*";

const PRINCIPAL_SHAPES: &[JsonShape] = &[JsonShape::Wildcard, JsonShape::Object];

/// Decode a `Principal` or `NotPrincipal` block.
///
/// `"*"` becomes `{"AWS": ["*"]}`, the same value `{"AWS": "*"}` decodes to. An object has each of its values
/// decoded as a string-or-list. Absent and `null` yield an empty map.
pub fn principal_block(field: &str, value: Option<&Value>) -> Result<PrincipalMap, DecodeError> {
    match value {
        None | Some(Value::Null) => Ok(PrincipalMap::new()),
        Some(Value::String(s)) if s == WILDCARD => Ok(wildcard()),
        Some(Value::Object(entries)) => {
            let mut result = PrincipalMap::new();
            for (principal_type, ids) in entries {
                let ids = scalar_or_list(&key_path(field, principal_type), Some(ids))?;
                result.insert(principal_type.clone(), ids);
            }
            Ok(result)
        }
        Some(value) => Err(DecodeError::shape_mismatch(field, PRINCIPAL_SHAPES, value)),
    }
}

/// The normalized form of the wildcard principal.
pub fn wildcard() -> PrincipalMap {
    let mut result = PrincipalMap::new();
    result.insert(WILDCARD_PRINCIPAL_KEY.to_string(), vec![WILDCARD.to_string()]);
    result
}

/// Indicates whether the map names every AWS principal.
pub fn is_wildcard(principals: &PrincipalMap) -> bool {
    match principals.get(WILDCARD_PRINCIPAL_KEY) {
        Some(ids) => ids.iter().any(|id| id == WILDCARD),
        None => false,
    }
}
