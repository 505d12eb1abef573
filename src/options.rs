use derive_builder::Builder;

/// Knobs controlling how strictly a policy document is decoded.
///
/// The default is lenient: keys outside the policy grammar are ignored.
#[derive(Builder, Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DecodeOptions {
    /// Reject keys other than the known document and statement keys.
    #[builder(default)]
    deny_unknown_fields: bool,
}

impl DecodeOptions {
    #[inline]
    pub fn builder() -> DecodeOptionsBuilder {
        DecodeOptionsBuilder::default()
    }

    /// Options that reject unknown keys.
    #[inline]
    pub fn strict() -> Self {
        Self {
            deny_unknown_fields: true,
        }
    }

    #[inline]
    pub fn deny_unknown_fields(&self) -> bool {
        self.deny_unknown_fields
    }
}
