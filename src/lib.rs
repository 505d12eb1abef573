#![warn(clippy::all)]
//! Decoder for AWS IAM-style JSON policy documents.
//!
//! The policy grammar lets most fields be written either as a single value or as a list of values, and lets a
//! principal be either `"*"` or a map of principal types to values. Decoding normalizes every accepted shape into
//! one canonical [Policy]: lists are always lists, maps are always maps, and absent fields are empty rather than
//! missing. Decoding either succeeds completely or fails with a [DecodeError] naming the offending field.
pub(crate) mod error;
pub(crate) mod options;
pub(crate) mod policy;
pub(crate) mod principal;
pub(crate) mod shape;
pub(crate) mod statement;

#[macro_use]
pub(crate) mod serutil;

pub use {
    error::DecodeError,
    options::{DecodeOptions, DecodeOptionsBuilder, DecodeOptionsBuilderError},
    policy::{Policy, PolicyBuilder, PolicyBuilderError},
    principal::{is_wildcard, principal_block, wildcard, PrincipalMap, WILDCARD, WILDCARD_PRINCIPAL_KEY},
    serutil::{scalar_or_list, ScalarElement},
    shape::JsonShape,
    statement::{statement_list, Statement, StatementBuilder, StatementBuilderError},
};
