//! # at-03-tagging-rules
//!
//! Structural tagging rules evaluated against a term snapshot.
//!
//! ## Overview
//!
//! - **Requirement Resolver**: a term's effective required types are its own
//!   plus (optionally) its root's; never transitive
//! - **Single-select**: at most one tag per single-select taxonomy
//! - **Required types**: each tag's effective required types must be
//!   represented among the tags' types
//! - **Messages**: editor-facing sentences rendered through pluggable term
//!   decorators
//!
//! Validation failures are data (`ValidationReport`), not errors. The same
//! checks serve hard gates (`ValidationMode::Enforce`) and interactive hints
//! (`ValidationMode::Advisory`).

pub mod domain;
pub mod messages;
pub mod ports;
pub mod service;

pub use domain::{
    check_required_types, check_single_select, effective_required_types, required_type_names,
    resolve_candidates, selectable_terms, MessageStyle, RequiredTypesViolation, RuleError,
    RuleResult, RulesConfig, SingleSelectViolation, ValidationMode, ValidationReport,
};
pub use messages::{
    decorator_for, join_names, render_report, render_required_types, render_single_select,
    EmphasisedName, QuotedName, TermDecorator,
};
pub use ports::TaggingRulesApi;
pub use service::TaggingRuleValidator;
