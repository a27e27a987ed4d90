//! Violation messages.
//!
//! Turns a `ValidationReport` into editor-facing sentences. Term names pass
//! through a `TermDecorator`, so a presentation layer can quote, emphasise
//! or link them without touching the wording.

use crate::domain::{MessageStyle, RequiredTypesViolation, SingleSelectViolation, ValidationReport};
use at_01_term_hierarchy::Term;

/// Renders one term inside a message.
pub trait TermDecorator {
    fn decorate(&self, term: &Term) -> String;
}

impl<F> TermDecorator for F
where
    F: Fn(&Term) -> String,
{
    fn decorate(&self, term: &Term) -> String {
        self(term)
    }
}

/// `"Name"`
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotedName;

impl TermDecorator for QuotedName {
    fn decorate(&self, term: &Term) -> String {
        format!("\"{}\"", term.name)
    }
}

/// `<b>Name</b>`, with the name HTML-escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmphasisedName;

impl TermDecorator for EmphasisedName {
    fn decorate(&self, term: &Term) -> String {
        format!("<b>{}</b>", html_escape::encode_text(&term.name))
    }
}

/// The default decorator for a message style.
pub fn decorator_for(style: MessageStyle) -> &'static dyn TermDecorator {
    match style {
        MessageStyle::PlainText => &QuotedName,
        MessageStyle::Markup => &EmphasisedName,
    }
}

/// Join names as `"a"`, `"a and b"`, `"a, b and c"`.
pub fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Sentence describing every single-select violation; empty if there are none.
pub fn render_single_select(
    violations: &[SingleSelectViolation],
    decorator: &dyn TermDecorator,
) -> String {
    if violations.is_empty() {
        return String::new();
    }

    let per_type: Vec<String> = violations
        .iter()
        .map(|violation| {
            let names: Vec<String> = violation
                .offending
                .iter()
                .map(|t| decorator.decorate(t))
                .collect();
            format!(" either {}", names.join(", or "))
        })
        .collect();

    format!(
        "Some tags have been added from a single select taxonomy. Only one of the following tags can be used. \
         Please keep {}, and try again.",
        per_type.join(", and ")
    )
}

/// Sentence describing the missing required types and the tags needing them.
pub fn render_required_types(
    violation: &RequiredTypesViolation,
    types_decorator: &dyn TermDecorator,
    terms_decorator: &dyn TermDecorator,
) -> String {
    let types: Vec<String> = violation
        .still_needed
        .iter()
        .map(|t| types_decorator.decorate(t))
        .collect();
    let terms: Vec<String> = violation
        .offending
        .iter()
        .map(|t| terms_decorator.decorate(t))
        .collect();
    let single_type = types.len() == 1;

    format!(
        "Please also add one or more tags from the {}{} {}. \
         The required taxonomies settings of the {} {} mean you now need to add at least one tag from related taxonomies, too.",
        if single_type { "" } else { "related " },
        join_names(&types),
        if single_type { "taxonomy" } else { "taxonomies" },
        join_names(&terms),
        if terms.len() == 1 { " term" } else { " terms" },
    )
}

/// Every message of a report joined with the style's line separator; empty
/// for a valid report.
pub fn render_report(report: &ValidationReport, style: MessageStyle) -> String {
    let decorator = decorator_for(style);
    let mut messages = Vec::new();

    if !report.single_select.is_empty() {
        messages.push(render_single_select(&report.single_select, decorator));
    }
    if let Some(required) = &report.required_types {
        messages.push(render_required_types(required, decorator, decorator));
    }

    messages.join(style.line_separator())
}
