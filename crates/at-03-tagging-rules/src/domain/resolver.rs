//! # Requirement Resolver
//!
//! The effective required types of a term are its own required types, plus
//! its root's when `required_types_inherit_root` is set. Resolution stops at
//! that one level: requirements of the required types are never followed,
//! so cycles in the requirement graph cannot affect termination.

use crate::domain::errors::RuleResult;
use at_01_term_hierarchy::{Term, TermForest};
use shared_types::TermId;
use std::collections::BTreeSet;

pub fn effective_required_types(forest: &TermForest, term: &Term) -> RuleResult<BTreeSet<TermId>> {
    if !term.required_types_inherit_root {
        return Ok(term.required_types.clone());
    }

    let root = forest.get(term.type_id)?;
    Ok(term
        .required_types
        .union(&root.required_types)
        .copied()
        .collect())
}

/// Names of the effective required types, in id order.
pub fn required_type_names(forest: &TermForest, term: &Term) -> RuleResult<Vec<String>> {
    effective_required_types(forest, term)?
        .into_iter()
        .map(|id| Ok(forest.get(id)?.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(id: u64, parent: Option<u64>, type_id: u64, name: &str) -> Term {
        let mut t = Term::new(name);
        t.id = TermId(id);
        t.parent_id = parent.map(TermId);
        t.type_id = TermId(type_id);
        t
    }

    /// InfoType(1) requires Audience(3); News(2) under InfoType requires Region(4).
    fn forest(inherit: bool) -> TermForest {
        TermForest::new(vec![
            saved(1, None, 1, "InfoType").requires(TermId(3)),
            saved(2, Some(1), 1, "News")
                .requires(TermId(4))
                .inherit_root_required_types(inherit),
            saved(3, None, 3, "Audience"),
            saved(4, None, 4, "Region"),
        ])
    }

    #[test]
    fn test_union_with_root() {
        let forest = forest(true);
        let news = forest.get(TermId(2)).unwrap();
        assert_eq!(
            effective_required_types(&forest, news).unwrap(),
            BTreeSet::from([TermId(3), TermId(4)])
        );
        assert_eq!(
            required_type_names(&forest, news).unwrap(),
            vec!["Audience", "Region"]
        );
    }

    #[test]
    fn test_no_inherit_returns_local_only() {
        let forest = forest(false);
        let news = forest.get(TermId(2)).unwrap();
        assert_eq!(
            effective_required_types(&forest, news).unwrap(),
            BTreeSet::from([TermId(4)])
        );
    }

    #[test]
    fn test_empty_requirements() {
        let forest = forest(true);
        let audience = forest.get(TermId(3)).unwrap();
        assert!(effective_required_types(&forest, audience).unwrap().is_empty());
    }

    #[test]
    fn test_requirement_cycle_is_one_level() {
        let forest = TermForest::new(vec![
            saved(1, None, 1, "X").requires(TermId(3)),
            saved(2, None, 2, "Y").requires(TermId(1)),
            saved(3, None, 3, "Z").requires(TermId(2)),
        ]);
        let x = forest.get(TermId(1)).unwrap();
        assert_eq!(
            effective_required_types(&forest, x).unwrap(),
            BTreeSet::from([TermId(3)])
        );
    }
}
