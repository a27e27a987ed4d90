//! # Engine Properties
//!
//! Propagation, requirement resolution, rule evaluation, locking and tag
//! ordering checked through the wired engine. Tree shapes and edit sequences
//! come from `proptest`.

use super::support::{child, engine, page, root, tree_matches_root};
use at_01_term_hierarchy::{HierarchyError, Term, DEFAULT_MAX_DEPTH};
use at_03_tagging_rules::ValidationMode;
use proptest::prelude::*;
use proptest::sample::Index;
use shared_types::TermId;
use std::collections::BTreeSet;
use taxonomy_runtime::{EngineError, InMemoryEngine};

/// Root plus `parents.len()` nodes, each hung under a random earlier node.
fn random_tree(engine: &InMemoryEngine, parents: &[Index]) -> Vec<TermId> {
    let root = root(engine, "Root");
    let mut ids = vec![root.id];
    for (i, parent) in parents.iter().enumerate() {
        let parent_id = ids[parent.index(ids.len())];
        ids.push(child(engine, parent_id, &format!("Node {i}")).id);
    }
    ids
}

// =============================================================================
// TYPE PROPAGATION
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// After any write to any node, the whole tree carries the root's values.
    #[test]
    fn prop_tree_matches_root_after_every_write(
        parents in prop::collection::vec(any::<Index>(), 1..24),
        writes in prop::collection::vec((any::<Index>(), any::<bool>(), any::<bool>()), 1..10),
    ) {
        let engine = engine();
        let ids = random_tree(&engine, &parents);
        prop_assert!(tree_matches_root(&engine, ids[0]));

        for (target, single, internal) in writes {
            let id = ids[target.index(ids.len())];
            let term = engine
                .get_term(id)
                .unwrap()
                .single_select(single)
                .internal_only(internal);
            engine.update_term(term).unwrap();
            prop_assert!(tree_matches_root(&engine, ids[0]));
        }

        let forest = engine.forest().unwrap();
        prop_assert_eq!(forest.terms_of_type(ids[0]).unwrap().len(), ids.len());
    }

    /// Saving the root alone rewrites every descendant's flags.
    #[test]
    fn prop_root_edit_reaches_every_descendant(
        parents in prop::collection::vec(any::<Index>(), 1..32),
        single in any::<bool>(),
        internal in any::<bool>(),
    ) {
        let engine = engine();
        let ids = random_tree(&engine, &parents);

        let root = engine
            .get_term(ids[0])
            .unwrap()
            .single_select(single)
            .internal_only(internal);
        engine.update_term(root).unwrap();

        for id in &ids[1..] {
            let term = engine.get_term(*id).unwrap();
            prop_assert_eq!(term.type_id, ids[0]);
            prop_assert_eq!(term.single_select, single);
            prop_assert_eq!(term.internal_only, internal);
        }
    }
}

#[test]
fn test_deep_chain_propagates() {
    let engine = engine();
    let top = root(&engine, "Top");
    let mut parent = top.id;
    let mut chain = Vec::new();
    for depth in 0..200 {
        let node = child(&engine, parent, &format!("Level {depth}"));
        parent = node.id;
        chain.push(node.id);
    }

    let flipped = engine.get_term(top.id).unwrap().internal_only(true);
    engine.update_term(flipped).unwrap();

    assert!(chain
        .iter()
        .all(|id| engine.get_term(*id).unwrap().internal_only));
    assert_eq!(engine.forest().unwrap().depth(parent).unwrap(), 200);
}

#[test]
fn test_depth_limit_refuses_create_and_keeps_chain_readable() {
    let engine = engine();
    let top = root(&engine, "Top");
    let mut leaf = top.id;
    for depth in 0..DEFAULT_MAX_DEPTH {
        leaf = child(&engine, leaf, &format!("Level {depth}")).id;
    }

    let refused = engine.create_term(Term::new("Too deep").with_parent(leaf));
    assert!(matches!(
        refused,
        Err(EngineError::Hierarchy(HierarchyError::DepthExceeded { parent_id, max_depth }))
            if parent_id == leaf && max_depth == DEFAULT_MAX_DEPTH
    ));

    let forest = engine.forest().unwrap();
    assert_eq!(forest.depth(leaf).unwrap(), DEFAULT_MAX_DEPTH);
    assert_eq!(forest.ancestors(leaf).unwrap()[0].id, top.id);
    let crumbs = engine.hierarchy_display(leaf).unwrap();
    assert!(crumbs.starts_with("Top ▸ Level 0 ▸ "));
    assert!(crumbs.ends_with(&format!("Level {}", DEFAULT_MAX_DEPTH - 1)));
}

// =============================================================================
// REQUIREMENT RESOLUTION
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Effective required types are the term's own, plus the root's when the
    /// inherit flag is on.
    #[test]
    fn prop_effective_required_types_union(
        own in prop::collection::btree_set(0usize..4, 0..4),
        inherited in prop::collection::btree_set(0usize..4, 0..4),
        inherit in any::<bool>(),
    ) {
        let engine = engine();
        let types: Vec<TermId> = (0..4).map(|i| root(&engine, &format!("Type {i}")).id).collect();

        let mut base = Term::new("Base");
        for i in &inherited {
            base = base.requires(types[*i]);
        }
        let base = engine.create_term(base).unwrap();

        let mut leaf = Term::new("Leaf")
            .with_parent(base.id)
            .inherit_root_required_types(inherit);
        for i in &own {
            leaf = leaf.requires(types[*i]);
        }
        let leaf = engine.create_term(leaf).unwrap();

        let mut expected: BTreeSet<TermId> = own.iter().map(|i| types[*i]).collect();
        if inherit {
            expected.extend(inherited.iter().map(|i| types[*i]));
        }
        prop_assert_eq!(engine.effective_required_types(leaf.id).unwrap(), expected);
    }
}

#[test]
fn test_cyclic_requirements_validate() {
    let engine = engine();
    let x = root(&engine, "X");
    let y = engine.create_term(Term::new("Y").requires(x.id)).unwrap();
    let z = engine.create_term(Term::new("Z").requires(y.id)).unwrap();
    let x = engine
        .update_term(engine.get_term(x.id).unwrap().requires(z.id))
        .unwrap();

    let report = engine
        .validate(&[x.id, y.id, z.id], ValidationMode::Enforce)
        .unwrap();
    assert!(report.is_valid());

    let report = engine
        .validate(&[x.id, y.id], ValidationMode::Enforce)
        .unwrap();
    let missing: Vec<TermId> = report
        .required_types
        .unwrap()
        .still_needed
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(missing, vec![z.id]);
}

// =============================================================================
// SINGLE SELECT
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A candidate with two or more terms of a single-select type is invalid
    /// and names exactly those terms.
    #[test]
    fn prop_single_select_exclusivity(
        picks in prop::collection::btree_set(0usize..6, 0..6),
        others in prop::collection::btree_set(0usize..3, 0..3),
    ) {
        let engine = engine();
        let shade = engine.create_term(Term::new("Shade").single_select(true)).unwrap();
        let shades: Vec<TermId> = (0..6).map(|i| child(&engine, shade.id, &format!("Shade {i}")).id).collect();
        let topic = root(&engine, "Topic");
        let topics: Vec<TermId> = (0..3).map(|i| child(&engine, topic.id, &format!("Topic {i}")).id).collect();

        let picked: Vec<TermId> = picks.iter().map(|i| shades[*i]).collect();
        let mut candidate = picked.clone();
        candidate.extend(others.iter().map(|i| topics[*i]));

        let report = engine.validate(&candidate, ValidationMode::Advisory).unwrap();
        if picked.len() > 1 {
            prop_assert_eq!(report.single_select.len(), 1);
            let named: Vec<TermId> = report.single_select[0].offending.iter().map(|t| t.id).collect();
            prop_assert_eq!(named, picked);
        } else {
            prop_assert!(report.single_select.is_empty());
        }
    }
}

#[test]
fn test_single_select_lock_tracks_last_assignment() {
    let engine = engine();
    let colour = root(&engine, "Colour");
    let red = child(&engine, colour.id, "Red");
    let crimson = child(&engine, red.id, "Crimson");

    assert!(!engine.is_single_select_locked(colour.id).unwrap());

    engine.tag(&page(1), crimson.id).unwrap();
    engine.tag(&page(2), red.id).unwrap();
    assert!(engine.is_single_select_locked(colour.id).unwrap());

    engine.untag(&page(2), red.id).unwrap();
    assert!(engine.is_single_select_locked(colour.id).unwrap());

    engine.untag(&page(1), crimson.id).unwrap();
    assert!(!engine.is_single_select_locked(colour.id).unwrap());

    let flipped = engine.get_term(colour.id).unwrap().single_select(true);
    engine.update_term(flipped).unwrap();
    assert!(engine.get_term(crimson.id).unwrap().single_select);
}

// =============================================================================
// TAG ORDERING
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Tags come back in add order, then in the order of the last reorder.
    #[test]
    fn prop_tag_order_follows_adds_then_reorder(
        adds in Just((0..8usize).collect::<Vec<_>>()).prop_shuffle(),
        reorder in Just((0..8usize).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let engine = engine();
        let topic = root(&engine, "Topic");
        let terms: Vec<TermId> = (0..8).map(|i| child(&engine, topic.id, &format!("Topic {i}")).id).collect();

        for i in &adds {
            engine.tag(&page(1), terms[*i]).unwrap();
        }
        let listed: Vec<TermId> = engine.tags_of(&page(1)).unwrap().iter().map(|t| t.id).collect();
        let expected: Vec<TermId> = adds.iter().map(|i| terms[*i]).collect();
        prop_assert_eq!(listed, expected);

        let order: Vec<TermId> = reorder.iter().map(|i| terms[*i]).collect();
        engine.reorder_tags(&page(1), &order).unwrap();
        let listed: Vec<TermId> = engine.tags_of(&page(1)).unwrap().iter().map(|t| t.id).collect();
        prop_assert_eq!(listed, order);
    }
}
