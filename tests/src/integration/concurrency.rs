//! # Parallel Writers
//!
//! Writers on different trees run side by side; writers on one tree
//! serialise. Either way every tree ends up consistent with its root and no
//! single-select tree ends up holding two tags on one owner.

use super::support::{child, engine, page, root, tree_matches_root};
use at_01_term_hierarchy::Term;
use std::sync::Arc;
use std::thread;
use taxonomy_runtime::EngineError;

#[test]
fn test_parallel_trees_stay_consistent() {
    let engine = Arc::new(engine());
    let roots: Vec<_> = (0..4).map(|i| root(&engine, &format!("Tree {i}"))).collect();

    let handles: Vec<_> = roots
        .iter()
        .map(|tree| {
            let engine = engine.clone();
            let tree_id = tree.id;
            thread::spawn(move || {
                let mut parent = tree_id;
                for i in 0..25 {
                    let node = child(&engine, parent, &format!("Node {i}"));
                    if i % 5 == 4 {
                        parent = node.id;
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let forest = engine.forest().unwrap();
    for tree in &roots {
        assert_eq!(forest.terms_of_type(tree.id).unwrap().len(), 26);
        assert!(tree_matches_root(&engine, tree.id));
    }
}

#[test]
fn test_root_flips_during_child_creation() {
    let engine = Arc::new(engine());
    let tree = root(&engine, "Tree");

    let creator = {
        let engine = engine.clone();
        thread::spawn(move || {
            for i in 0..40 {
                child(&engine, tree.id, &format!("Leaf {i}"));
            }
        })
    };
    let flipper = {
        let engine = engine.clone();
        thread::spawn(move || {
            for i in 0..40 {
                let root = engine
                    .get_term(tree.id)
                    .unwrap()
                    .internal_only(i % 2 == 0)
                    .single_select(i % 3 == 0);
                engine.update_term(root).unwrap();
            }
        })
    };
    creator.join().unwrap();
    flipper.join().unwrap();

    assert!(tree_matches_root(&engine, tree.id));
}

#[test]
fn test_racing_tag_writes_respect_single_select() {
    for _ in 0..20 {
        let engine = Arc::new(engine());
        let colour = root(&engine, "Colour");
        let red = child(&engine, colour.id, "Red");
        let blue = child(&engine, colour.id, "Blue");

        let flip = {
            let engine = engine.clone();
            thread::spawn(move || {
                let single = engine.get_term(colour.id).unwrap().single_select(true);
                engine.update_term(single)
            })
        };
        let write = {
            let engine = engine.clone();
            thread::spawn(move || engine.set_tags(&page(1), &[red.id, blue.id]))
        };
        let flipped = flip.join().unwrap();
        let written = write.join().unwrap();

        match (flipped, written) {
            // Tags landed first: the flag is frozen.
            (Err(_), Ok(rows)) => assert_eq!(rows.len(), 2),
            // Flag landed first: the two-tag write is refused.
            (Ok(_), Err(EngineError::Rejected(_))) => {
                assert!(engine.tags_of(&page(1)).unwrap().is_empty())
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let colour = engine.get_term(colour.id).unwrap();
        let stored = engine.tags_of(&page(1)).unwrap();
        assert!(!(colour.single_select && stored.len() > 1));
    }
}

#[test]
fn test_parallel_owners_keep_their_own_order() {
    let engine = Arc::new(engine());
    let topic = root(&engine, "Topic");
    let terms: Vec<_> = (0..6)
        .map(|i| engine.create_term(Term::new(format!("T{i}")).with_parent(topic.id)).unwrap().id)
        .collect();
    let terms = Arc::new(terms);

    let handles: Vec<_> = (1..=4u64)
        .map(|owner| {
            let engine = engine.clone();
            let terms = terms.clone();
            thread::spawn(move || {
                for id in terms.iter().rev() {
                    engine.tag(&page(owner), *id).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let expected: Vec<_> = terms.iter().rev().copied().collect();
    for owner in 1..=4u64 {
        let listed: Vec<_> = engine.tags_of(&page(owner)).unwrap().iter().map(|t| t.id).collect();
        assert_eq!(listed, expected);
    }
}
