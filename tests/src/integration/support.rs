//! Engine and tree builders shared by the integration tests.

use at_01_term_hierarchy::Term;
use shared_types::{OwnerRef, TermId};
use taxonomy_runtime::{EngineConfig, InMemoryEngine};

pub const PAGE: &str = "Page";

/// In-memory engine with `Page` registered as taggable.
pub fn engine() -> InMemoryEngine {
    let config = EngineConfig {
        owner_types: vec![PAGE.to_string()],
        ..EngineConfig::default()
    };
    InMemoryEngine::in_memory(&config)
}

pub fn page(id: u64) -> OwnerRef {
    OwnerRef::new(PAGE, id)
}

pub fn root(engine: &InMemoryEngine, name: &str) -> Term {
    engine.create_term(Term::new(name)).unwrap()
}

pub fn child(engine: &InMemoryEngine, parent: TermId, name: &str) -> Term {
    engine
        .create_term(Term::new(name).with_parent(parent))
        .unwrap()
}

/// Every term of the tree under `root_id` carries the root's id and flags.
pub fn tree_matches_root(engine: &InMemoryEngine, root_id: TermId) -> bool {
    let forest = engine.forest().unwrap();
    let root = forest.get(root_id).unwrap();
    forest.terms_of_type(root_id).unwrap().iter().all(|t| {
        t.type_id == root.id
            && t.single_select == root.single_select
            && t.internal_only == root.internal_only
    })
}
