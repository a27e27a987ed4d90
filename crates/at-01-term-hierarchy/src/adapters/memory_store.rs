use crate::domain::Term;
use crate::ports::TermStore;
use parking_lot::RwLock;
use shared_types::{StoreError, TermId};
use std::collections::BTreeMap;

struct State {
    next_id: u64,
    terms: BTreeMap<TermId, Term>,
}

/// In-memory implementation of `TermStore`.
///
/// Ids are assigned sequentially from 1.
pub struct InMemoryTermStore {
    state: RwLock<State>,
}

impl InMemoryTermStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                next_id: 1,
                terms: BTreeMap::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.state.read().terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryTermStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TermStore for InMemoryTermStore {
    fn get(&self, id: TermId) -> Result<Option<Term>, StoreError> {
        Ok(self.state.read().terms.get(&id).cloned())
    }

    fn children_of(&self, parent: Option<TermId>) -> Result<Vec<Term>, StoreError> {
        let state = self.state.read();
        let mut children: Vec<Term> = state
            .terms
            .values()
            .filter(|t| t.parent_id == parent)
            .cloned()
            .collect();
        children.sort_by_key(|t| (t.sort, t.id));
        Ok(children)
    }

    fn insert(&self, mut term: Term) -> Result<TermId, StoreError> {
        if term.is_saved() {
            return Err(StoreError::Constraint(format!(
                "term {} already has an id",
                term.id
            )));
        }
        let mut state = self.state.write();
        let id = TermId(state.next_id);
        state.next_id += 1;
        term.id = id;
        state.terms.insert(id, term);
        Ok(id)
    }

    fn update(&self, term: &Term) -> Result<(), StoreError> {
        let mut state = self.state.write();
        match state.terms.get_mut(&term.id) {
            Some(existing) => {
                *existing = term.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("term {}", term.id))),
        }
    }

    fn delete(&self, id: TermId) -> Result<(), StoreError> {
        self.state.write().terms.remove(&id);
        Ok(())
    }

    fn slug_taken(
        &self,
        parent: Option<TermId>,
        slug: &str,
        exclude: TermId,
    ) -> Result<bool, StoreError> {
        Ok(self
            .state
            .read()
            .terms
            .values()
            .any(|t| t.parent_id == parent && t.id != exclude && t.url_segment == slug))
    }

    fn load_all(&self) -> Result<Vec<Term>, StoreError> {
        Ok(self.state.read().terms.values().cloned().collect())
    }
}
