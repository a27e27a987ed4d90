//! # Hierarchy Index
//!
//! `TermForest` is an immutable snapshot of every term, indexed by id and by
//! parent. All read-side hierarchy questions (ancestors, descendants, root,
//! depth, slug paths) are answered from one snapshot so a single validation
//! never observes a half-propagated tree.
//!
//! ## Cycle guard
//!
//! Parent links written through the term service cannot form a cycle, but a
//! snapshot may be built from any store. Every walk therefore carries a
//! visited set and reports `HierarchyError::CycleDetected` instead of
//! looping. Depth itself is limited on create, not on read.

use crate::domain::entities::Term;
use crate::domain::errors::{HierarchyError, HierarchyResult};
use crate::domain::value_objects::HierarchyConfig;
use shared_types::TermId;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// Read-only hierarchy index over a set of saved terms.
#[derive(Debug, Clone, Default)]
pub struct TermForest {
    terms: BTreeMap<TermId, Term>,
    /// Children per parent (`None` = roots), ordered by `(sort, id)`.
    children: HashMap<Option<TermId>, Vec<TermId>>,
    config: HierarchyConfig,
}

impl TermForest {
    /// Build a snapshot with the default hierarchy configuration.
    pub fn new(terms: impl IntoIterator<Item = Term>) -> Self {
        Self::with_config(terms, HierarchyConfig::default())
    }

    pub fn with_config(terms: impl IntoIterator<Item = Term>, config: HierarchyConfig) -> Self {
        let terms: BTreeMap<TermId, Term> = terms.into_iter().map(|t| (t.id, t)).collect();

        let mut children: HashMap<Option<TermId>, Vec<TermId>> = HashMap::new();
        for term in terms.values() {
            children.entry(term.parent_id).or_default().push(term.id);
        }
        for ids in children.values_mut() {
            ids.sort_by_key(|id| terms.get(id).map(|t| (t.sort, *id)));
        }

        Self {
            terms,
            children,
            config,
        }
    }

    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, id: TermId) -> bool {
        self.terms.contains_key(&id)
    }

    pub fn find(&self, id: TermId) -> Option<&Term> {
        self.terms.get(&id)
    }

    pub fn get(&self, id: TermId) -> HierarchyResult<&Term> {
        self.terms
            .get(&id)
            .ok_or(HierarchyError::TermNotFound { term_id: id })
    }

    /// All terms in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }

    /// Direct children of a term, ordered by `(sort, id)`.
    pub fn children(&self, id: TermId) -> Vec<&Term> {
        self.children_of(Some(id))
    }

    /// Root terms (types), ordered by `(sort, id)`.
    pub fn roots(&self) -> Vec<&Term> {
        self.children_of(None)
    }

    fn children_of(&self, parent: Option<TermId>) -> Vec<&Term> {
        self.children
            .get(&parent)
            .map(|ids| ids.iter().filter_map(|id| self.terms.get(id)).collect())
            .unwrap_or_default()
    }

    /// Ancestors of a term, root first, excluding the term itself.
    pub fn ancestors(&self, id: TermId) -> HierarchyResult<Vec<&Term>> {
        let term = self.get(id)?;
        let mut visited = HashSet::from([id]);
        let mut path = Vec::new();
        let mut next = term.parent_id;

        while let Some(parent_id) = next {
            if !visited.insert(parent_id) {
                return Err(HierarchyError::CycleDetected { term_id: parent_id });
            }
            let parent = self
                .terms
                .get(&parent_id)
                .ok_or(HierarchyError::ParentNotFound { parent_id })?;
            path.push(parent);
            next = parent.parent_id;
        }

        path.reverse();
        Ok(path)
    }

    /// The term whose id equals `term.type_id`.
    pub fn root(&self, id: TermId) -> HierarchyResult<&Term> {
        let term = self.get(id)?;
        self.get(term.type_id)
    }

    /// Number of ancestors; 0 for roots.
    pub fn depth(&self, id: TermId) -> HierarchyResult<usize> {
        Ok(self.ancestors(id)?.len())
    }

    /// Every node below `id`, breadth-first, excluding `id` itself.
    pub fn descendants(&self, id: TermId) -> HierarchyResult<Vec<&Term>> {
        self.get(id)?;
        let mut visited = HashSet::from([id]);
        let mut queue = VecDeque::from([id]);
        let mut found = Vec::new();

        while let Some(current) = queue.pop_front() {
            for child in self.children(current) {
                if !visited.insert(child.id) {
                    return Err(HierarchyError::CycleDetected { term_id: child.id });
                }
                queue.push_back(child.id);
                found.push(child);
            }
        }

        Ok(found)
    }

    /// A root and all of its descendants.
    pub fn terms_of_type(&self, type_id: TermId) -> HierarchyResult<Vec<&Term>> {
        let root = self.get(type_id)?;
        let mut terms = vec![root];
        terms.extend(self.descendants(type_id)?);
        Ok(terms)
    }

    /// Walk `path` one segment at a time from `start_parent` (`None` = roots),
    /// matching each segment against the children's `url_segment`.
    pub fn resolve_by_slug_path(
        &self,
        path: &[&str],
        start_parent: Option<TermId>,
    ) -> HierarchyResult<&Term> {
        let not_found = || HierarchyError::SlugPathNotFound {
            path: path.join("/"),
        };

        let mut parent = start_parent;
        let mut current = None;
        for segment in path {
            let child = self
                .children_of(parent)
                .into_iter()
                .find(|t| t.url_segment == *segment)
                .ok_or_else(not_found)?;
            parent = Some(child.id);
            current = Some(child);
        }

        current.ok_or_else(not_found)
    }

    /// Ancestor names then the term's own name, joined by the crumb separator.
    pub fn hierarchy_display(&self, id: TermId) -> HierarchyResult<String> {
        let term = self.get(id)?;
        let mut names: Vec<&str> = self
            .ancestors(id)?
            .into_iter()
            .map(|t| t.name.as_str())
            .collect();
        names.push(term.name.as_str());
        Ok(names.join(&self.config.crumb_separator))
    }

    /// The roots among `type_ids` whose SingleSelect flag is set.
    pub fn single_select_types(
        &self,
        type_ids: impl IntoIterator<Item = TermId>,
    ) -> BTreeSet<TermId> {
        type_ids
            .into_iter()
            .filter(|id| {
                self.terms
                    .get(id)
                    .is_some_and(|t| t.is_root() && t.single_select)
            })
            .collect()
    }
}
