//! Term lifecycle service.
//!
//! Implements `TaxonomyApi` over a `TermStore`. Every write to a tree runs
//! under that tree's root lock, so the after-write propagation walk never
//! interleaves with another write to the same tree. Root-level writes that
//! can change root slugs additionally take the root-level lock. Writes that
//! name required types also hold those roots' locks, so a required root
//! cannot disappear between the check and the write. Multi-lock holders
//! always acquire in ascending id order.

use crate::adapters::{RulePluralizer, UrlSegmentGenerator};
use crate::domain::{
    apply_before_write, plan_propagation, HierarchyConfig, HierarchyError, HierarchyResult,
    SlugConfig, Term, TermForest,
};
use crate::ports::inbound::TaxonomyApi;
use crate::ports::outbound::{Pluralizer, SlugGenerator, TermStore, TermUsageProbe};
use parking_lot::Mutex;
use shared_types::TermId;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Lock key guarding the set of root terms (root slugs share one scope).
const ROOT_LEVEL: TermId = TermId::UNSAVED;

/// Term hierarchy service.
pub struct TaxonomyService<S: TermStore, U: TermUsageProbe> {
    store: Arc<S>,
    usage: Arc<U>,
    slugs: Arc<dyn SlugGenerator>,
    plurals: Arc<dyn Pluralizer>,
    config: HierarchyConfig,
    slug_config: SlugConfig,
    tree_locks: Mutex<HashMap<TermId, Arc<Mutex<()>>>>,
}

impl<S: TermStore, U: TermUsageProbe> TaxonomyService<S, U> {
    pub fn new(store: Arc<S>, usage: Arc<U>) -> Self {
        Self {
            store,
            usage,
            slugs: Arc::new(UrlSegmentGenerator::default()),
            plurals: Arc::new(RulePluralizer),
            config: HierarchyConfig::default(),
            slug_config: SlugConfig::default(),
            tree_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_config(mut self, config: HierarchyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_slug_config(mut self, slug_config: SlugConfig) -> Self {
        self.slugs = Arc::new(UrlSegmentGenerator::new(slug_config.clone()));
        self.slug_config = slug_config;
        self
    }

    pub fn with_slug_generator(mut self, slugs: Arc<dyn SlugGenerator>) -> Self {
        self.slugs = slugs;
        self
    }

    pub fn with_pluralizer(mut self, plurals: Arc<dyn Pluralizer>) -> Self {
        self.plurals = plurals;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    fn tree_lock(&self, root: TermId) -> Arc<Mutex<()>> {
        self.tree_locks.lock().entry(root).or_default().clone()
    }

    /// Lock handles for several trees, in ascending id order. Every caller
    /// holding more than one tree lock acquires them in this order.
    fn tree_locks_for(&self, keys: &BTreeSet<TermId>) -> Vec<Arc<Mutex<()>>> {
        keys.iter().map(|id| self.tree_lock(*id)).collect()
    }

    /// Run `f` while holding the write locks of the given trees.
    ///
    /// Callers use this to keep a tree's SingleSelect flag stable between
    /// validating and writing tags.
    pub fn with_trees_locked<R>(&self, type_ids: &BTreeSet<TermId>, f: impl FnOnce() -> R) -> R {
        let locks = self.tree_locks_for(type_ids);
        let _guards: Vec<_> = locks.iter().map(|lock| lock.lock()).collect();
        f()
    }

    fn load(&self, id: TermId) -> HierarchyResult<Term> {
        self.store
            .get(id)?
            .ok_or(HierarchyError::TermNotFound { term_id: id })
    }

    fn snapshot(&self) -> HierarchyResult<TermForest> {
        Ok(TermForest::with_config(
            self.store.load_all()?,
            self.config.clone(),
        ))
    }

    fn check_name(term: &Term) -> HierarchyResult<()> {
        if term.name.trim().is_empty() {
            return Err(HierarchyError::EmptyName);
        }
        Ok(())
    }

    /// Required types must be existing roots other than the term itself.
    fn check_required_types(&self, term: &Term) -> HierarchyResult<()> {
        for required_id in &term.required_types {
            let valid = *required_id != term.id
                && self
                    .store
                    .get(*required_id)?
                    .is_some_and(|required| required.is_root());
            if !valid {
                return Err(HierarchyError::InvalidRequiredType {
                    term_id: term.id,
                    required_id: *required_id,
                });
            }
        }
        Ok(())
    }

    /// A child of `parent` may have at most `max_depth` ancestors.
    fn check_depth(&self, parent: &Term) -> HierarchyResult<()> {
        let max_depth = self.config.max_depth;
        let exceeded = || HierarchyError::DepthExceeded {
            parent_id: parent.id,
            max_depth,
        };

        let mut depth = 1;
        let mut next = parent.parent_id;
        while let Some(ancestor_id) = next {
            if depth >= max_depth {
                return Err(exceeded());
            }
            depth += 1;
            next = self
                .store
                .get(ancestor_id)?
                .and_then(|ancestor| ancestor.parent_id);
        }

        if depth > max_depth {
            return Err(exceeded());
        }
        Ok(())
    }

    /// Title, plural title and slug back-fill.
    fn backfill(&self, term: &mut Term, previous_slug: Option<&str>) -> HierarchyResult<()> {
        if term.title.is_empty() {
            term.title = term.name.clone();
        }
        if term.title_plural.is_empty() {
            term.title_plural = self.plurals.pluralize(&term.name);
        }

        let raw = if term.url_segment.is_empty() {
            Some(term.name.clone())
        } else if previous_slug != Some(term.url_segment.as_str()) {
            Some(term.url_segment.clone())
        } else {
            None
        };

        if let Some(raw) = raw {
            let (parent, id) = (term.parent_id, term.id);
            let store = &self.store;
            term.url_segment = self.slugs.generate(
                &raw,
                &self.slug_config.scope_label,
                id,
                &|slug: &str| store.slug_taken(parent, slug, id),
            )?;
        }
        Ok(())
    }

    /// Rewrite every descendant whose inherited flags differ from `written`.
    fn propagate(&self, written: &Term) -> HierarchyResult<usize> {
        let forest = self.snapshot()?;
        let planned = plan_propagation(&forest, written)?;
        for descendant in &planned {
            debug!(
                term_id = %descendant.id,
                type_id = %descendant.type_id,
                "[at-01] Propagating root flags"
            );
            self.store.update(descendant)?;
        }
        Ok(planned.len())
    }

    fn in_use(&self, forest: &TermForest, type_id: TermId) -> HierarchyResult<bool> {
        let ids: BTreeSet<TermId> = forest
            .terms_of_type(type_id)?
            .into_iter()
            .map(|t| t.id)
            .collect();
        Ok(self.usage.is_any_in_use(&ids)?)
    }

    /// Remove a deleted root from every `required_types` set that names it.
    fn forget_required_type(&self, deleted_root: TermId) -> HierarchyResult<()> {
        let mut by_tree: BTreeMap<TermId, Vec<TermId>> = BTreeMap::new();
        for term in self.store.load_all()? {
            if term.required_types.contains(&deleted_root) {
                by_tree.entry(term.type_id).or_default().push(term.id);
            }
        }

        for (type_id, ids) in by_tree {
            let lock = self.tree_lock(type_id);
            let _guard = lock.lock();
            for id in ids {
                if let Some(mut term) = self.store.get(id)? {
                    if term.required_types.remove(&deleted_root) {
                        self.store.update(&term)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl<S: TermStore, U: TermUsageProbe> TaxonomyApi for TaxonomyService<S, U> {
    fn create_term(&self, mut term: Term) -> HierarchyResult<Term> {
        if term.is_saved() {
            return Err(HierarchyError::AlreadySaved { term_id: term.id });
        }
        Self::check_name(&term)?;

        let lock_key = match term.parent_id {
            Some(parent_id) => {
                self.store
                    .get(parent_id)?
                    .ok_or(HierarchyError::ParentNotFound { parent_id })?
                    .type_id
            }
            None => ROOT_LEVEL,
        };
        // Required roots stay locked until the row exists.
        let mut keys = term.required_types.clone();
        keys.insert(lock_key);
        let locks = self.tree_locks_for(&keys);
        let _guards: Vec<_> = locks.iter().map(|lock| lock.lock()).collect();

        self.check_required_types(&term)?;
        let parent = match term.parent_id {
            Some(parent_id) => Some(
                self.store
                    .get(parent_id)?
                    .ok_or(HierarchyError::ParentNotFound { parent_id })?,
            ),
            None => None,
        };
        if let Some(parent) = &parent {
            self.check_depth(parent).inspect_err(|_| {
                warn!(
                    parent_id = %parent.id,
                    max_depth = self.config.max_depth,
                    "[at-01] Refusing term deeper than the maximum depth"
                );
            })?;
        }
        apply_before_write(&mut term, parent.as_ref());

        let requested_slug = std::mem::take(&mut term.url_segment);
        term.id = self.store.insert(term.clone())?;
        apply_before_write(&mut term, parent.as_ref());
        term.url_segment = requested_slug;
        self.backfill(&mut term, None)?;
        self.store.update(&term)?;

        info!(
            term_id = %term.id,
            type_id = %term.type_id,
            slug = %term.url_segment,
            "[at-01] Created taxonomy term '{}'",
            term.name
        );
        Ok(term)
    }

    fn update_term(&self, mut term: Term) -> HierarchyResult<Term> {
        if !term.is_saved() {
            return Err(HierarchyError::Unsaved { name: term.name });
        }
        Self::check_name(&term)?;

        let type_id = self.load(term.id)?.type_id;
        let mut keys = term.required_types.clone();
        keys.insert(type_id);
        if term.is_root() {
            keys.insert(ROOT_LEVEL);
        }
        let locks = self.tree_locks_for(&keys);
        let _guards: Vec<_> = locks.iter().map(|lock| lock.lock()).collect();

        let existing = self.load(term.id)?;
        if existing.parent_id != term.parent_id {
            warn!(term_id = %term.id, "[at-01] Refusing to move taxonomy term");
            return Err(HierarchyError::ReparentUnsupported { term_id: term.id });
        }
        self.check_required_types(&term)?;

        if term.is_root() && existing.single_select != term.single_select {
            let forest = self.snapshot()?;
            if self.in_use(&forest, term.id)? {
                warn!(
                    type_id = %term.id,
                    "[at-01] SingleSelect change refused: taxonomy is in use"
                );
                return Err(HierarchyError::SingleSelectLocked { type_id: term.id });
            }
        }

        let parent = match term.parent_id {
            Some(parent_id) => Some(
                self.store
                    .get(parent_id)?
                    .ok_or(HierarchyError::ParentNotFound { parent_id })?,
            ),
            None => None,
        };
        apply_before_write(&mut term, parent.as_ref());
        self.backfill(&mut term, Some(&existing.url_segment))?;
        self.store.update(&term)?;

        let propagated = self.propagate(&term)?;
        info!(
            term_id = %term.id,
            type_id = %term.type_id,
            propagated,
            "[at-01] Updated taxonomy term '{}'",
            term.name
        );
        Ok(term)
    }

    fn delete_term(&self, id: TermId) -> HierarchyResult<Vec<TermId>> {
        let existing = self.load(id)?;
        let deleted = {
            let lock = self.tree_lock(existing.type_id);
            let _guard = lock.lock();

            let forest = self.snapshot()?;
            let mut order: Vec<TermId> = forest.descendants(id)?.iter().map(|t| t.id).collect();
            order.reverse();
            order.push(id);

            for term_id in &order {
                self.store.delete(*term_id)?;
            }
            order
        };

        if existing.is_root() {
            self.tree_locks.lock().remove(&id);
            self.forget_required_type(id)?;
        }

        info!(
            term_id = %id,
            deleted = deleted.len(),
            "[at-01] Deleted taxonomy term '{}' and its descendants",
            existing.name
        );
        Ok(deleted)
    }

    fn get_term(&self, id: TermId) -> HierarchyResult<Term> {
        self.load(id)
    }

    fn forest(&self) -> HierarchyResult<TermForest> {
        self.snapshot()
    }

    fn is_single_select_locked(&self, type_id: TermId) -> HierarchyResult<bool> {
        let forest = self.snapshot()?;
        let root = forest.root(type_id)?.id;
        self.in_use(&forest, root)
    }
}
