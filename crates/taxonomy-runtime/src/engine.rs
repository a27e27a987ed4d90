//! # Taxonomy Engine
//!
//! One facade over the three subsystems. The engine owns the behaviour
//! that spans them:
//!
//! - deleting a term removes every tag row of the deleted subtree
//! - `set_tags` is a hard gate: the owner's tags are replaced only when the
//!   candidate set passes both tagging rules
//! - tag writes hold the tree locks of the affected taxonomies, so a root's
//!   SingleSelect flag cannot change between validation and write
//!
//! ```text
//! TaxonomyEngine
//!   ├── TaxonomyService (at-01) ──TermUsageProbe──┐
//!   ├── TagLedger       (at-02) ←─────────────────┘
//!   └── TaggingRuleValidator (at-03)
//! ```

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use at_01_term_hierarchy::{
    HierarchyError, InMemoryTermStore, TaxonomyApi, TaxonomyService, Term, TermForest,
    TermStore,
};
use at_02_tag_ledger::{
    AssignmentStore, InMemoryAssignmentStore, LedgerError, Orphan, OwnerDirectory, TagAssignment,
    TagLedger, TagLedgerApi, DEFAULT_RELATION,
};
use at_03_tagging_rules::{
    required_type_names, resolve_candidates, TaggingRuleValidator, TaggingRulesApi,
    ValidationMode, ValidationReport,
};
use at_telemetry::{log_owner_event, log_term_event};
use serde::{Deserialize, Serialize};
use shared_types::{OwnerRef, OwnerType, TermId};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

const SUBSYSTEM: &str = "runtime";

/// Ledger type used by an engine over term store `S`.
pub type EngineLedger<S, A> = TagLedger<A, S>;

/// Term service type used by an engine over term store `S`.
pub type EngineTermService<S, A> = TaxonomyService<S, EngineLedger<S, A>>;

/// Engine over the in-memory adapters.
pub type InMemoryEngine = TaxonomyEngine<InMemoryTermStore, InMemoryAssignmentStore>;

/// Outcome of deleting a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDeletion {
    /// Deleted terms, deepest first, the requested term last.
    pub terms: Vec<TermId>,
    /// Tag rows removed with them.
    pub assignments: usize,
}

/// Taxonomy engine facade.
pub struct TaxonomyEngine<S: TermStore, A: AssignmentStore> {
    terms: EngineTermService<S, A>,
    ledger: Arc<EngineLedger<S, A>>,
    rules: TaggingRuleValidator,
}

impl InMemoryEngine {
    /// Engine over fresh in-memory stores.
    pub fn in_memory(config: &EngineConfig) -> Self {
        Self::new(
            Arc::new(InMemoryTermStore::new()),
            Arc::new(InMemoryAssignmentStore::new()),
            config,
        )
    }
}

impl<S: TermStore, A: AssignmentStore> TaxonomyEngine<S, A> {
    /// Wire the subsystems over the given stores and register the configured
    /// owner types.
    pub fn new(term_store: Arc<S>, assignments: Arc<A>, config: &EngineConfig) -> Self {
        let ledger = Arc::new(TagLedger::new(assignments, term_store.clone()));
        for owner_type in &config.owner_types {
            ledger.register_owner_type(owner_type.as_str(), DEFAULT_RELATION);
        }
        for (owner_type, paths) in &config.default_terms {
            if let Err(err) = ledger.set_default_terms(owner_type.as_str(), paths.clone()) {
                warn!(
                    subsystem = SUBSYSTEM,
                    owner_type = %owner_type,
                    error = %err,
                    "[runtime] Ignoring default terms of unregistered owner type"
                );
            }
        }

        let terms = TaxonomyService::new(term_store, ledger.clone())
            .with_config(config.hierarchy.clone())
            .with_slug_config(config.slugs.clone());

        Self {
            terms,
            ledger,
            rules: TaggingRuleValidator::new(config.rules.clone()),
        }
    }

    pub fn terms(&self) -> &EngineTermService<S, A> {
        &self.terms
    }

    pub fn ledger(&self) -> &Arc<EngineLedger<S, A>> {
        &self.ledger
    }

    pub fn rules(&self) -> &TaggingRuleValidator {
        &self.rules
    }

    /// Register a taggable owner type. Returns `true` if it replaced an
    /// existing registration.
    pub fn register_owner_type(
        &self,
        owner_type: impl Into<OwnerType>,
        relation_name: impl Into<String>,
    ) -> bool {
        self.ledger.register_owner_type(owner_type, relation_name)
    }

    // ---------------------------------------------------------------------
    // Terms
    // ---------------------------------------------------------------------

    pub fn create_term(&self, term: Term) -> EngineResult<Term> {
        Ok(self.terms.create_term(term)?)
    }

    pub fn update_term(&self, term: Term) -> EngineResult<Term> {
        Ok(self.terms.update_term(term)?)
    }

    /// Delete a term with its descendants and every tag row using them.
    ///
    /// Tag rows of terms that are gone are removed even when the hierarchy
    /// reports a failure after deleting them.
    pub fn delete_term(&self, id: TermId) -> EngineResult<TermDeletion> {
        let forest = self.terms.forest()?;
        let type_id = forest.get(id)?.type_id;
        let mut subtree: BTreeSet<TermId> =
            forest.descendants(id)?.iter().map(|t| t.id).collect();
        subtree.insert(id);

        let terms = match self.terms.delete_term(id) {
            Ok(terms) => terms,
            Err(err) => {
                let mut gone = BTreeSet::new();
                for term_id in subtree {
                    let stored = self.terms.store().get(term_id).map_err(HierarchyError::from)?;
                    if stored.is_none() {
                        gone.insert(term_id);
                    }
                }
                let assignments = self.ledger.remove_for_terms(&gone)?;
                warn!(
                    subsystem = SUBSYSTEM,
                    term_id = %id,
                    deleted = gone.len(),
                    assignments,
                    error = %err,
                    "[runtime] Term delete failed part way, removed tag rows of deleted terms"
                );
                return Err(err.into());
            }
        };
        let deleted: BTreeSet<TermId> = terms.iter().copied().collect();
        let assignments = self.ledger.remove_for_terms(&deleted)?;

        log_term_event!(
            info,
            SUBSYSTEM,
            "[runtime] Term deleted with its tag rows",
            id,
            type_id,
            terms = terms.len(),
            assignments
        );
        Ok(TermDeletion { terms, assignments })
    }

    pub fn get_term(&self, id: TermId) -> EngineResult<Term> {
        Ok(self.terms.get_term(id)?)
    }

    /// Consistent snapshot of every term.
    pub fn forest(&self) -> EngineResult<TermForest> {
        Ok(self.terms.forest()?)
    }

    /// Find a term by its slug path, starting below `start_parent` (`None` =
    /// among the roots).
    pub fn resolve_slug_path(&self, path: &[&str], start_parent: Option<TermId>) -> EngineResult<Term> {
        Ok(self
            .forest()?
            .resolve_by_slug_path(path, start_parent)?
            .clone())
    }

    /// Ancestor names and the term's own name, joined by the configured
    /// separator.
    pub fn hierarchy_display(&self, id: TermId) -> EngineResult<String> {
        Ok(self.forest()?.hierarchy_display(id)?)
    }

    /// Whether the SingleSelect flag of the term's taxonomy is frozen.
    pub fn is_single_select_locked(&self, type_id: TermId) -> EngineResult<bool> {
        Ok(self.terms.is_single_select_locked(type_id)?)
    }

    pub fn effective_required_types(&self, id: TermId) -> EngineResult<BTreeSet<TermId>> {
        let forest = self.forest()?;
        Ok(self.rules.effective_required_types(&forest, id)?)
    }

    /// Names of the effective required types, in id order.
    pub fn required_type_names(&self, id: TermId) -> EngineResult<Vec<String>> {
        let forest = self.forest()?;
        let term = forest.get(id)?;
        Ok(required_type_names(&forest, term)?)
    }

    // ---------------------------------------------------------------------
    // Tags
    // ---------------------------------------------------------------------

    /// Append one tag without running the tagging rules.
    ///
    /// Use `set_tags` for gated writes; `validate_owner` reports whether the
    /// resulting set is acceptable.
    pub fn tag(&self, owner: &OwnerRef, term_id: TermId) -> EngineResult<TagAssignment> {
        let type_id = self.terms.get_term(term_id)?.type_id;
        let assignment = self
            .terms
            .with_trees_locked(&BTreeSet::from([type_id]), || self.ledger.add(owner, term_id))?;

        log_owner_event!(debug, SUBSYSTEM, "[runtime] Tag added", owner, term_id = %term_id);
        Ok(assignment)
    }

    /// Configure the default term slug paths of a registered owner type.
    pub fn set_default_terms(
        &self,
        owner_type: impl Into<OwnerType>,
        paths: Vec<String>,
    ) -> EngineResult<()> {
        Ok(self.ledger.set_default_terms(owner_type, paths)?)
    }

    /// Give a newly created owner the default terms of its type.
    ///
    /// Each configured slug path is resolved from the roots; paths that
    /// match no term are skipped. The terms are appended in configured order
    /// without running the tagging rules. An owner receives its defaults
    /// once: later calls add nothing, even if the tags were removed since.
    /// Types without default terms leave the owner unmarked, so defaults
    /// configured later still apply.
    pub fn init_default_terms(&self, owner: &OwnerRef) -> EngineResult<Vec<TagAssignment>> {
        if !self.ledger.is_registered(&owner.owner_type) {
            return Err(LedgerError::UnregisteredOwnerType {
                owner_type: owner.owner_type.clone(),
            }
            .into());
        }
        let paths = self.ledger.default_terms(&owner.owner_type);
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        let forest = self.forest()?;
        let mut terms = Vec::new();
        let mut type_ids = BTreeSet::new();
        for path in &paths {
            let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
            let Ok(term) = forest.resolve_by_slug_path(&segments, None) else {
                debug!(
                    subsystem = SUBSYSTEM,
                    owner = %owner,
                    path = %path,
                    "[runtime] Default term path matches no term, skipping"
                );
                continue;
            };
            if !terms.contains(&term.id) {
                terms.push(term.id);
                type_ids.insert(term.type_id);
            }
        }

        let applied = self
            .terms
            .with_trees_locked(&type_ids, || self.ledger.apply_defaults(owner, &terms))?;
        let Some(rows) = applied else {
            return Ok(Vec::new());
        };

        log_owner_event!(
            info,
            SUBSYSTEM,
            "[runtime] Default terms applied",
            owner,
            tags = rows.len()
        );
        Ok(rows)
    }

    pub fn untag(&self, owner: &OwnerRef, term_id: TermId) -> EngineResult<bool> {
        Ok(self.ledger.remove(owner, term_id)?)
    }

    /// Reorder an owner's tags; `order` must list each current tag once.
    pub fn reorder_tags(&self, owner: &OwnerRef, order: &[TermId]) -> EngineResult<()> {
        Ok(self.ledger.reorder(owner, order)?)
    }

    /// Replace an owner's tags with `candidate`, only if it passes validation.
    ///
    /// ## Returns
    ///
    /// - `Ok(rows)`: the new assignments in candidate order
    /// - `Err(Rejected(report))`: the candidate violates a rule; the owner's
    ///   tags are unchanged
    pub fn set_tags(&self, owner: &OwnerRef, candidate: &[TermId]) -> EngineResult<Vec<TagAssignment>> {
        if !self.ledger.is_registered(&owner.owner_type) {
            return Err(LedgerError::UnregisteredOwnerType {
                owner_type: owner.owner_type.clone(),
            }
            .into());
        }

        let type_ids: BTreeSet<TermId> = {
            let forest = self.forest()?;
            resolve_candidates(&forest, candidate)?
                .iter()
                .map(|t| t.type_id)
                .collect()
        };

        self.terms
            .with_trees_locked(&type_ids, || -> EngineResult<Vec<TagAssignment>> {
                let forest = self.forest()?;
                let report = self
                    .rules
                    .validate(&forest, candidate, ValidationMode::Enforce)?;
                if !report.is_valid() {
                    log_owner_event!(
                        warn,
                        SUBSYSTEM,
                        "[runtime] Tag write rejected",
                        owner,
                        violations = report.violation_count()
                    );
                    return Err(EngineError::Rejected(Box::new(report)));
                }

                let rows = self.ledger.replace(owner, &report.candidate)?;
                log_owner_event!(info, SUBSYSTEM, "[runtime] Tags replaced", owner, tags = rows.len());
                Ok(rows)
            })
    }

    /// Tags of an owner in sort order. Rows whose term no longer exists are
    /// left out.
    pub fn tags_of(&self, owner: &OwnerRef) -> EngineResult<Vec<Term>> {
        let forest = self.forest()?;
        Ok(self
            .ledger
            .terms_of(owner)?
            .into_iter()
            .filter_map(|id| forest.find(id).cloned())
            .collect())
    }

    /// Tags of an owner that may be shown to end users.
    pub fn displayable_tags_of(&self, owner: &OwnerRef) -> EngineResult<Vec<Term>> {
        Ok(self
            .tags_of(owner)?
            .into_iter()
            .filter(|t| !t.internal_only)
            .collect())
    }

    /// Terms an editor can still pick for this owner.
    pub fn selectable_terms(&self, owner: &OwnerRef) -> EngineResult<Vec<Term>> {
        let forest = self.forest()?;
        let current = self.ledger.terms_of(owner)?;
        Ok(self
            .rules
            .selectable_terms(&forest, &current)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Validate a candidate tag set against the current hierarchy.
    pub fn validate(&self, candidate: &[TermId], mode: ValidationMode) -> EngineResult<ValidationReport> {
        let forest = self.forest()?;
        Ok(self.rules.validate(&forest, candidate, mode)?)
    }

    /// Validate an owner's stored tags, ignoring rows whose term is gone.
    pub fn validate_owner(&self, owner: &OwnerRef, mode: ValidationMode) -> EngineResult<ValidationReport> {
        let forest = self.forest()?;
        let current: Vec<TermId> = self
            .ledger
            .terms_of(owner)?
            .into_iter()
            .filter(|id| forest.contains(*id))
            .collect();
        Ok(self.rules.validate(&forest, &current, mode)?)
    }

    /// Render a report in the configured message style.
    pub fn render(&self, report: &ValidationReport) -> String {
        self.rules.render(report)
    }

    /// Owners carrying `term_id`.
    pub fn tagged_owners(&self, term_id: TermId) -> EngineResult<BTreeSet<OwnerRef>> {
        Ok(self.ledger.tagged_owners(term_id)?)
    }

    /// Owners carrying any term of the taxonomy rooted at `type_id`.
    pub fn owners_of_type(&self, type_id: TermId) -> EngineResult<BTreeSet<OwnerRef>> {
        let forest = self.forest()?;
        let terms: BTreeSet<TermId> = forest
            .terms_of_type(type_id)?
            .iter()
            .map(|t| t.id)
            .collect();
        Ok(self.ledger.tagged_owners_of_any(&terms)?)
    }

    /// Remove every tag row of a deleted owner.
    pub fn delete_owner(&self, owner: &OwnerRef) -> EngineResult<usize> {
        Ok(self.ledger.remove_owner(owner)?)
    }

    // ---------------------------------------------------------------------
    // Maintenance
    // ---------------------------------------------------------------------

    /// List tag rows whose term, owner or owner type is gone.
    pub fn find_orphans(&self, owners: &dyn OwnerDirectory) -> EngineResult<Vec<Orphan>> {
        Ok(self.ledger.find_orphans(owners)?)
    }

    /// Scan for orphans and remove them. Runs only when a caller invokes it.
    pub fn sweep_orphans(&self, owners: &dyn OwnerDirectory) -> EngineResult<usize> {
        let orphans = self.find_orphans(owners)?;
        let rows: Vec<TagAssignment> = orphans.into_iter().map(|o| o.assignment).collect();
        Ok(self.ledger.remove_assignments(&rows)?)
    }
}
