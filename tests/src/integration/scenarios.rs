//! # Editor Scenarios
//!
//! End-to-end flows through the engine facade: build taxonomies, tag a page,
//! validate, delete.

use super::support::{child, engine, page, root};
use at_01_term_hierarchy::{HierarchyError, Term};
use at_02_tag_ledger::LedgerError;
use at_03_tagging_rules::ValidationMode;
use shared_types::{OwnerRef, TermId};
use std::collections::BTreeSet;
use taxonomy_runtime::{EngineConfig, EngineError, InMemoryEngine};

// =============================================================================
// SINGLE SELECT
// =============================================================================

#[test]
fn test_single_select_colour() {
    let engine = engine();
    let colour = engine
        .create_term(Term::new("Colour").single_select(true))
        .unwrap();
    let red = child(&engine, colour.id, "Red");
    let blue = child(&engine, colour.id, "Blue");

    let report = engine.validate(&[red.id], ValidationMode::Enforce).unwrap();
    assert!(report.is_valid());
    engine.set_tags(&page(1), &[red.id]).unwrap();

    let err = engine.set_tags(&page(1), &[red.id, blue.id]).unwrap_err();
    let report = err.report().unwrap();
    assert_eq!(report.single_select.len(), 1);
    let named: Vec<TermId> = report.single_select[0]
        .offending
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(named, vec![red.id, blue.id]);
    assert!(engine
        .render(report)
        .contains("either \"Red\", or \"Blue\""));

    let stored: Vec<TermId> = engine.tags_of(&page(1)).unwrap().iter().map(|t| t.id).collect();
    assert_eq!(stored, vec![red.id]);
}

// =============================================================================
// REQUIRED TYPES
// =============================================================================

#[test]
fn test_format_requires_audience() {
    let engine = engine();
    let audience = root(&engine, "Audience");
    let students = child(&engine, audience.id, "Students");
    let format = engine
        .create_term(Term::new("Format").requires(audience.id))
        .unwrap();
    let video = engine
        .create_term(
            Term::new("Video")
                .with_parent(format.id)
                .inherit_root_required_types(true),
        )
        .unwrap();

    engine.tag(&page(1), video.id).unwrap();
    let report = engine
        .validate_owner(&page(1), ValidationMode::Advisory)
        .unwrap();
    let required = report.required_types.as_ref().unwrap();
    let still_needed: Vec<TermId> = required.still_needed.iter().map(|t| t.id).collect();
    assert_eq!(still_needed, vec![audience.id]);
    assert_eq!(required.offending[0].id, video.id);

    engine.tag(&page(1), students.id).unwrap();
    assert!(engine
        .validate_owner(&page(1), ValidationMode::Advisory)
        .unwrap()
        .is_valid());
}

#[test]
fn test_inherit_flag_off_ignores_root_requirements() {
    let engine = engine();
    let audience = root(&engine, "Audience");
    let info_type = engine
        .create_term(Term::new("InfoType").requires(audience.id))
        .unwrap();
    let news = engine
        .create_term(
            Term::new("News")
                .with_parent(info_type.id)
                .inherit_root_required_types(false),
        )
        .unwrap();

    assert!(engine.effective_required_types(news.id).unwrap().is_empty());
    assert!(engine
        .validate(&[news.id], ValidationMode::Enforce)
        .unwrap()
        .is_valid());
    engine.set_tags(&page(1), &[news.id]).unwrap();
}

// =============================================================================
// DELETION
// =============================================================================

#[test]
fn test_deleting_root_removes_tree_and_tags() {
    let engine = engine();
    let colour = root(&engine, "Colour");
    let red = child(&engine, colour.id, "Red");
    let blue = child(&engine, colour.id, "Blue");
    let size = root(&engine, "Size");
    let large = child(&engine, size.id, "Large");

    engine.set_tags(&page(1), &[red.id, large.id]).unwrap();
    engine.set_tags(&page(2), &[blue.id]).unwrap();
    engine.set_tags(&page(3), &[colour.id]).unwrap();

    let deletion = engine.delete_term(colour.id).unwrap();
    assert_eq!(
        deletion.terms.iter().copied().collect::<BTreeSet<_>>(),
        BTreeSet::from([colour.id, red.id, blue.id])
    );
    assert_eq!(deletion.assignments, 3);

    for id in [colour.id, red.id, blue.id] {
        assert!(matches!(
            engine.get_term(id),
            Err(EngineError::Hierarchy(HierarchyError::TermNotFound { .. }))
        ));
        assert!(engine.tagged_owners(id).unwrap().is_empty());
    }
    let left: Vec<TermId> = engine.tags_of(&page(1)).unwrap().iter().map(|t| t.id).collect();
    assert_eq!(left, vec![large.id]);
    assert!(engine.tags_of(&page(2)).unwrap().is_empty());
}

#[test]
fn test_deleting_required_root_clears_requirement() {
    let engine = engine();
    let audience = root(&engine, "Audience");
    let format = engine
        .create_term(Term::new("Format").requires(audience.id))
        .unwrap();

    engine.delete_term(audience.id).unwrap();

    assert!(engine.get_term(format.id).unwrap().required_types.is_empty());
    assert!(engine
        .validate(&[format.id], ValidationMode::Enforce)
        .unwrap()
        .is_valid());
}

// =============================================================================
// REFERENCES AND NAVIGATION
// =============================================================================

#[test]
fn test_invalid_references_are_reported() {
    let engine = engine();
    let colour = root(&engine, "Colour");

    assert!(matches!(
        engine.tag(&OwnerRef::new("File", 1), colour.id),
        Err(EngineError::Ledger(LedgerError::UnregisteredOwnerType { .. }))
    ));
    assert!(matches!(
        engine.tag(&page(1), TermId(404)),
        Err(EngineError::Hierarchy(HierarchyError::TermNotFound { .. }))
    ));
    assert!(matches!(
        engine.resolve_slug_path(&["colour", "mauve"], None),
        Err(EngineError::Hierarchy(HierarchyError::SlugPathNotFound { .. }))
    ));
}

#[test]
fn test_breadcrumbs_and_slug_paths() {
    let engine = engine();
    let region = root(&engine, "Region");
    let europe = child(&engine, region.id, "Europe");
    let france = child(&engine, europe.id, "France");
    // Same name under another parent keeps its plain slug.
    let asia = child(&engine, region.id, "Asia");
    let other_france = child(&engine, asia.id, "France");

    assert_eq!(
        engine.hierarchy_display(france.id).unwrap(),
        "Region ▸ Europe ▸ France"
    );
    assert_eq!(france.url_segment, "france");
    assert_eq!(other_france.url_segment, "france");
    assert_eq!(
        engine
            .resolve_slug_path(&["region", "asia", "france"], None)
            .unwrap()
            .id,
        other_france.id
    );

    let duplicate = child(&engine, europe.id, "France");
    assert_eq!(duplicate.url_segment, "france-2");
}

#[test]
fn test_internal_taxonomy_hidden_from_display() {
    let engine = engine();
    let workflow = engine
        .create_term(Term::new("Workflow").internal_only(true))
        .unwrap();
    let draft = child(&engine, workflow.id, "Draft");
    let topic = root(&engine, "Topic");
    let science = child(&engine, topic.id, "Science");

    engine.set_tags(&page(1), &[draft.id, science.id]).unwrap();

    let shown: Vec<String> = engine
        .displayable_tags_of(&page(1))
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(shown, vec!["Science"]);
    assert_eq!(engine.tags_of(&page(1)).unwrap().len(), 2);
}

#[test]
fn test_deleted_owner_loses_its_tags() {
    let engine = engine();
    let topic = root(&engine, "Topic");
    let science = child(&engine, topic.id, "Science");
    engine.set_tags(&page(1), &[science.id]).unwrap();
    engine.set_tags(&page(2), &[science.id]).unwrap();

    assert_eq!(engine.delete_owner(&page(1)).unwrap(), 1);
    assert_eq!(
        engine.tagged_owners(science.id).unwrap(),
        BTreeSet::from([page(2)])
    );
}

// =============================================================================
// DEFAULT TERMS
// =============================================================================

#[test]
fn test_new_owner_receives_configured_default_terms() {
    let mut config = EngineConfig {
        owner_types: vec!["Page".to_string(), "File".to_string()],
        ..EngineConfig::default()
    };
    config.default_terms.insert(
        "Page".to_string(),
        vec![
            "information-type/news".to_string(),
            "publication-type/retired".to_string(),
            "publication-type/case-study".to_string(),
        ],
    );
    let engine = InMemoryEngine::in_memory(&config);
    let info_type = root(&engine, "Information type");
    let news = child(&engine, info_type.id, "News");
    let publication = root(&engine, "Publication type");
    let case_study = child(&engine, publication.id, "Case study");

    engine.tag(&page(1), case_study.id).unwrap();
    let added: Vec<TermId> = engine
        .init_default_terms(&page(1))
        .unwrap()
        .iter()
        .map(|row| row.term_id)
        .collect();
    assert_eq!(added, vec![news.id]);
    let listed: Vec<TermId> = engine.tags_of(&page(1)).unwrap().iter().map(|t| t.id).collect();
    assert_eq!(listed, vec![case_study.id, news.id]);

    engine.set_tags(&page(1), &[]).unwrap();
    assert!(engine.init_default_terms(&page(1)).unwrap().is_empty());
    assert!(engine.tags_of(&page(1)).unwrap().is_empty());

    // Files have no defaults configured.
    assert!(engine
        .init_default_terms(&OwnerRef::new("File", 1))
        .unwrap()
        .is_empty());
}
