//! Engine integration tests: command versioning, query services, rollback,
//! and snapshots, all against in-memory SQLite.

use serde_json::json;
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::enums::{ChildRelationship, Gender};
use genea_core::event::Changes;
use genea_core::types::FamilyChild;
use genea_db::repo::{PersonRepo, connect, run_migrations};
use genea_db::sea_orm::DatabaseConnection;
use genea_db::store::SqlEventStore;
use genea_engine::commands::{
    CreateFamily, CreatePerson, FamilyCommands, PersonCommands, RollbackCommands,
    SnapshotCommands,
};
use genea_engine::query::{
    AhnentafelQuery, HistoryQuery, PedigreeQuery, QualityQuery, RelationshipQuery, RestoreQuery,
    SnapshotQuery,
};

async fn setup() -> (DatabaseConnection, SqlEventStore) {
    let db = connect("sqlite::memory:").await.expect("connect");
    run_migrations(&db).await.expect("migrations");
    (db.clone(), SqlEventStore::new(db))
}

fn changes(pairs: &[(&str, serde_json::Value)]) -> Changes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

async fn create_person(
    store: &SqlEventStore,
    given: &str,
    surname: &str,
    gender: Gender,
) -> Uuid {
    PersonCommands::create(
        store,
        CreatePerson {
            given: Some(given.into()),
            surname: Some(surname.into()),
            gender: Some(gender),
            ..Default::default()
        },
    )
    .await
    .expect("create person")
    .id
}

/// Create a family linking two parents and one child.
async fn link_family(store: &SqlEventStore, father: Uuid, mother: Uuid, child: Uuid) -> Uuid {
    let family = FamilyCommands::create(
        store,
        CreateFamily {
            partner1_id: Some(father),
            partner2_id: Some(mother),
            ..Default::default()
        },
    )
    .await
    .expect("create family");
    FamilyCommands::add_child(
        store,
        FamilyChild {
            id: Uuid::nil(),
            family_id: family.id,
            child_id: child,
            relationship: ChildRelationship::Biological,
            sequence: 0,
        },
        None,
    )
    .await
    .expect("add child");
    family.id
}

#[tokio::test]
async fn concurrent_updates_conflict_deterministically() {
    let (_db, store) = setup().await;
    let id = create_person(&store, "John", "Doe", Gender::Male).await;

    // Two clients both observed version 1.
    let first = PersonCommands::update(
        &store,
        id,
        changes(&[("notes", json!("first writer"))]),
        Some(1),
    )
    .await;
    assert_eq!(first.unwrap(), 2);

    let second = PersonCommands::update(
        &store,
        id,
        changes(&[("notes", json!("second writer"))]),
        Some(1),
    )
    .await;
    assert!(matches!(second, Err(GeneaError::VersionConflict { .. })));
}

#[tokio::test]
async fn update_of_missing_person_is_not_found() {
    let (_db, store) = setup().await;
    let result = PersonCommands::update(&store, Uuid::now_v7(), Changes::new(), None).await;
    assert!(matches!(result, Err(GeneaError::NotFound { .. })));
}

#[tokio::test]
async fn ahnentafel_numbers_father_and_mother() {
    let (db, store) = setup().await;
    let child = create_person(&store, "Jimmy", "Doe", Gender::Male).await;
    let father = create_person(&store, "John", "Doe", Gender::Male).await;
    let mother = create_person(&store, "Jane", "Smith", Gender::Female).await;
    link_family(&store, father, mother, child).await;

    let entries = AhnentafelQuery::ahnentafel(&db, child, Some(2)).await.unwrap();
    let numbers: Vec<(u64, Uuid)> = entries.iter().map(|e| (e.number, e.person.id)).collect();
    assert_eq!(numbers, vec![(1, child), (2, father), (3, mother)]);

    let text = AhnentafelQuery::to_text(&entries);
    assert!(text.starts_with("1. Jimmy Doe\n"));
    assert!(text.contains("2. John Doe"));
    assert!(text.contains("3. Jane Smith"));
}

#[tokio::test]
async fn pedigree_terminates_on_cyclic_data() {
    let (db, store) = setup().await;
    // a is parent of b, and (bad data) b is parent of a.
    let a = create_person(&store, "A", "Loop", Gender::Male).await;
    let b = create_person(&store, "B", "Loop", Gender::Female).await;
    let spouse1 = create_person(&store, "S1", "Loop", Gender::Female).await;
    let spouse2 = create_person(&store, "S2", "Loop", Gender::Male).await;
    link_family(&store, a, spouse1, b).await;
    link_family(&store, b, spouse2, a).await;

    let tree = PedigreeQuery::pedigree(&db, a, Some(10)).await.unwrap().unwrap();
    // The walk visited each person at most once and came back.
    assert_eq!(tree.person.id, a);
}

#[tokio::test]
async fn relationship_labels_cousins() {
    let (db, store) = setup().await;
    // Grandparents → two siblings → two first cousins.
    let grandpa = create_person(&store, "Gramps", "Root", Gender::Male).await;
    let grandma = create_person(&store, "Granny", "Root", Gender::Female).await;
    let son = create_person(&store, "Son", "Root", Gender::Male).await;
    let daughter = create_person(&store, "Daughter", "Root", Gender::Female).await;
    link_family(&store, grandpa, grandma, son).await;
    // Same family, second child.
    let family = genea_db::repo::FamilyRepo::for_partner(&db, grandpa).await.unwrap();
    FamilyCommands::add_child(
        &store,
        FamilyChild {
            id: Uuid::nil(),
            family_id: family[0].id,
            child_id: daughter,
            relationship: ChildRelationship::Biological,
            sequence: 1,
        },
        None,
    )
    .await
    .unwrap();

    let son_wife = create_person(&store, "SW", "X", Gender::Female).await;
    let daughter_husband = create_person(&store, "DH", "Y", Gender::Male).await;
    let cousin1 = create_person(&store, "C1", "Root", Gender::Male).await;
    let cousin2 = create_person(&store, "C2", "Y", Gender::Female).await;
    link_family(&store, son, son_wife, cousin1).await;
    link_family(&store, daughter_husband, daughter, cousin2).await;

    let siblings = RelationshipQuery::relationship(&db, son, daughter).await.unwrap();
    assert_eq!(siblings.label, "sibling");

    let cousins = RelationshipQuery::relationship(&db, cousin1, cousin2).await.unwrap();
    assert!(cousins.related);
    assert_eq!(cousins.label, "first cousin");
    assert_eq!(cousins.distance_a, 2);
    assert_eq!(cousins.distance_b, 2);

    let uncle = RelationshipQuery::relationship(&db, son, cousin2).await.unwrap();
    assert_eq!(uncle.label, "uncle or aunt");

    let spouses = RelationshipQuery::relationship(&db, grandpa, grandma).await.unwrap();
    assert_eq!(spouses.label, "spouse");
}

#[tokio::test]
async fn rollback_restores_prior_field_values_forward() {
    let (db, store) = setup().await;
    let id = create_person(&store, "John", "Doe", Gender::Male).await; // v1

    PersonCommands::update(&store, id, changes(&[("notes", json!("step one"))]), None)
        .await
        .unwrap(); // v2
    PersonCommands::update(&store, id, changes(&[("notes", json!("step two"))]), None)
        .await
        .unwrap(); // v3
    PersonCommands::update(
        &store,
        id,
        changes(&[("notes", json!("step three")), ("given", json!("Jack"))]),
        None,
    )
    .await
    .unwrap(); // v4

    let version = RollbackCommands::rollback(&store, id, 2).await.unwrap();
    assert_eq!(version, 5);

    // State matches version 2; the log kept all five events.
    let person = PersonRepo::get(&db, id).await.unwrap().unwrap();
    assert_eq!(person.notes.as_deref(), Some("step one"));
    assert_eq!(person.given.as_deref(), Some("John"));
    assert_eq!(person.version, 5);

    use genea_db::store::EventStore;
    assert_eq!(store.read_stream(id).await.unwrap().len(), 5);

    let points = RestoreQuery::restore_points(&store, id).await.unwrap();
    assert_eq!(points.len(), 5);
    assert_eq!(points[0].version, 1);
}

#[tokio::test]
async fn rollback_to_future_version_is_rejected() {
    let (_db, store) = setup().await;
    let id = create_person(&store, "John", "Doe", Gender::Male).await;
    let result = RollbackCommands::rollback(&store, id, 7).await;
    assert!(matches!(result, Err(GeneaError::Validation { .. })));
}

#[tokio::test]
async fn history_correlates_old_and_new_values() {
    let (_db, store) = setup().await;
    let id = create_person(&store, "John", "Doe", Gender::Male).await;
    PersonCommands::update(&store, id, changes(&[("notes", json!("first"))]), None)
        .await
        .unwrap();
    PersonCommands::update(&store, id, changes(&[("notes", json!("second"))]), None)
        .await
        .unwrap();

    let entries = HistoryQuery::for_aggregate(&store, id, 10, 0).await.unwrap();
    assert_eq!(entries.len(), 3);
    // Newest first: the last update shows first → second.
    let last = &entries[0];
    assert_eq!(last.version, 3);
    assert_eq!(last.diffs.len(), 1);
    assert_eq!(last.diffs[0].field, "notes");
    assert_eq!(last.diffs[0].old, json!("first"));
    assert_eq!(last.diffs[0].new, json!("second"));
}

#[tokio::test]
async fn snapshot_compare_groups_by_aggregate() {
    let (db, store) = setup().await;
    let before = SnapshotCommands::create(&store, "before".into(), None).await.unwrap();

    let id = create_person(&store, "John", "Doe", Gender::Male).await;
    PersonCommands::update(&store, id, changes(&[("notes", json!("x"))]), None)
        .await
        .unwrap();
    let gone = create_person(&store, "Ghost", "Writer", Gender::Unknown).await;
    PersonCommands::delete(&store, gone, None).await.unwrap();

    let after = SnapshotCommands::create(&store, "after".into(), None).await.unwrap();

    let cmp = SnapshotQuery::compare(&db, &store, before.id, after.id).await.unwrap();
    assert_eq!(cmp.from.name, "before");

    let entry = cmp.changes.iter().find(|c| c.stream_id == id).unwrap();
    assert_eq!(entry.action, genea_core::event::EventAction::Created);
    assert_eq!(entry.event_count, 2);

    let deleted = cmp.changes.iter().find(|c| c.stream_id == gone).unwrap();
    assert_eq!(deleted.action, genea_core::event::EventAction::Deleted);
}

#[tokio::test]
async fn quality_flags_orphans_and_scores_completeness() {
    let (db, store) = setup().await;
    let loner = create_person(&store, "Lone", "Wolf", Gender::Male).await;
    let child = create_person(&store, "Jimmy", "Doe", Gender::Male).await;
    let father = create_person(&store, "John", "Doe", Gender::Male).await;
    let mother = create_person(&store, "Jane", "Doe", Gender::Female).await;
    link_family(&store, father, mother, child).await;

    let lone_report = QualityQuery::for_person(&db, loner).await.unwrap().unwrap();
    assert!(lone_report.orphan);
    assert!(lone_report.missing.iter().any(|m| m == "family connections"));

    let child_report = QualityQuery::for_person(&db, child).await.unwrap().unwrap();
    assert!(!child_report.orphan);
    assert!(child_report.score > lone_report.score);

    let discovery = QualityQuery::discovery(&db, 10).await.unwrap();
    assert_eq!(discovery.first().unwrap().person_id, loner);
}

#[tokio::test]
async fn brick_wall_lifecycle() {
    let (db, store) = setup().await;
    let id = create_person(&store, "John", "Doe", Gender::Male).await;

    PersonCommands::brick_wall_start(&store, id, Some("no birth record".into()), None)
        .await
        .unwrap();
    let person = PersonRepo::get(&db, id).await.unwrap().unwrap();
    assert!(person.brick_wall_active);
    assert!(person.brick_wall_since.is_some());

    PersonCommands::brick_wall_resolve(&store, id, None).await.unwrap();
    let person = PersonRepo::get(&db, id).await.unwrap().unwrap();
    assert!(!person.brick_wall_active);
    assert!(person.brick_wall_resolved_at.is_some());

    // Resolving twice fails: the wall is no longer active.
    let again = PersonCommands::brick_wall_resolve(&store, id, None).await;
    assert!(matches!(again, Err(GeneaError::Validation { .. })));
}
