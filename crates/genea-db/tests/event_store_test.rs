//! Behavioral contract tests for the event store.
//!
//! The same suite runs against the SQL store (in-memory SQLite) and the
//! mutex-guarded in-memory store: both implementations must behave
//! identically.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use genea_core::GeneaError;
use genea_core::event::{Deleted, DomainEvent, EventEnvelope, StreamType, Updated};
use genea_core::types::Person;
use genea_db::repo::{connect, run_migrations};
use genea_db::store::{AppendBatch, EventStore, MemoryEventStore, SqlEventStore};

async fn sql_store() -> SqlEventStore {
    let db = connect("sqlite::memory:")
        .await
        .expect("connect to in-memory SQLite");
    run_migrations(&db).await.expect("migrations");
    SqlEventStore::new(db)
}

fn person_created(id: Uuid) -> EventEnvelope {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let person = Person {
        id,
        given: Some("John".into()),
        surname: Some("Doe".into()),
        created_at: now,
        updated_at: now,
        version: 1,
        ..Default::default()
    };
    EventEnvelope::new(now, DomainEvent::PersonCreated(person))
}

fn person_updated(id: Uuid, note: &str) -> EventEnvelope {
    let now = Utc.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap();
    let mut changes = genea_core::event::Changes::new();
    changes.insert("notes".into(), serde_json::Value::String(note.into()));
    EventEnvelope::new(now, DomainEvent::PersonUpdated(Updated { id, changes }))
}

fn person_deleted(id: Uuid) -> EventEnvelope {
    let now = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
    EventEnvelope::new(now, DomainEvent::PersonDeleted(Deleted { id }))
}

// ── The contract suite ──────────────────────────────────────────────

async fn contract_append_assigns_contiguous_versions(store: &dyn EventStore) {
    let id = Uuid::now_v7();
    let v = store
        .append(id, StreamType::Person, vec![person_created(id)], 0)
        .await
        .unwrap();
    assert_eq!(v, 1);
    assert_eq!(store.stream_version(id).await.unwrap(), 1);

    let v = store
        .append(
            id,
            StreamType::Person,
            vec![person_updated(id, "a"), person_updated(id, "b")],
            1,
        )
        .await
        .unwrap();
    assert_eq!(v, 3);

    let events = store.read_stream(id).await.unwrap();
    assert_eq!(events.len(), 3);
    let versions: Vec<i64> = events.iter().map(|e| e.version).collect();
    assert_eq!(versions, vec![1, 2, 3]);
}

async fn contract_stale_writer_is_rejected(store: &dyn EventStore) {
    let id = Uuid::now_v7();
    store
        .append(id, StreamType::Person, vec![person_created(id)], 0)
        .await
        .unwrap();

    // Two writers both read version 1; one wins, the other conflicts.
    let first = store
        .append(id, StreamType::Person, vec![person_updated(id, "x")], 1)
        .await;
    assert_eq!(first.unwrap(), 2);

    let second = store
        .append(id, StreamType::Person, vec![person_updated(id, "y")], 1)
        .await;
    match second {
        Err(GeneaError::VersionConflict {
            expected, current, ..
        }) => {
            assert_eq!(expected, 1);
            assert_eq!(current, 2);
        }
        other => panic!("expected VersionConflict, got {other:?}"),
    }
    // The conflicting append left no trace.
    assert_eq!(store.read_stream(id).await.unwrap().len(), 2);
}

async fn contract_missing_stream_has_version_zero(store: &dyn EventStore) {
    assert_eq!(store.stream_version(Uuid::now_v7()).await.unwrap(), 0);
    assert!(store.read_stream(Uuid::now_v7()).await.unwrap().is_empty());
}

async fn contract_global_positions_are_monotonic(store: &dyn EventStore) {
    let a = Uuid::now_v7();
    let b = Uuid::now_v7();
    store
        .append(a, StreamType::Person, vec![person_created(a)], 0)
        .await
        .unwrap();
    store
        .append(b, StreamType::Person, vec![person_created(b)], 0)
        .await
        .unwrap();
    store
        .append(a, StreamType::Person, vec![person_updated(a, "n")], 1)
        .await
        .unwrap();

    let all = store.read_all(0, 100).await.unwrap();
    assert!(all.len() >= 3);
    let positions: Vec<i64> = all.iter().map(|e| e.position).collect();
    let mut sorted = positions.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(positions, sorted, "positions ascending and without ties");
    assert_eq!(store.last_position().await.unwrap(), *positions.last().unwrap());

    // Slicing from a midpoint skips earlier events.
    let tail = store.read_all(positions[0], 100).await.unwrap();
    assert_eq!(tail.len(), all.len() - 1);
}

async fn contract_read_by_stream_paginates_newest_first(store: &dyn EventStore) {
    let id = Uuid::now_v7();
    store
        .append(id, StreamType::Person, vec![person_created(id)], 0)
        .await
        .unwrap();
    for i in 1..=4 {
        store
            .append(
                id,
                StreamType::Person,
                vec![person_updated(id, &format!("n{i}"))],
                i,
            )
            .await
            .unwrap();
    }

    let page1 = store.read_by_stream(id, 2, 0).await.unwrap();
    assert_eq!(page1.iter().map(|e| e.version).collect::<Vec<_>>(), vec![5, 4]);
    let page2 = store.read_by_stream(id, 2, 2).await.unwrap();
    assert_eq!(page2.iter().map(|e| e.version).collect::<Vec<_>>(), vec![3, 2]);
}

async fn contract_time_and_type_filters(store: &dyn EventStore) {
    let id = Uuid::now_v7();
    store
        .append(
            id,
            StreamType::Person,
            vec![person_created(id), person_updated(id, "x")],
            0,
        )
        .await
        .unwrap();
    store
        .append(id, StreamType::Person, vec![person_deleted(id)], 2)
        .await
        .unwrap();

    let only_updates = store
        .read_global_by_time(None, None, &["person_updated".to_string()], 10, 0)
        .await
        .unwrap();
    assert_eq!(only_updates.len(), 1);
    assert_eq!(only_updates[0].event.tag(), "person_updated");

    let from = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
    let late = store
        .read_global_by_time(Some(from), None, &[], 10, 0)
        .await
        .unwrap();
    assert_eq!(late.len(), 1);
    assert_eq!(late[0].event.tag(), "person_deleted");
}

async fn contract_append_many_is_atomic(store: &dyn EventStore) {
    let a = Uuid::now_v7();
    let b = Uuid::now_v7();
    // Second batch carries a wrong expected version: nothing must land.
    let result = store
        .append_many(vec![
            AppendBatch {
                stream_id: a,
                stream_type: StreamType::Person,
                expected_version: 0,
                events: vec![person_created(a)],
            },
            AppendBatch {
                stream_id: b,
                stream_type: StreamType::Person,
                expected_version: 7,
                events: vec![person_created(b)],
            },
        ])
        .await;
    assert!(matches!(result, Err(GeneaError::VersionConflict { .. })));
    assert_eq!(store.stream_version(a).await.unwrap(), 0);
    assert_eq!(store.stream_version(b).await.unwrap(), 0);

    store
        .append_many(vec![
            AppendBatch {
                stream_id: a,
                stream_type: StreamType::Person,
                expected_version: 0,
                events: vec![person_created(a)],
            },
            AppendBatch {
                stream_id: b,
                stream_type: StreamType::Person,
                expected_version: 0,
                events: vec![person_created(b)],
            },
        ])
        .await
        .unwrap();
    assert_eq!(store.stream_version(a).await.unwrap(), 1);
    assert_eq!(store.stream_version(b).await.unwrap(), 1);
}

macro_rules! contract_tests {
    ($mod_name:ident, $make_store:expr) => {
        mod $mod_name {
            use super::*;

            #[tokio::test]
            async fn append_assigns_contiguous_versions() {
                let store = $make_store;
                contract_append_assigns_contiguous_versions(&store).await;
            }

            #[tokio::test]
            async fn stale_writer_is_rejected() {
                let store = $make_store;
                contract_stale_writer_is_rejected(&store).await;
            }

            #[tokio::test]
            async fn missing_stream_has_version_zero() {
                let store = $make_store;
                contract_missing_stream_has_version_zero(&store).await;
            }

            #[tokio::test]
            async fn global_positions_are_monotonic() {
                let store = $make_store;
                contract_global_positions_are_monotonic(&store).await;
            }

            #[tokio::test]
            async fn read_by_stream_paginates_newest_first() {
                let store = $make_store;
                contract_read_by_stream_paginates_newest_first(&store).await;
            }

            #[tokio::test]
            async fn time_and_type_filters() {
                let store = $make_store;
                contract_time_and_type_filters(&store).await;
            }

            #[tokio::test]
            async fn append_many_is_atomic() {
                let store = $make_store;
                contract_append_many_is_atomic(&store).await;
            }
        }
    };
}

contract_tests!(sql_backend, sql_store().await);
contract_tests!(memory_backend, MemoryEventStore::new());
