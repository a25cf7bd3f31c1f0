//! Integration tests for the read-model repositories.
//!
//! All tests run against an in-memory SQLite database and write rows
//! directly through the repositories (the projection tests cover the
//! event-driven path).

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use genea_core::enums::Gender;
use genea_core::gendate::GenDate;
use genea_core::types::{
    ListOptions, Media, Note, Person, Place, SortOrder,
};
use genea_db::repo::{
    MediaRepo, NoteRepo, PersonRepo, PersonSearch, connect, run_migrations,
};
use genea_db::sea_orm::DatabaseConnection;

async fn setup_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:")
        .await
        .expect("connect to in-memory SQLite");
    run_migrations(&db).await.expect("migrations");
    db
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn person(given: &str, surname: &str) -> Person {
    Person {
        id: Uuid::now_v7(),
        given: Some(given.into()),
        surname: Some(surname.into()),
        gender: Gender::Unknown,
        version: 1,
        created_at: now(),
        updated_at: now(),
        ..Default::default()
    }
}

#[tokio::test]
async fn person_get_returns_none_for_missing_row() {
    let db = setup_db().await;
    assert!(PersonRepo::get(&db, Uuid::now_v7()).await.unwrap().is_none());
}

#[tokio::test]
async fn person_save_is_an_upsert() {
    let db = setup_db().await;
    let mut p = person("John", "Doe");
    PersonRepo::save(&db, &p).await.unwrap();

    p.surname = Some("Dorsey".into());
    p.version = 2;
    PersonRepo::save(&db, &p).await.unwrap();

    let loaded = PersonRepo::get(&db, p.id).await.unwrap().unwrap();
    assert_eq!(loaded.surname.as_deref(), Some("Dorsey"));
    assert_eq!(loaded.version, 2);
    assert_eq!(PersonRepo::count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn person_delete_is_idempotent() {
    let db = setup_db().await;
    let p = person("John", "Doe");
    PersonRepo::save(&db, &p).await.unwrap();
    PersonRepo::delete(&db, p.id).await.unwrap();
    PersonRepo::delete(&db, p.id).await.unwrap();
    assert!(PersonRepo::get(&db, p.id).await.unwrap().is_none());
}

#[tokio::test]
async fn person_list_sorts_and_paginates() {
    let db = setup_db().await;
    for (given, surname) in [("Carl", "Zimmer"), ("Ann", "Abbott"), ("Bea", "Miller")] {
        PersonRepo::save(&db, &person(given, surname)).await.unwrap();
    }

    let page = PersonRepo::list(
        &db,
        &ListOptions {
            limit: Some(2),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].surname.as_deref(), Some("Abbott"));

    let page2 = PersonRepo::list(
        &db,
        &ListOptions {
            limit: Some(2),
            offset: Some(2),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page2.items.len(), 1);
    assert_eq!(page2.items[0].surname.as_deref(), Some("Zimmer"));

    let desc = PersonRepo::list(
        &db,
        &ListOptions {
            sort: Some("surname".into()),
            order: SortOrder::Desc,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(desc.items[0].surname.as_deref(), Some("Zimmer"));

    // Unknown sort fields fall back to the default ordering.
    let fallback = PersonRepo::list(
        &db,
        &ListOptions {
            sort: Some("shoe_size".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(fallback.items[0].surname.as_deref(), Some("Abbott"));
}

#[tokio::test]
async fn person_search_fuzzy_and_exact() {
    let db = setup_db().await;
    let mut p = person("Johannes", "Schneider");
    p.birth_place = Some(Place::named("Heidelberg"));
    p.birth_date = Some(GenDate::parse("1822"));
    PersonRepo::save(&db, &p).await.unwrap();
    PersonRepo::save(&db, &person("Anna", "Snyder")).await.unwrap();

    // Fuzzy substring hits inside tokens.
    let hits = PersonRepo::search(
        &db,
        &PersonSearch {
            query: "schneid".into(),
            fuzzy: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(hits.len(), 1);

    // Exact mode needs a token prefix.
    let hits = PersonRepo::search(
        &db,
        &PersonSearch {
            query: "chneider".into(),
            fuzzy: false,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(hits.is_empty());

    // Birth-date window filters.
    let hits = PersonRepo::search(
        &db,
        &PersonSearch {
            query: "schneider".into(),
            fuzzy: true,
            birth_date_from: chrono::NaiveDate::from_ymd_opt(1900, 1, 1),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn person_search_soundex_matches_phonetic_variants() {
    let db = setup_db().await;
    PersonRepo::save(&db, &person("Robert", "Smith")).await.unwrap();
    PersonRepo::save(&db, &person("Rupert", "Smyth")).await.unwrap();
    PersonRepo::save(&db, &person("Alice", "Jones")).await.unwrap();

    let hits = PersonRepo::search(
        &db,
        &PersonSearch {
            query: "Robert".into(),
            soundex: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    // Robert and Rupert share the Soundex code R163.
    assert_eq!(hits.len(), 2);

    let hits = PersonRepo::search(
        &db,
        &PersonSearch {
            query: "Smith".into(),
            soundex: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn browse_surnames_counts_occurrences() {
    let db = setup_db().await;
    PersonRepo::save(&db, &person("A", "Doe")).await.unwrap();
    PersonRepo::save(&db, &person("B", "Doe")).await.unwrap();
    PersonRepo::save(&db, &person("C", "Ray")).await.unwrap();

    let surnames = PersonRepo::browse_surnames(&db).await.unwrap();
    assert_eq!(surnames, vec![("Doe".to_string(), 2), ("Ray".to_string(), 1)]);
}

#[tokio::test]
async fn media_default_fetch_excludes_blobs() {
    let db = setup_db().await;
    let media = Media {
        id: Uuid::now_v7(),
        xref: None,
        owner_kind: genea_core::enums::MediaOwnerKind::Person,
        owner_id: Uuid::now_v7(),
        title: Some("Portrait".into()),
        description: None,
        mime_type: "image/jpeg".into(),
        media_kind: genea_core::enums::MediaKind::Photo,
        file_name: "portrait.jpg".into(),
        data: vec![0xFF; 2048],
        thumbnail: Some(vec![0xAA; 64]),
        crop: None,
        version: 1,
        created_at: now(),
        updated_at: now(),
    };
    MediaRepo::save(&db, &media).await.unwrap();

    let meta = MediaRepo::get(&db, media.id).await.unwrap().unwrap();
    assert_eq!(meta.size, 2048);
    assert_eq!(meta.file_name, "portrait.jpg");

    let full = MediaRepo::get_with_data(&db, media.id).await.unwrap().unwrap();
    assert_eq!(full.data.len(), 2048);

    let thumb = MediaRepo::get_thumbnail(&db, media.id).await.unwrap();
    assert_eq!(thumb.unwrap().len(), 64);

    // Absent row: None, no error.
    assert!(MediaRepo::get_thumbnail(&db, Uuid::now_v7()).await.unwrap().is_none());
}

#[tokio::test]
async fn note_crud_roundtrip() {
    let db = setup_db().await;
    let note = Note {
        id: Uuid::now_v7(),
        xref: Some("@N1@".into()),
        text: "Emigrated about 1880.".into(),
        version: 1,
        created_at: now(),
        updated_at: now(),
    };
    NoteRepo::save(&db, &note).await.unwrap();
    let loaded = NoteRepo::get(&db, note.id).await.unwrap().unwrap();
    assert_eq!(loaded.text, "Emigrated about 1880.");
    assert_eq!(loaded.xref.as_deref(), Some("@N1@"));

    NoteRepo::delete(&db, note.id).await.unwrap();
    assert!(NoteRepo::get(&db, note.id).await.unwrap().is_none());
}
