//! Integration tests for the REST surface, driving the router directly
//! with `tower::ServiceExt::oneshot` against in-memory SQLite.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use genea_api::{AppState, build_router};
use genea_db::repo::{connect, run_migrations};

async fn app() -> Router {
    let db = connect("sqlite::memory:").await.expect("connect");
    run_migrations(&db).await.expect("migrations");
    build_router(AppState::new(db))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn person_crud_lifecycle() {
    let app = app().await;

    // Create.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/persons",
            serde_json::json!({
                "given": "John",
                "surname": "Doe",
                "gender": "male",
                "birth_date": "15 JAN 1850",
                "birth_place": {"name": "Springfield, IL"}
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let person = body_json(response).await;
    let id = person["id"].as_str().unwrap().to_string();
    assert_eq!(person["version"], 1);

    // Read back.
    let response = app
        .clone()
        .oneshot(get_request(&format!("/persons/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["given"], "John");
    assert_eq!(fetched["birth_date"]["raw"], "15 JAN 1850");

    // Update.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/persons/{id}"),
            serde_json::json!({"notes": "researched"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["version"], 2);

    // Delete.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/persons/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone.
    let response = app
        .clone()
        .oneshot(get_request(&format!("/persons/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = body_json(response).await;
    assert_eq!(error["error"]["code"], "not_found");
}

#[tokio::test]
async fn stale_update_returns_conflict() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/persons",
            serde_json::json!({"given": "John", "surname": "Doe"}),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    // First writer at version 1 succeeds.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/persons/{id}"),
            serde_json::json!({"notes": "a", "expected_version": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Second writer still at version 1 conflicts.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/persons/{id}"),
            serde_json::json!({"notes": "b", "expected_version": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error = body_json(response).await;
    assert_eq!(error["error"]["code"], "version_conflict");
    assert_eq!(error["error"]["details"]["current"], 2);
}

#[tokio::test]
async fn validation_error_maps_to_bad_request() {
    let app = app().await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/sources",
            serde_json::json!({"title": "  "}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"]["code"], "validation_error");
    assert_eq!(error["error"]["details"]["field"], "title");
}

#[tokio::test]
async fn gedcom_import_then_export_round_trips() {
    let app = app().await;

    let gedcom = "\
0 HEAD
1 GEDC
2 VERS 5.5
1 CHAR UTF-8
0 @I1@ INDI
1 NAME John /Doe/
1 SEX M
1 BIRT
2 DATE 15 JAN 1850
2 PLAC Springfield, IL
0 TRLR
";
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/gedcom/import")
                .body(Body::from(gedcom))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let summary = body_json(response).await;
    assert_eq!(summary["persons"], 1);

    // The person landed in the read model through the projection.
    let response = app
        .clone()
        .oneshot(get_request("/search?q=doe&fuzzy=true"))
        .await
        .unwrap();
    let hits = body_json(response).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);

    // Export reproduces the lines.
    let response = app
        .clone()
        .oneshot(get_request("/gedcom/export"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let exported = body_text(response).await;
    assert!(exported.contains("1 NAME John /Doe/\n"));
    assert!(exported.contains("1 SEX M\n"));
    assert!(exported.contains("2 DATE 15 JAN 1850\n"));
    assert!(exported.contains("0 @I1@ INDI\n"));
}

#[tokio::test]
async fn unreadable_gedcom_is_unprocessable() {
    let app = app().await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/gedcom/import")
                .body(Body::from(vec![0x01u8, 0x02]))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error = body_json(response).await;
    assert_eq!(error["error"]["code"], "gedcom_unreadable");
}

#[tokio::test]
async fn ahnentafel_text_format() {
    let app = app().await;

    // child + father + mother linked through a family.
    let child = body_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/persons",
                serde_json::json!({"given": "Jimmy", "surname": "Doe"}),
            ))
            .await
            .unwrap(),
    )
    .await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let father = body_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/persons",
                serde_json::json!({"given": "John", "surname": "Doe", "gender": "male"}),
            ))
            .await
            .unwrap(),
    )
    .await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let mother = body_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/persons",
                serde_json::json!({"given": "Jane", "surname": "Smith", "gender": "female"}),
            ))
            .await
            .unwrap(),
    )
    .await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let family = body_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/families",
                serde_json::json!({"partner1_id": father, "partner2_id": mother}),
            ))
            .await
            .unwrap(),
    )
    .await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/families/{family}/children"),
            serde_json::json!({"child_id": child}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/ahnentafel/{child}?generations=2&format=json"
        )))
        .await
        .unwrap();
    let entries = body_json(response).await;
    let numbers: Vec<u64> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["number"].as_u64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/ahnentafel/{child}?generations=2&format=text"
        )))
        .await
        .unwrap();
    let text = body_text(response).await;
    assert!(text.starts_with("1. Jimmy Doe"));
    assert!(text.contains("2. John Doe"));
    assert!(text.contains("3. Jane Smith"));
}

#[tokio::test]
async fn export_estimate_counts_rows() {
    let app = app().await;
    app.clone()
        .oneshot(json_request(
            "POST",
            "/persons",
            serde_json::json!({"given": "One", "surname": "Person"}),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get_request("/export/estimate")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let estimate = body_json(response).await;
    assert_eq!(estimate["persons"], 1);
    assert_eq!(estimate["families"], 0);
}

#[tokio::test]
async fn csv_export_quotes_fields() {
    let app = app().await;
    app.clone()
        .oneshot(json_request(
            "POST",
            "/persons",
            serde_json::json!({
                "given": "John",
                "surname": "Doe",
                "birth_place": {"name": "Springfield, IL"}
            }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(get_request("/export/persons?format=csv"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let csv = body_text(response).await;
    assert!(csv.starts_with("id,given,surname"));
    // The comma in the place name forced quoting.
    assert!(csv.contains("\"Springfield, IL\""));
}
