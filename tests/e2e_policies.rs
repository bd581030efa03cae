use axum::http::{Method, StatusCode};
use serde_json::json;

mod support;

use support::{TestApp, assert_code, id_of};

#[tokio::test]
async fn deny_all_rejects_anonymous_callers_without_touching_storage() {
    let app = TestApp::new(support::vault());

    let responses = [
        app.get("/api/v1/vault", None).await,
        app.post("/api/v1/vault", None, json!({"a": 1})).await,
        app.get("/api/v1/vault/1", None).await,
        app.put("/api/v1/vault/1", None, json!({"a": 1})).await,
        app.patch("/api/v1/vault/1", None, json!({"a": 1})).await,
        app.delete("/api/v1/vault/1", None).await,
    ];
    for response in &responses {
        assert_code(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
    }
    assert_eq!(app.repo.calls(), 0);
}

#[tokio::test]
async fn deny_all_forbids_identified_callers() {
    let app = TestApp::new(support::vault());
    let token = app.sessions.login(5, "member").await;

    let listed = app.get("/api/v1/vault", Some(&token)).await;
    assert_code(&listed, StatusCode::FORBIDDEN, "FORBIDDEN");
    let created = app.post("/api/v1/vault", Some(&token), json!({"a": 1})).await;
    assert_code(&created, StatusCode::FORBIDDEN, "FORBIDDEN");
    assert_eq!(app.repo.calls(), 0);

    let admin = app.sessions.login(6, "admin").await;
    let listed = app.get("/api/v1/vault", Some(&admin)).await;
    assert_code(&listed, StatusCode::FORBIDDEN, "FORBIDDEN");
}

#[tokio::test]
async fn owner_policy_needs_a_session_for_every_verb() {
    let app = TestApp::new(support::notes());

    for method in [Method::GET, Method::PUT, Method::PATCH, Method::DELETE] {
        let body = matches!(method, Method::PUT | Method::PATCH).then(|| json!({"title": "x"}));
        let response = app.request(method, "/api/v1/notes/1", None, body).await;
        assert_code(&response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
    }
    let listed = app.get("/api/v1/notes", None).await;
    assert_code(&listed, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
    let created = app.post("/api/v1/notes", None, json!({"title": "x"})).await;
    assert_code(&created, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");

    assert_eq!(app.repo.calls(), 0);
}

#[tokio::test]
async fn owner_policy_stamps_and_guards_records() {
    let app = TestApp::new(support::notes());
    let ana = app.sessions.login(2, "member").await;
    let bo = app.sessions.login(3, "member").await;
    let admin = app.sessions.login(1, "admin").await;

    let created = app
        .post(
            "/api/v1/notes",
            Some(&ana),
            json!({"title": "mine", "secretNote": "s", "userId": 99}),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["userId"], json!(2));
    assert_eq!(created.body["secretNote"], json!("s"));
    let id = id_of(&created.body);
    let uri = format!("/api/v1/notes/{id}");

    assert_code(&app.get(&uri, Some(&bo)).await, StatusCode::FORBIDDEN, "FORBIDDEN");
    assert_code(
        &app.patch(&uri, Some(&bo), json!({"title": "stolen"})).await,
        StatusCode::FORBIDDEN,
        "FORBIDDEN",
    );
    assert_code(&app.delete(&uri, Some(&bo)).await, StatusCode::FORBIDDEN, "FORBIDDEN");

    let as_admin = app.get(&uri, Some(&admin)).await;
    assert_eq!(as_admin.status, StatusCode::OK);
    assert_eq!(as_admin.body["secretNote"], json!("s"));

    let patched = app
        .patch(&uri, Some(&ana), json!({"title": "still mine", "userId": 3}))
        .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.body["title"], json!("still mine"));
    assert_eq!(patched.body["userId"], json!(2));

    let deleted = app.delete(&uri, Some(&ana)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn owner_list_is_scoped_to_the_caller_unless_admin() {
    let app = TestApp::new(support::notes());
    let ana = app.sessions.login(2, "member").await;
    let bo = app.sessions.login(3, "member").await;
    let admin = app.sessions.login(1, "admin").await;

    app.post("/api/v1/notes", Some(&ana), json!({"title": "a1"})).await;
    app.post("/api/v1/notes", Some(&ana), json!({"title": "a2"})).await;
    app.post("/api/v1/notes", Some(&bo), json!({"title": "b1"})).await;

    let mine = app.get("/api/v1/notes", Some(&ana)).await;
    assert_eq!(mine.status, StatusCode::OK);
    let items = mine.body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["userId"] == json!(2)));

    let everything = app.get("/api/v1/notes", Some(&admin)).await;
    assert_eq!(everything.body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn private_fields_are_shown_to_owners_and_admins_only() {
    let app = TestApp::new(support::definitions(json!([{
        "name": "profiles",
        "policy": "public",
        "private": ["email"]
    }])));
    let admin = app.sessions.login(1, "admin").await;

    let created = app
        .post("/api/v1/profiles", None, json!({"nick": "n", "email": "a@b.c"}))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert!(created.body.get("email").is_none());
    let id = id_of(&created.body);

    let anonymous = app.get(&format!("/api/v1/profiles/{id}"), None).await;
    assert!(anonymous.body.get("email").is_none());
    let as_admin = app.get(&format!("/api/v1/profiles/{id}"), Some(&admin)).await;
    assert_eq!(as_admin.body["email"], json!("a@b.c"));
}

#[tokio::test]
async fn validation_runs_after_authorization() {
    let app = TestApp::new(support::notes());
    let ana = app.sessions.login(2, "member").await;

    let missing = app
        .post("/api/v1/notes", Some(&ana), json!({"secretNote": "s"}))
        .await;
    assert_code(&missing, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(app.repo.calls(), 0);
}

#[tokio::test]
async fn session_dependent_policy_without_session_manager_is_500() {
    let app = TestApp::without_sessions(support::notes());

    let listed = app.get("/api/v1/notes", None).await;
    assert_code(&listed, StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR");
    let created = app.post("/api/v1/notes", None, json!({"title": "x"})).await;
    assert_code(&created, StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR");
    assert_eq!(app.repo.calls(), 0);

    let session = app.get("/api/v1/session", None).await;
    assert_eq!(session.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn public_policy_works_without_session_manager() {
    let app = TestApp::without_sessions(support::tasks());
    let created = app.post("/api/v1/tasks", None, json!({"a": 1})).await;
    assert_eq!(created.status, StatusCode::CREATED);
}

#[tokio::test]
async fn members_cannot_reassign_owned_records() {
    let app = TestApp::new(support::notes());
    let ana = app.sessions.login(2, "member").await;
    let bo = app.sessions.login(3, "member").await;
    let admin = app.sessions.login(1, "admin").await;

    let id = id_of(
        &app.post("/api/v1/notes", Some(&ana), json!({"title": "mine"}))
            .await
            .body,
    );
    let uri = format!("/api/v1/notes/{id}");

    let replaced = app
        .put(&uri, Some(&ana), json!({"title": "given away", "userId": 3}))
        .await;
    assert_eq!(replaced.status, StatusCode::OK);
    assert_eq!(replaced.body["userId"], json!(2));
    assert_code(&app.get(&uri, Some(&bo)).await, StatusCode::FORBIDDEN, "FORBIDDEN");

    let reassigned = app.patch(&uri, Some(&admin), json!({"userId": 3})).await;
    assert_eq!(reassigned.status, StatusCode::OK);
    assert_eq!(reassigned.body["userId"], json!(3));
    assert_eq!(app.get(&uri, Some(&bo)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn put_by_a_member_keeps_protected_fields() {
    let app = TestApp::new(Vec::new());
    let id = app.seed_user("ana", "pw", "editor").await;
    let token = app.sessions.login(id.get(), "member").await;
    let uri = format!("/api/v1/users/{id}");

    let replaced = app
        .put(&uri, Some(&token), json!({"username": "ana", "password": "pw2"}))
        .await;
    assert_eq!(replaced.status, StatusCode::OK);
    assert_eq!(replaced.body["role"], json!("editor"));

    let stored = app.stored("users", id.get()).await.unwrap();
    assert_eq!(stored.get_str("role"), Some("editor"));
    assert_eq!(stored.get_str("password"), Some("hashed:pw2"));

    let escalated = app
        .put(
            &uri,
            Some(&token),
            json!({"username": "ana", "password": "pw2", "role": "admin"}),
        )
        .await;
    assert_eq!(escalated.body["role"], json!("editor"));

    let admin = app.sessions.login(100, "admin").await;
    let demoted = app
        .put(
            &uri,
            Some(&admin),
            json!({"username": "ana", "password": "pw3", "role": "viewer"}),
        )
        .await;
    assert_eq!(demoted.status, StatusCode::OK);
    assert_eq!(demoted.body["role"], json!("viewer"));
}

#[tokio::test]
async fn reserved_resource_names_are_rejected() {
    let definitions = support::definitions(json!([{ "name": "session", "policy": "public" }]));
    assert!(definitions[0].config().is_err());
}
