mod common;

use common::{app, call, request};
use serde_json::json;

#[tokio::test]
async fn acceptance_create_get_update_delete_list() {
    let app = app().await;

    // create
    let (status, created) = call(&app, "POST", "/lists", Some(json!({ "title": "Groceries" }))).await;
    assert_eq!(status, 200);
    let id = created["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(created["title"], "Groceries");
    assert!(created["description"].is_null());
    assert_eq!(created["created_at"], created["updated_at"]);

    // get returns the same entity
    let (status, got) = call(&app, "GET", &format!("/lists/{id}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(got, created);

    // partial update
    let (status, updated) = call(&app, "PUT", &format!("/lists/{id}"), Some(json!({ "title": "X" }))).await;
    assert_eq!(status, 200);
    assert_eq!(updated["title"], "X");
    assert_eq!(updated["description"], created["description"]);
    assert_eq!(updated["created_at"], created["created_at"]);

    // all-null update keeps fields
    let (status, again) = call(&app, "PUT", &format!("/lists/{id}"), Some(json!({ "title": null, "description": null }))).await;
    assert_eq!(status, 200);
    assert_eq!(again["title"], "X");
    assert!(again["description"].is_null());

    // delete
    let (status, body) = call(&app, "DELETE", &format!("/lists/{id}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({}));

    // get 404
    let (status, body) = call(&app, "GET", &format!("/lists/{id}"), None).await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "detail": "Todo list not found" }));
}

#[tokio::test]
async fn acceptance_title_bounds_are_validated() {
    let app = app().await;

    let (status, body) = call(&app, "POST", "/lists", Some(json!({ "title": "" }))).await;
    assert_eq!(status, 422);
    assert!(body["errors"]["title"].is_array());

    let (status, _) = call(&app, "POST", "/lists", Some(json!({ "title": "a".repeat(101) }))).await;
    assert_eq!(status, 422);

    let (status, _) = call(&app, "POST", "/lists", Some(json!({ "title": "ok", "description": "" }))).await;
    assert_eq!(status, 422);

    let (status, _) = call(&app, "POST", "/lists", Some(json!({ "description": "no title" }))).await;
    assert_eq!(status, 422);

    let (status, _) = call(&app, "POST", "/lists", Some(json!({ "title": 5 }))).await;
    assert_eq!(status, 422);

    // nothing was inserted
    let (status, body) = call(&app, "GET", "/lists", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn acceptance_missing_list_is_404() {
    let app = app().await;
    let (status, _) = call(&app, "PUT", "/lists/99", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, 404);
    let (status, _) = call(&app, "DELETE", "/lists/99", None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn acceptance_non_numeric_id_is_422() {
    let app = app().await;
    let (status, _) = call(&app, "GET", "/lists/abc", None).await;
    assert_eq!(status, 422);
}

#[tokio::test]
async fn acceptance_list_pagination() {
    let app = app().await;

    let (status, body) = call(&app, "GET", "/lists?page=1&per_page=10", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));

    for n in 1..=12 {
        let (status, _) = call(&app, "POST", "/lists", Some(json!({ "title": format!("list {n}") }))).await;
        assert_eq!(status, 200);
    }

    let (_, body) = call(&app, "GET", "/lists?page=2&per_page=5", None).await;
    let titles: Vec<_> = body.as_array().unwrap().iter().map(|l| l["title"].as_str().unwrap().to_string()).collect();
    assert_eq!(titles, ["list 6", "list 7", "list 8", "list 9", "list 10"]);

    // defaults to the first ten
    let (_, body) = call(&app, "GET", "/lists", None).await;
    assert_eq!(body.as_array().unwrap().len(), 10);

    let (_, body) = call(&app, "GET", "/lists?page=3&per_page=5", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, _) = call(&app, "GET", "/lists?page=0", None).await;
    assert_eq!(status, 422);
    let (status, _) = call(&app, "GET", "/lists?per_page=lots", None).await;
    assert_eq!(status, 422);
}

#[tokio::test]
async fn acceptance_system_endpoints() {
    let app = app().await;

    let (status, body) = call(&app, "GET", "/echo?message=Hello&name=World", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "Message": "Hello World!" }));

    let (status, _) = call(&app, "GET", "/echo?message=Hello", None).await;
    assert_eq!(status, 422);

    let res = request(&app, "GET", "/health", None).await;
    assert!(res.headers().contains_key("x-request-id"));
    let (status, body) = call(&app, "GET", "/health", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "status": "ok" }));
}
