//! Integration tests for recipe CRUD.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_recipe_crud_roundtrip() {
    let app = TestApp::new();
    let token = app.signup("alice").await;

    let recipe_id = app.create_recipe(&token, "Pancakes").await;

    let response = app
        .request(
            "GET",
            &format!("/api/recipes/{}", recipe_id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["title"], "Pancakes");
    assert_eq!(response.body["data"]["ingredients"][0]["item"], "eggs");

    let response = app
        .request(
            "PUT",
            &format!("/api/recipes/{}", recipe_id),
            Some(serde_json::json!({
                "title": "Fluffy Pancakes",
                "servings": 4,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["title"], "Fluffy Pancakes");
    assert_eq!(response.body["data"]["servings"], 4);

    let response = app
        .request(
            "DELETE",
            &format!("/api/recipes/{}", recipe_id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/recipes/{}", recipe_id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recipes_are_scoped_per_owner() {
    let app = TestApp::new();
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;

    let recipe_id = app.create_recipe(&alice, "Secret Sauce").await;

    // Bob cannot see, edit, or delete Alice's recipe.
    let response = app
        .request(
            "GET",
            &format!("/api/recipes/{}", recipe_id),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "DELETE",
            &format!("/api/recipes/{}", recipe_id),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", "/api/recipes", None, Some(&bob)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_favorite_toggle_roundtrip() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let recipe_id = app.create_recipe(&token, "Pancakes").await;

    let response = app
        .request(
            "GET",
            &format!("/api/recipes/{}", recipe_id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.body["data"]["favorite"], false);

    let response = app
        .request(
            "PUT",
            &format!("/api/recipes/{}/favorite", recipe_id),
            Some(serde_json::json!({"favorite": true})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["favorite"], true);

    // The flag sticks on subsequent reads and can be cleared again.
    let response = app
        .request(
            "GET",
            &format!("/api/recipes/{}", recipe_id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.body["data"]["favorite"], true);

    let response = app
        .request(
            "PUT",
            &format!("/api/recipes/{}/favorite", recipe_id),
            Some(serde_json::json!({"favorite": false})),
            Some(&token),
        )
        .await;
    assert_eq!(response.body["data"]["favorite"], false);
}

#[tokio::test]
async fn test_empty_title_rejected() {
    let app = TestApp::new();
    let token = app.signup("alice").await;

    let response = app
        .request(
            "POST",
            "/api/recipes",
            Some(serde_json::json!({"title": ""})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
