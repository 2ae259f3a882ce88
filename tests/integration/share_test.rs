//! Integration tests for the share lifecycle over HTTP.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_full_share_accept_flow() {
    let app = TestApp::new();
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;

    let recipe_id = app.create_recipe(&alice, "Carbonara").await;
    let share_id = app
        .share_recipe(&alice, recipe_id, "bob", Some("try this"))
        .await;

    // The share shows up in Bob's inbox with the sender resolved.
    let response = app
        .request("GET", "/api/shares/inbox", None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let inbox = response.body["data"].as_array().unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["from_username"], "alice");
    assert_eq!(inbox[0]["message"], "try this");

    let response = app
        .request("GET", "/api/shares/inbox/count", None, Some(&bob))
        .await;
    assert_eq!(response.body["data"]["count"], 1);

    // Accept imports an independent copy into Bob's collection.
    let response = app
        .request(
            "POST",
            &format!("/api/shares/{}/accept", share_id),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let copy = &response.body["data"];
    assert_ne!(copy["id"], response.body["data"]["shared_original_recipe_id"]);
    assert_eq!(copy["shared_from_username"], "alice");
    assert_eq!(copy["title"], "Carbonara");

    // Inbox is empty again.
    let response = app
        .request("GET", "/api/shares/inbox/count", None, Some(&bob))
        .await;
    assert_eq!(response.body["data"]["count"], 0);

    // Accepting again returns the same copy.
    let copy_id = copy["id"].as_str().unwrap().to_string();
    let response = app
        .request(
            "POST",
            &format!("/api/shares/{}/accept", share_id),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], copy_id.as_str());
}

#[tokio::test]
async fn test_decline_flow() {
    let app = TestApp::new();
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;

    let recipe_id = app.create_recipe(&alice, "Stew").await;
    let share_id = app.share_recipe(&alice, recipe_id, "bob", None).await;

    let response = app
        .request(
            "POST",
            &format!("/api/shares/{}/decline", share_id),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Declining twice is a no-op success.
    let response = app
        .request(
            "POST",
            &format!("/api/shares/{}/decline", share_id),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Accepting a declined share conflicts, and no copy was imported.
    let response = app
        .request(
            "POST",
            &format!("/api/shares/{}/accept", share_id),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app.request("GET", "/api/recipes", None, Some(&bob)).await;
    assert_eq!(response.body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_self_share_rejected() {
    let app = TestApp::new();
    let alice = app.signup("alice").await;
    let recipe_id = app.create_recipe(&alice, "Soup").await;

    let response = app
        .request(
            "POST",
            &format!("/api/recipes/{}/share", recipe_id),
            Some(serde_json::json!({"to_username": "alice"})),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_share_unknown_recipient_not_found() {
    let app = TestApp::new();
    let alice = app.signup("alice").await;
    let recipe_id = app.create_recipe(&alice, "Soup").await;

    let response = app
        .request(
            "POST",
            &format!("/api/recipes/{}/share", recipe_id),
            Some(serde_json::json!({"to_username": "charlie"})),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_recipient_can_act_on_share() {
    let app = TestApp::new();
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let carol = app.signup("carol").await;

    let recipe_id = app.create_recipe(&alice, "Pie").await;
    let share_id = app.share_recipe(&alice, recipe_id, "bob", None).await;

    // Carol cannot accept a share addressed to Bob.
    let response = app
        .request(
            "POST",
            &format!("/api/shares/{}/accept", share_id),
            None,
            Some(&carol),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // Carol's inbox is empty.
    let response = app
        .request("GET", "/api/shares/inbox", None, Some(&carol))
        .await;
    assert_eq!(response.body["data"].as_array().unwrap().len(), 0);

    // Bob can still accept.
    let response = app
        .request(
            "POST",
            &format!("/api/shares/{}/accept", share_id),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_accept_unknown_share_not_found() {
    let app = TestApp::new();
    let bob = app.signup("bob").await;

    let response = app
        .request(
            "POST",
            &format!("/api/shares/{}/accept", Uuid::new_v4()),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_accepted_copy_is_editable_independently() {
    let app = TestApp::new();
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;

    let recipe_id = app.create_recipe(&alice, "Bread").await;
    let share_id = app.share_recipe(&alice, recipe_id, "bob", None).await;

    let response = app
        .request(
            "POST",
            &format!("/api/shares/{}/accept", share_id),
            None,
            Some(&bob),
        )
        .await;
    let copy_id = response.body["data"]["id"].as_str().unwrap().to_string();

    // Bob edits his copy.
    let response = app
        .request(
            "PUT",
            &format!("/api/recipes/{}", copy_id),
            Some(serde_json::json!({"title": "Sourdough"})),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Alice's original is untouched.
    let response = app
        .request(
            "GET",
            &format!("/api/recipes/{}", recipe_id),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(response.body["data"]["title"], "Bread");
}
