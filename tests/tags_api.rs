//! Tag listing, creation, ownership scoping and the assigned_only filter
//! Run: cargo test --test tags_api

mod common;

use common::{create_recipe, create_tag, register_and_token, request, spawn_app};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn create_and_list_ordered_by_name_desc() {
    let t = spawn_app().await;
    let token = register_and_token(&t.app, "tags@example.com").await;

    create_tag(&t.app, &token, "Vegan").await;
    create_tag(&t.app, &token, "Dessert").await;

    let (status, body) = request(&t.app, "GET", "/recipe/tags", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|tag| tag["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Vegan", "Dessert"]);
}

#[tokio::test]
async fn create_rejects_blank_name() {
    let t = spawn_app().await;
    let token = register_and_token(&t.app, "blank@example.com").await;

    for bad in ["", "   "] {
        let (status, body) = request(
            &t.app,
            "POST",
            "/recipe/tags",
            Some(&token),
            Some(json!({"name": bad})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["name"].is_array());
    }
}

#[tokio::test]
async fn tags_are_scoped_to_owner() {
    let t = spawn_app().await;
    let token_a = register_and_token(&t.app, "owner-a@example.com").await;
    let token_b = register_and_token(&t.app, "owner-b@example.com").await;

    create_tag(&t.app, &token_a, "Breakfast").await;

    let (_, body) = request(&t.app, "GET", "/recipe/tags", Some(&token_b), None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (_, body) = request(&t.app, "GET", "/recipe/tags", Some(&token_a), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn assigned_only_returns_linked_tags_once() {
    let t = spawn_app().await;
    let token = register_and_token(&t.app, "assigned@example.com").await;

    let linked = create_tag(&t.app, &token, "Linked").await;
    create_tag(&t.app, &token, "Unlinked").await;

    // Two recipes both carry the same tag
    create_recipe(
        &t.app,
        &token,
        json!({"title": "Pancakes", "time_minutes": 15, "price": "3.50", "tags": [linked]}),
    )
    .await;
    create_recipe(
        &t.app,
        &token,
        json!({"title": "Waffles", "time_minutes": 20, "price": "4.00", "tags": [linked]}),
    )
    .await;

    let (status, body) =
        request(&t.app, "GET", "/recipe/tags?assigned_only=1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let tags = body.as_array().unwrap();
    assert_eq!(tags.len(), 1, "linked tag must appear exactly once");
    assert_eq!(tags[0]["name"], "Linked");
}

#[tokio::test]
async fn assigned_only_false_returns_everything() {
    let t = spawn_app().await;
    let token = register_and_token(&t.app, "all@example.com").await;

    create_tag(&t.app, &token, "One").await;
    create_tag(&t.app, &token, "Two").await;

    let (_, body) = request(&t.app, "GET", "/recipe/tags?assigned_only=0", Some(&token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn assigned_only_rejects_garbage_value() {
    let t = spawn_app().await;
    let token = register_and_token(&t.app, "garbage@example.com").await;

    let (status, _) = request(
        &t.app,
        "GET",
        "/recipe/tags?assigned_only=maybe",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_requires_authentication() {
    let t = spawn_app().await;

    let (status, _) = request(&t.app, "GET", "/recipe/tags", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
