//! Integration tests for the JSON endpoints

mod helpers;

use axum::http::StatusCode;
use helpers::*;

#[tokio::test]
async fn test_health_endpoint_no_auth_required() {
    let app = setup_app().await;

    let response = send(&app, get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "recipebox");
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].is_number());
    assert!(body.get("last_error").is_none());
}

#[tokio::test]
async fn test_api_requires_login() {
    let app = setup_app().await;

    for uri in ["/api/recipes", "/api/recipes/search?recipe_name=soup"] {
        let response = send(&app, get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_api_list_recipes_paginates() {
    let app = setup_app().await;
    let cookie = login(&app).await;

    let body = body_json(send(&app, get("/api/recipes?page=2", Some(&cookie))).await).await;
    assert_eq!(body["total"], 4);
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["total_pages"], 2);
    assert_eq!(body["pagination"]["page_size"], PAGE_SIZE);

    let recipes = body["recipes"].as_array().unwrap();
    let names: Vec<&str> = recipes.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Scrambled Eggs", "Tomato Soup"]);
    assert_eq!(recipes[0]["difficulty"], "Easy");
    assert_eq!(recipes[0]["ingredients"], serde_json::json!(["egg", "milk"]));
    assert!(recipes[0]["category_id"].is_null());
    assert_eq!(recipes[1]["category_name"], "Soup");
    assert_eq!(recipes[1]["url"], "/recipes/3/");
}

#[tokio::test]
async fn test_api_search_applies_filters() {
    let app = setup_app().await;
    let cookie = login(&app).await;

    let uri = format!("/api/recipes/search?category={}&max_cooking_time=30", app.dessert_id);
    let response = send(&app, get(&uri, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["recipes"][0]["name"], "Fruit Salad");
    assert_eq!(body["filter"]["max_cooking_time"], 30);
    assert!(body.get("chart").is_none());
}

#[tokio::test]
async fn test_api_search_with_chart() {
    let app = setup_app().await;
    let cookie = login(&app).await;

    let body = body_json(
        send(&app, get("/api/recipes/search?chart_type=%232", Some(&cookie))).await,
    )
    .await;
    assert_eq!(body["count"], 4);
    assert_eq!(body["chart_type"], "Pie");
    assert!(body["chart"]
        .as_str()
        .unwrap()
        .starts_with("data:image/svg+xml;base64,"));
}

#[tokio::test]
async fn test_api_search_rejects_invalid_parameters() {
    let app = setup_app().await;
    let cookie = login(&app).await;

    let response = send(
        &app,
        get("/api/recipes/search?difficulty=Extreme", Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["message"], "difficulty: Select a valid choice.");
}
