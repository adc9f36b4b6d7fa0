//! Shared router test fixtures
//!
//! Seeds an in-memory database with one user, two categories and four
//! recipes covering every difficulty level:
//!
//! | recipe         | minutes | ingredients | difficulty   | category |
//! |----------------|---------|-------------|--------------|----------|
//! | Chocolate Cake | 60      | 5           | Hard         | Dessert  |
//! | Fruit Salad    | 8       | 4           | Medium       | Dessert  |
//! | Scrambled Eggs | 5       | 2           | Easy         | -        |
//! | Tomato Soup    | 30      | 3           | Intermediate | Soup     |

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use recipebox_common::db::{categories, init_memory_database, recipes, users};
use recipebox_common::model::{NewCategory, NewRecipe};
use recipebox_web::{build_router, AppState};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::util::ServiceExt;

pub const USERNAME: &str = "chef";
pub const PASSWORD: &str = "correct-horse-battery";

/// Overview page size used by the fixture app
pub const PAGE_SIZE: i64 = 2;

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
    pub dessert_id: i64,
    pub soup_id: i64,
}

async fn add_recipe(
    db: &SqlitePool,
    name: &str,
    ingredients: &str,
    cooking_time: u32,
    category_id: Option<i64>,
) {
    recipes::insert_recipe(
        db,
        &NewRecipe {
            name: name.to_string(),
            description: format!("How to make {}", name),
            ingredients: ingredients.to_string(),
            cooking_time,
            category_id,
        },
    )
    .await
    .expect("Should insert recipe");
}

pub async fn setup_app() -> TestApp {
    let db = init_memory_database()
        .await
        .expect("Should create in-memory database");

    users::create_user(&db, USERNAME, PASSWORD)
        .await
        .expect("Should create user");

    let dessert = categories::insert_category(
        &db,
        &NewCategory {
            name: "Dessert".to_string(),
            description: "Sweet things".to_string(),
        },
    )
    .await
    .expect("Should insert category");
    let soup = categories::insert_category(
        &db,
        &NewCategory {
            name: "Soup".to_string(),
            description: String::new(),
        },
    )
    .await
    .expect("Should insert category");

    add_recipe(&db, "Scrambled Eggs", "egg, milk", 5, None).await;
    add_recipe(&db, "Fruit Salad", "apple, banana, grape, orange", 8, Some(dessert.id)).await;
    add_recipe(&db, "Tomato Soup", "tomato, onion, garlic", 30, Some(soup.id)).await;
    add_recipe(
        &db,
        "Chocolate Cake",
        "flour, sugar, cocoa, egg, butter",
        60,
        Some(dessert.id),
    )
    .await;

    let state = AppState::new(db.clone(), 24, PAGE_SIZE);
    TestApp {
        router: build_router(state),
        db,
        dessert_id: dessert.id,
        soup_id: soup.id,
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Should have Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// `name=value` part of the response's Set-Cookie header
pub fn set_cookie_pair(response: &Response<Body>) -> String {
    let value = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Should set a cookie")
        .to_str()
        .unwrap();
    value.split(';').next().unwrap().to_string()
}

/// Log in as the fixture user and return the cookie to send back
pub async fn login(app: &TestApp) -> String {
    let body = format!("username={}&password={}&next=%2Frecipes%2F", USERNAME, PASSWORD);
    let response = send(app, post_form("/login/", &body, None)).await;
    assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
    set_cookie_pair(&response)
}
