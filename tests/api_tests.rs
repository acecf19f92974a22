//! HTTP 层集成测试（内存 SQLite）

use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test, web};
use serde_json::{Value, json};
use std::sync::Arc;

use rust_school_api::cache::{MokaCacheWrapper, ObjectCache};
use rust_school_api::middlewares::{AccessPolicy, RequireJWT};
use rust_school_api::routes::configure_routes;
use rust_school_api::storage::Storage;
use rust_school_api::storage::sea_orm_storage::SeaOrmStorage;

async fn memory_storage() -> Arc<dyn Storage> {
    Arc::new(
        SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory sqlite should connect"),
    )
}

fn memory_cache() -> Arc<dyn ObjectCache> {
    Arc::new(MokaCacheWrapper::new(100, 60))
}

macro_rules! init_app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new(memory_cache()))
                .configure(configure_routes),
        )
        .await
    };
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        let json: Value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("response body should be JSON")
        };
        (status, json)
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

fn register_body(email: &str) -> Value {
    json!({
        "username": "alice",
        "email": email,
        "password": "correct-horse",
    })
}

#[actix_web::test]
async fn test_index_lists_endpoints() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = send!(app, test::TestRequest::get().uri("/"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert!(body["data"]["endpoints"].as_array().unwrap().len() >= 9);
}

#[actix_web::test]
async fn test_register_returns_tokens_and_rejects_duplicate_email() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/users/")
            .set_json(register_body("alice@example.com"))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert!(body["data"]["access_token"].is_string());
    assert!(body["data"]["refresh_token"].is_string());
    assert!(body["data"].get("password_hash").is_none());

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/users")
            .set_json(register_body("alice@example.com"))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["email"][0], "User already exists.");

    let (status, body) = send!(app, test::TestRequest::get().uri("/users/"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_register_validates_fields() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/users/").set_json(json!({
            "username": " ",
            "email": "not-an-email",
            "password": "",
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["username"].is_array());
    assert!(body["data"]["email"].is_array());
    assert!(body["data"]["password"].is_array());

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/users/")
            .set_json(json!({ "username": "bob" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["email"][0], "This field is required.");
}

#[actix_web::test]
async fn test_get_user_by_id() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (_, created) = send!(
        app,
        test::TestRequest::post()
            .uri("/users/")
            .set_json(register_body("carol@example.com"))
    );
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = send!(app, test::TestRequest::get().uri(&format!("/users/{id}/")));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);

    let (status, _) = send!(app, test::TestRequest::get().uri("/users/9999/"));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send!(app, test::TestRequest::get().uri("/users/abc/"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_obtain_and_refresh_token() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    send!(
        app,
        test::TestRequest::post()
            .uri("/users/")
            .set_json(register_body("dave@example.com"))
    );

    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/api/token/").set_json(json!({
            "email": "dave@example.com",
            "password": "wrong",
        }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("data").is_none());

    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/api/token/").set_json(json!({
            "email": "dave@example.com",
            "password": "correct-horse",
        }))
    );
    assert_eq!(status, StatusCode::OK);
    let access = body["data"]["access"].as_str().unwrap().to_string();
    let refresh = body["data"]["refresh"].as_str().unwrap().to_string();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/token/refresh/")
            .set_json(json!({ "refresh": refresh }))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["access"].is_string());

    // access token 不能用于刷新
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/token/refresh/")
            .set_json(json!({ "refresh": access }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_inactive_user_cannot_login() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    send!(
        app,
        test::TestRequest::post().uri("/users/").set_json(json!({
            "username": "erin",
            "email": "erin@example.com",
            "password": "pw",
            "is_active": false,
        }))
    );

    let (status, _) = send!(
        app,
        test::TestRequest::post().uri("/api/token/").set_json(json!({
            "email": "erin@example.com",
            "password": "pw",
        }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_subjects_require_token() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = send!(app, test::TestRequest::get().uri("/subjects/"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2000);

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/subjects/")
            .insert_header(bearer("garbage"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_subject_crud_with_token() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (_, user) = send!(
        app,
        test::TestRequest::post()
            .uri("/users/")
            .set_json(register_body("frank@example.com"))
    );
    let token = user["data"]["access_token"].as_str().unwrap().to_string();

    let (status, first) = send!(
        app,
        test::TestRequest::post()
            .uri("/subjects/")
            .insert_header(bearer(&token))
            .set_json(json!({ "name": "Math" }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, second) = send!(
        app,
        test::TestRequest::post()
            .uri("/subjects")
            .insert_header(bearer(&token))
            .set_json(json!({ "name": "Math" }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["data"]["id"], second["data"]["id"]);

    let id = first["data"]["id"].as_i64().unwrap();

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/subjects/{id}/"))
            .insert_header(bearer(&token))
            .set_json(json!({ "name": "Mathematics" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Mathematics");

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/subjects/{id}/"))
            .insert_header(bearer(&token))
            .set_json(json!({}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["name"][0], "This field is required.");

    let (status, body) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/subjects/{id}/"))
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/subjects/{id}"))
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4000);
}

#[actix_web::test]
async fn test_student_lifecycle() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/students/")
            .set_json(json!({ "name": "X", "roll": 5 }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["roll"], 5);
    assert_eq!(body["data"]["teachers"], json!([]));
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/students/{id}/"))
            .set_json(json!({ "subjects": [{ "name": "Math" }] }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["subjects"][0]["name"], "Math");
    assert_eq!(body["data"]["roll"], 5);

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/students/{id}"))
            .set_json(json!({ "subjects": [{ "name": "Science" }] }))
    );
    assert_eq!(status, StatusCode::OK);
    let subjects = body["data"]["subjects"].as_array().unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0]["name"], "Science");

    let (status, body) = send!(app, test::TestRequest::get().uri("/students"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send!(
        app,
        test::TestRequest::delete().uri(&format!("/students/{id}/"))
    );
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send!(app, test::TestRequest::get().uri(&format!("/students/{id}/")));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 5000);
}

#[actix_web::test]
async fn test_teacher_lifecycle() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/teachers/")
            .set_json(json!({ "name": "T", "subjects": [{ "name": "Math" }] }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["subjects"][0]["name"], "Math");
    assert_eq!(body["data"]["students"], json!([]));
    let id = body["data"]["id"].as_i64().unwrap();

    send!(
        app,
        test::TestRequest::post().uri("/students/").set_json(json!({
            "name": "S",
            "subjects": [{ "name": "Science" }],
        }))
    );

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/teachers/{id}/"))
            .set_json(json!({ "name": "T2", "subjects": [{ "name": "Science" }] }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "T2");
    let subjects = body["data"]["subjects"].as_array().unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0]["name"], "Science");
    assert_eq!(body["data"]["students"][0]["name"], "S");

    // 未提供科目时保留原有关联
    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/teachers/{id}"))
            .set_json(json!({ "name": "T3" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "T3");
    assert_eq!(body["data"]["subjects"][0]["name"], "Science");

    let (status, body) = send!(app, test::TestRequest::get().uri("/teachers"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send!(
        app,
        test::TestRequest::delete().uri(&format!("/teachers/{id}/"))
    );
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = send!(app, test::TestRequest::get().uri(&format!("/teachers/{id}/")));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6000);

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/teachers/{id}/"))
            .set_json(json!({ "name": "T4" }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send!(
        app,
        test::TestRequest::delete().uri(&format!("/teachers/{id}/"))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 学生不受影响
    let (_, body) = send!(app, test::TestRequest::get().uri("/students/"));
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["teachers"], json!([]));
}

#[actix_web::test]
async fn test_student_teachers_are_derived_without_duplicates() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let mut teacher_ids = Vec::new();
    for (name, subjects) in [
        ("A", json!([{ "name": "Math" }])),
        ("B", json!([{ "name": "Physics" }])),
        ("C", json!([{ "name": "Math" }, { "name": "Physics" }])),
    ] {
        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/teachers/")
                .set_json(json!({ "name": name, "subjects": subjects }))
        );
        assert_eq!(status, StatusCode::CREATED);
        teacher_ids.push(body["data"]["id"].clone());
    }

    let (_, body) = send!(
        app,
        test::TestRequest::post().uri("/students/").set_json(json!({
            "name": "S",
            "subjects": [{ "name": "Math" }, { "name": "Physics" }],
        }))
    );
    let student_id = body["data"]["id"].as_i64().unwrap();

    let (_, body) = send!(
        app,
        test::TestRequest::get().uri(&format!("/students/{student_id}/"))
    );
    let ids: Vec<Value> = body["data"]["teachers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].clone())
        .collect();
    assert_eq!(ids, teacher_ids);

    // 教师一侧同样派生出该学生
    let c_id = teacher_ids[2].as_i64().unwrap();
    let (_, body) = send!(app, test::TestRequest::get().uri(&format!("/teachers/{c_id}/")));
    let students = body["data"]["students"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["id"], student_id);
}

#[actix_web::test]
async fn test_invalid_student_payload() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/students/")
            .set_json(json!({ "name": "X", "subjects": [{ "name": "" }] }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["subjects"].is_array());

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/students/")
            .set_json(json!({ "name": "X", "roll": "five" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_staff_policy() {
    let storage = memory_storage().await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(memory_cache()))
            .configure(configure_routes)
            .service(
                web::resource("/staff-only")
                    .wrap(RequireJWT::new(AccessPolicy::Staff))
                    .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
    )
    .await;

    let (_, regular) = send!(
        app,
        test::TestRequest::post()
            .uri("/users/")
            .set_json(register_body("grace@example.com"))
    );
    let regular_token = regular["data"]["access_token"].as_str().unwrap().to_string();

    let (_, staff) = send!(
        app,
        test::TestRequest::post().uri("/users/").set_json(json!({
            "username": "heidi",
            "email": "heidi@example.com",
            "password": "pw",
            "is_staff": true,
        }))
    );
    let staff_token = staff["data"]["access_token"].as_str().unwrap().to_string();

    let (status, _) = send!(app, test::TestRequest::get().uri("/staff-only"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/staff-only")
            .insert_header(bearer(&regular_token))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2001);

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/staff-only")
            .insert_header(bearer(&staff_token))
    );
    assert_eq!(status, StatusCode::OK);
}
