#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::json;

use common::{Fixture, bearer, create_account, data, student_body, token_for};
use school_admin_next::models::users::entities::{Permission, UserRole};

#[actix_web::test]
async fn test_duplicate_student_email_is_a_conflict() {
    let fixture = Fixture::new().await;
    let app = test::init_service(common::app(fixture.context())).await;

    let (status, body) = send!(
        app,
        TestRequest::post()
            .uri("/api/students")
            .insert_header(bearer(&fixture.admin_token))
            .set_json(student_body("Ada", "ada@school.test"))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(data(&body)["student"]["email"], "ada@school.test");

    // 大小写不同也视为同一邮箱
    let (status, body) = send!(
        app,
        TestRequest::post()
            .uri("/api/students")
            .insert_header(bearer(&fixture.admin_token))
            .set_json(student_body("Ada Again", "ADA@school.test"))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4000);

    let (status, body) = send!(
        app,
        TestRequest::get()
            .uri("/api/students")
            .insert_header(bearer(&fixture.admin_token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["items"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn test_missing_required_field_is_rejected() {
    let fixture = Fixture::new().await;
    let app = test::init_service(common::app(fixture.context())).await;

    let (status, body) = send!(
        app,
        TestRequest::post()
            .uri("/api/students")
            .insert_header(bearer(&fixture.admin_token))
            .set_json(json!({"name": "Ada", "email": "ada@school.test", "grade": "  "}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "grade is required");
}

#[actix_web::test]
async fn test_students_list_is_newest_first() {
    let fixture = Fixture::new().await;
    let app = test::init_service(common::app(fixture.context())).await;

    for (name, email) in [("First", "first@school.test"), ("Second", "second@school.test")] {
        let (status, _) = send!(
            app,
            TestRequest::post()
                .uri("/api/students")
                .insert_header(bearer(&fixture.admin_token))
                .set_json(student_body(name, email))
        );
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send!(
        app,
        TestRequest::get()
            .uri("/api/students")
            .insert_header(bearer(&fixture.admin_token))
    );
    let names: Vec<&str> = data(&body)["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Second", "First"]);
}

#[actix_web::test]
async fn test_module_permissions_gate_student_routes() {
    let fixture = Fixture::new().await;
    let viewer = create_account(
        &fixture.storage,
        "viewer",
        UserRole::Teacher,
        vec![Permission {
            module: "students".to_string(),
            can_view: true,
            can_edit: false,
            can_delete: false,
        }],
    )
    .await;
    let token = token_for(&viewer);
    let app = test::init_service(common::app(fixture.context())).await;

    let (status, _) = send!(app, TestRequest::get().uri("/api/students"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send!(
        app,
        TestRequest::get()
            .uri("/api/students")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send!(
        app,
        TestRequest::post()
            .uri("/api/students")
            .insert_header(bearer(&token))
            .set_json(student_body("Blocked", "blocked@school.test"))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send!(
        app,
        TestRequest::get()
            .uri("/api/teachers")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}
