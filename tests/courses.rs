#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::json;

use common::{Fixture, bearer, data};

#[actix_web::test]
async fn test_course_defaults_and_teacher_population() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;

    let (status, body) = send!(
        app,
        TestRequest::post()
            .uri("/api/teachers")
            .insert_header(bearer(&token))
            .set_json(json!({
                "name": "Grace Hopper",
                "email": "grace@school.test",
                "subjectSpecialty": "Computing",
            }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let teacher_id = data(&body)["teacher"]["id"].as_i64().unwrap();

    let course_id = create_course!(
        app,
        &token,
        json!({"name": "Compilers", "credits": "lots", "assignedTeacher": teacher_id.to_string()})
    );

    let (status, body) = send!(
        app,
        TestRequest::get()
            .uri("/api/courses")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    let course = &data(&body)["items"][0];
    assert_eq!(course["id"].as_i64(), Some(course_id));
    assert_eq!(course["credits"].as_f64(), Some(3.0));
    assert_eq!(course["assignedTeacher"]["name"], "Grace Hopper");
}

#[actix_web::test]
async fn test_unknown_or_malformed_teacher_is_rejected() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;

    for teacher in [json!("not-an-id"), json!(9999)] {
        let (status, _) = send!(
            app,
            TestRequest::post()
                .uri("/api/courses")
                .insert_header(bearer(&token))
                .set_json(json!({"name": "Orphan", "assignedTeacher": teacher}))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[actix_web::test]
async fn test_duplicate_teacher_email_is_a_conflict() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;

    let teacher = json!({
        "name": "Alan Turing",
        "email": "alan@school.test",
        "subjectSpecialty": "Mathematics",
        "hireDate": "2020-09-01",
    });
    let (status, _) = send!(
        app,
        TestRequest::post()
            .uri("/api/teachers")
            .insert_header(bearer(&token))
            .set_json(teacher.clone())
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send!(
        app,
        TestRequest::post()
            .uri("/api/teachers")
            .insert_header(bearer(&token))
            .set_json(teacher)
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "A teacher with this email already exists.");
}
