#[macro_use]
mod common;

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use serde_json::json;

use common::{Fixture, bearer, data};
use school_admin_next::storage::StorageContext;

#[actix_web::test]
async fn test_overview_shape_and_no_store() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;

    let ada = create_student!(app, &token, "Ada", "ada@school.test");
    let course = create_course!(app, &token, json!({"name": "Physics"}));
    let (status, _) = send!(
        app,
        TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(bearer(&token))
            .set_json(json!({"course": course, "students": [ada]}))
    );
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send!(
        app,
        TestRequest::post()
            .uri("/api/attendance")
            .insert_header(bearer(&token))
            .set_json(json!({
                "course": course,
                "entries": [{"student": ada, "status": "present"}],
            }))
    );
    assert_eq!(status, StatusCode::OK);

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/api/dashboard")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    let body: serde_json::Value = test::read_body_json(resp).await;
    let overview = data(&body);

    assert_eq!(overview["counts"]["students"], 1);
    assert_eq!(overview["counts"]["courses"], 1);
    assert_eq!(overview["counts"]["enrollmentsActive"], 1);
    assert_eq!(overview["counts"]["attendanceRecords"], 1);

    let series = overview["attendanceLast7Days"].as_array().unwrap();
    assert_eq!(series.len(), 7);
    // 今天的点名落在最后一个点上
    let today = &series[6];
    assert_eq!(today["present"], 1);
    assert_eq!(today["total"], 1);
    assert_eq!(today["ratePresent"], 1.0);
    assert_eq!(series[0]["total"], 0);
    assert_eq!(series[0]["ratePresent"], 0.0);

    let top = overview["topCoursesByEnrollment"].as_array().unwrap();
    assert_eq!(top[0]["name"], "Physics");
    assert_eq!(top[0]["count"], 1);
    assert_eq!(overview["recent"]["students"].as_array().unwrap().len(), 1);

    let recent_attendance = overview["recent"]["attendance"].as_array().unwrap();
    assert_eq!(recent_attendance.len(), 1);
    assert_eq!(recent_attendance[0]["studentId"], ada);
    assert_eq!(recent_attendance[0]["student"]["name"], "Ada");
    assert_eq!(recent_attendance[0]["course"]["name"], "Physics");
}

#[actix_web::test]
async fn test_empty_overview_has_seven_zero_days() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;

    let (status, body) = send!(
        app,
        TestRequest::get()
            .uri("/api/dashboard")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    let series = data(&body)["attendanceLast7Days"].as_array().unwrap();
    assert_eq!(series.len(), 7);
    assert!(series.iter().all(|day| day["total"] == 0));
    assert_eq!(data(&body)["counts"]["teachers"], 0);
}

#[actix_web::test]
async fn test_unconfigured_database_reports_server_error() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(StorageContext::unconfigured())).await;

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/api/dashboard")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Database not configured");
}
