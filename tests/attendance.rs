#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use futures_util::future::join_all;
use serde_json::{Value, json};

use common::{Fixture, bearer, data};

fn items(body: &Value) -> &Vec<Value> {
    data(body)["items"].as_array().expect("items")
}

#[actix_web::test]
async fn test_remarking_the_same_day_is_idempotent() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;

    let ada = create_student!(app, &token, "Ada", "ada@school.test");
    let bob = create_student!(app, &token, "Bob", "bob@school.test");
    let course = create_course!(app, &token, json!({"name": "Physics"}));

    let (status, body) = send!(
        app,
        TestRequest::post()
            .uri("/api/attendance")
            .insert_header(bearer(&token))
            .set_json(json!({
                "course": course,
                "date": "2025-01-10",
                "entries": [
                    {"student": ada, "status": "present", "remarks": "on time"},
                    {"student": bob, "status": "absent"},
                    {"student": "garbage", "status": "present"},
                    {"student": bob, "status": "maybe"},
                ],
            }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["result"]["succeeded"], 2);

    // 同一天再次点名，后写入的状态覆盖
    let (status, _) = send!(
        app,
        TestRequest::post()
            .uri("/api/attendance")
            .insert_header(bearer(&token))
            .set_json(json!({
                "course": course,
                "date": "2025-01-10T16:45:00Z",
                "entries": [
                    {"student": ada, "status": "present"},
                    {"student": ada, "status": "late", "remarks": "bus"},
                ],
            }))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send!(
        app,
        TestRequest::get()
            .uri(&format!("/api/attendance?course={course}"))
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    let records = items(&body);
    assert_eq!(records.len(), 2);
    let ada_record = records
        .iter()
        .find(|r| r["studentId"].as_i64() == Some(ada))
        .expect("ada record");
    assert_eq!(ada_record["status"], "late");
    assert_eq!(ada_record["remarks"], "bus");
    assert_eq!(ada_record["student"]["name"], "Ada");
    assert_eq!(data(&body)["pagination"]["total"], 2);
}

#[actix_web::test]
async fn test_date_filter_covers_exactly_one_utc_day() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;

    let ada = create_student!(app, &token, "Ada", "ada@school.test");
    let course = create_course!(app, &token, json!({"name": "Physics"}));

    for date in ["2025-01-09", "2025-01-10", "2025-01-11"] {
        let (status, _) = send!(
            app,
            TestRequest::post()
                .uri("/api/attendance")
                .insert_header(bearer(&token))
                .set_json(json!({
                    "course": course.to_string(),
                    "date": date,
                    "entries": [{"student": ada.to_string(), "status": "present"}],
                }))
        );
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send!(
        app,
        TestRequest::get()
            .uri("/api/attendance?date=2025-01-10")
            .insert_header(bearer(&token))
    );
    let records = items(&body);
    assert_eq!(records.len(), 1);
    assert!(records[0]["date"].as_str().unwrap().starts_with("2025-01-10"));

    let (_, body) = send!(
        app,
        TestRequest::get()
            .uri("/api/attendance?from=2025-01-10&to=2025-01-11&pageSize=1")
            .insert_header(bearer(&token))
    );
    assert_eq!(items(&body).len(), 1);
    assert_eq!(data(&body)["pagination"]["total"], 2);
    assert_eq!(data(&body)["pagination"]["totalPages"], 2);
    // 日期倒序
    assert!(items(&body)[0]["date"].as_str().unwrap().starts_with("2025-01-11"));
}

#[actix_web::test]
async fn test_zero_valid_entries_is_bad_request() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;
    let course = create_course!(app, &token, json!({"name": "Physics"}));

    let (status, _) = send!(
        app,
        TestRequest::post()
            .uri("/api/attendance")
            .insert_header(bearer(&token))
            .set_json(json!({
                "course": course,
                "date": "2025-01-10",
                "entries": [{"student": "nope", "status": "present"}, {"student": 1}],
            }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_update_and_delete_records() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;

    let ada = create_student!(app, &token, "Ada", "ada@school.test");
    let bob = create_student!(app, &token, "Bob", "bob@school.test");
    let course = create_course!(app, &token, json!({"name": "Physics"}));
    let (status, _) = send!(
        app,
        TestRequest::post()
            .uri("/api/attendance")
            .insert_header(bearer(&token))
            .set_json(json!({
                "course": course,
                "date": "2025-02-03",
                "entries": [
                    {"student": ada, "status": "absent", "remarks": "sick"},
                    {"student": bob, "status": "present"},
                ],
            }))
    );
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send!(
        app,
        TestRequest::get()
            .uri(&format!("/api/attendance?student={ada}"))
            .insert_header(bearer(&token))
    );
    let record_id = items(&body)[0]["id"].as_i64().unwrap();

    let (status, body) = send!(
        app,
        TestRequest::patch()
            .uri("/api/attendance")
            .insert_header(bearer(&token))
            .set_json(json!({"id": record_id, "status": "excused", "remarks": null}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["attendance"]["status"], "excused");
    assert_eq!(data(&body)["attendance"]["remarks"], Value::Null);

    let (status, _) = send!(
        app,
        TestRequest::patch()
            .uri("/api/attendance")
            .insert_header(bearer(&token))
            .set_json(json!({"id": record_id, "status": "asleep"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(
        app,
        TestRequest::patch()
            .uri("/api/attendance")
            .insert_header(bearer(&token))
            .set_json(json!({"id": 99999, "status": "late"}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send!(
        app,
        TestRequest::delete()
            .uri("/api/attendance")
            .insert_header(bearer(&token))
            .set_json(json!({"id": record_id}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["deleted"], 1);

    let (status, _) = send!(
        app,
        TestRequest::delete()
            .uri("/api/attendance")
            .insert_header(bearer(&token))
            .set_json(json!({"id": record_id}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 按课程与日期删除当天全部记录
    let (status, body) = send!(
        app,
        TestRequest::delete()
            .uri("/api/attendance")
            .insert_header(bearer(&token))
            .set_json(json!({"course": course, "date": "2025-02-03"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["deleted"], 1);

    let (status, _) = send!(
        app,
        TestRequest::delete()
            .uri("/api/attendance")
            .insert_header(bearer(&token))
            .set_json(json!({"course": course}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_concurrent_marks_keep_one_record() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;

    let ada = create_student!(app, &token, "Ada", "ada@school.test");
    let course = create_course!(app, &token, json!({"name": "Physics"}));

    let statuses = ["present", "absent", "late", "excused"];
    let responses = join_all(statuses.iter().map(|status| {
        test::call_service(
            &app,
            TestRequest::post()
                .uri("/api/attendance")
                .insert_header(bearer(&token))
                .set_json(json!({
                    "course": course,
                    "date": "2025-03-04",
                    "entries": [{"student": ada, "status": status}],
                }))
                .to_request(),
        )
    }))
    .await;
    assert!(responses.iter().all(|resp| resp.status() == StatusCode::OK));

    let (status, body) = send!(
        app,
        TestRequest::get()
            .uri(&format!("/api/attendance?course={course}&date=2025-03-04"))
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["pagination"]["total"], 1);
    let stored = items(&body)[0]["status"].as_str().unwrap().to_string();
    assert!(statuses.contains(&stored.as_str()));
}

#[actix_web::test]
async fn test_page_far_past_the_end_is_empty() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;

    let ada = create_student!(app, &token, "Ada", "ada@school.test");
    let course = create_course!(app, &token, json!({"name": "Physics"}));
    let (status, _) = send!(
        app,
        TestRequest::post()
            .uri("/api/attendance")
            .insert_header(bearer(&token))
            .set_json(json!({
                "course": course,
                "date": "2025-03-04",
                "entries": [{"student": ada, "status": "present"}],
            }))
    );
    assert_eq!(status, StatusCode::OK);

    for uri in [
        "/api/attendance?page=9223372036854775807&pageSize=100",
        "/api/attendance?page=9223372036854775807&pageSize=1",
        "/api/attendance?page=2&pageSize=1",
    ] {
        let (status, body) = send!(app, TestRequest::get().uri(uri).insert_header(bearer(&token)));
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(items(&body).is_empty(), "{uri}");
        assert_eq!(data(&body)["pagination"]["total"], 1);
    }
}
