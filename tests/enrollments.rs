#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::{Value, json};

use common::{Fixture, bearer, data};

fn items(body: &Value) -> &Vec<Value> {
    data(body)["items"].as_array().expect("items")
}

#[actix_web::test]
async fn test_malformed_student_ids_are_dropped() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;

    let student_id = create_student!(app, &token, "Ada", "ada@school.test");
    let course_id = create_course!(app, &token, json!({"name": "Algebra"}));

    let (status, body) = send!(
        app,
        TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(bearer(&token))
            .set_json(json!({
                "course": course_id.to_string(),
                "students": [student_id.to_string(), "not-an-id"],
            }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["result"]["requested"], 1);
    assert_eq!(data(&body)["result"]["succeeded"], 1);

    let (_, body) = send!(
        app,
        TestRequest::get()
            .uri(&format!("/api/enrollments?course={course_id}"))
            .insert_header(bearer(&token))
    );
    let enrollments = items(&body);
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0]["active"], true);
    assert_eq!(enrollments[0]["student"]["name"], "Ada");
    assert_eq!(enrollments[0]["course"]["name"], "Algebra");
}

#[actix_web::test]
async fn test_no_valid_ids_and_unknown_course() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;
    let student_id = create_student!(app, &token, "Ada", "ada@school.test");
    let course_id = create_course!(app, &token, json!({"name": "Algebra"}));

    let (status, _) = send!(
        app,
        TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(bearer(&token))
            .set_json(json!({"course": course_id, "students": ["x", -1]}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(
        app,
        TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(bearer(&token))
            .set_json(json!({"course": 4242, "students": [student_id]}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 格式合法但不存在的学生逐条报告
    let (status, body) = send!(
        app,
        TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(bearer(&token))
            .set_json(json!({"course": course_id, "students": [student_id, 777]}))
    );
    assert_eq!(status, StatusCode::OK);
    let result = &data(&body)["result"];
    assert_eq!(result["succeeded"], 1);
    assert_eq!(result["writeErrors"][0]["studentId"], 777);
    assert_eq!(result["writeErrors"][0]["message"], "Student not found");
}

#[actix_web::test]
async fn test_soft_and_hard_removal() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;

    let student_id = create_student!(app, &token, "Ada", "ada@school.test");
    let course_id = create_course!(app, &token, json!({"name": "Algebra"}));
    let enroll = || {
        TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(bearer(&token))
            .set_json(json!({"course": course_id, "students": [student_id]}))
    };
    let (status, _) = send!(app, enroll());
    assert_eq!(status, StatusCode::OK);

    // 软删除：默认列表看不到，includeInactive 时仍在
    let (status, body) = send!(
        app,
        TestRequest::delete()
            .uri("/api/enrollments")
            .insert_header(bearer(&token))
            .set_json(json!({"course": course_id, "students": [student_id], "hard": false}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["affected"], 1);

    let active_uri = format!("/api/enrollments?course={course_id}");
    let all_uri = format!("/api/enrollments?course={course_id}&includeInactive=true");

    let (_, body) = send!(
        app,
        TestRequest::get().uri(&active_uri).insert_header(bearer(&token))
    );
    assert!(items(&body).is_empty());
    let (_, body) = send!(
        app,
        TestRequest::get().uri(&all_uri).insert_header(bearer(&token))
    );
    assert_eq!(items(&body).len(), 1);
    assert_eq!(items(&body)[0]["active"], false);

    // 重新选课会重新激活同一条记录
    let (status, _) = send!(app, enroll());
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send!(
        app,
        TestRequest::get().uri(&all_uri).insert_header(bearer(&token))
    );
    assert_eq!(items(&body).len(), 1);
    assert_eq!(items(&body)[0]["active"], true);

    // 硬删除：彻底移除
    let (status, _) = send!(
        app,
        TestRequest::delete()
            .uri("/api/enrollments")
            .insert_header(bearer(&token))
            .set_json(json!({"course": course_id, "students": [student_id], "hard": "true"}))
    );
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send!(
        app,
        TestRequest::get().uri(&all_uri).insert_header(bearer(&token))
    );
    assert!(items(&body).is_empty());
}
