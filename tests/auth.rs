#[macro_use]
mod common;

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use serde_json::json;

use common::{ADMIN_PASSWORD, Fixture, bearer, data};
use school_admin_next::models::users::entities::UserRole;
use school_admin_next::models::users::requests::UserChanges;

#[actix_web::test]
async fn test_login_by_username_or_email() {
    let fixture = Fixture::new().await;
    let app = test::init_service(common::app(fixture.context())).await;

    for identifier in ["admin", "admin@school.test"] {
        let resp = test::call_service(
            &app,
            TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({"identifier": identifier, "password": ADMIN_PASSWORD}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "session_token")
            .expect("session cookie");
        assert!(!cookie.value().is_empty());
        assert_eq!(cookie.http_only(), Some(true));

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(data(&body)["user"]["role"], "admin");
        assert!(data(&body)["token"].as_str().is_some());
        assert!(data(&body)["user"].get("passwordHash").is_none());
    }
}

#[actix_web::test]
async fn test_failed_logins_share_one_message() {
    let fixture = Fixture::new().await;
    let dormant =
        common::create_account(&fixture.storage, "dormant", UserRole::Teacher, vec![]).await;
    fixture
        .storage
        .update_user(
            dormant.id,
            UserChanges {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let app = test::init_service(common::app(fixture.context())).await;

    let attempts = [
        json!({"identifier": "admin", "password": "wrong-password"}),
        json!({"identifier": "dormant", "password": common::ADMIN_PASSWORD}),
        json!({"identifier": "nobody", "password": "whatever"}),
        json!({"identifier": "  ", "password": "whatever"}),
    ];
    for attempt in attempts {
        let (status, body) = send!(
            app,
            TestRequest::post().uri("/api/auth/login").set_json(attempt)
        );
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
    }
}

#[actix_web::test]
async fn test_session_requires_valid_token() {
    let fixture = Fixture::new().await;
    let token = fixture.admin_token.clone();
    let app = test::init_service(common::app(fixture.context())).await;

    let (status, _) = send!(app, TestRequest::get().uri("/api/auth/session"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send!(
        app,
        TestRequest::get()
            .uri("/api/auth/session")
            .insert_header(bearer("not-a-token"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send!(
        app,
        TestRequest::get()
            .uri("/api/auth/session")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&body)["user"]["username"], "admin");
}

#[actix_web::test]
async fn test_deactivated_account_loses_its_session() {
    let fixture = Fixture::new().await;
    let teacher = common::create_account(&fixture.storage, "tina", UserRole::Teacher, vec![]).await;
    let token = common::token_for(&teacher);
    fixture
        .storage
        .update_user(
            teacher.id,
            UserChanges {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let app = test::init_service(common::app(fixture.context())).await;

    let (status, _) = send!(
        app,
        TestRequest::get()
            .uri("/api/auth/session")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_logout_clears_cookie() {
    let fixture = Fixture::new().await;
    let app = test::init_service(common::app(fixture.context())).await;

    let resp = test::call_service(
        &app,
        TestRequest::post().uri("/api/auth/logout").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "session_token")
        .expect("cleared cookie");
    assert_eq!(cookie.value(), "");
}

#[actix_web::test]
async fn test_pages_redirect_by_session() {
    let fixture = Fixture::new().await;
    let teacher = common::create_account(&fixture.storage, "tina", UserRole::Teacher, vec![]).await;
    let teacher_token = common::token_for(&teacher);
    let app = test::init_service(common::app(fixture.context())).await;

    let resp = test::call_service(&app, TestRequest::get().uri("/students").to_request()).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/login?callbackUrl=%2Fstudents"
    );

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/admin/users")
            .insert_header(bearer(&teacher_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/login")
            .insert_header(bearer(&fixture.admin_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/admin/dashboard"
    );

    // 未知 API 路径返回 JSON 404 而非跳转
    let (status, body) = send!(app, TestRequest::get().uri("/api/nothing-here"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No route for /api/nothing-here");
}
