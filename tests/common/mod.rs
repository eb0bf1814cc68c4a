//! 集成测试共用的应用与数据构造

#![allow(dead_code)]

use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web,
};
use serde_json::Value;
use std::sync::Arc;

use school_admin_next::config::DatabaseConfig;
use school_admin_next::models::auth::entities::SessionUser;
use school_admin_next::models::users::entities::{Permission, User, UserRole};
use school_admin_next::models::users::requests::NewUser;
use school_admin_next::routes;
use school_admin_next::storage::sea_orm_storage::SeaOrmStorage;
use school_admin_next::storage::{Storage, StorageContext};
use school_admin_next::utils::jwt::JwtUtils;
use school_admin_next::utils::password::hash_password;
use school_admin_next::utils::{json_error_handler, query_error_handler};

pub const ADMIN_PASSWORD: &str = "admin-password-123";

/// 迁移完成的内存 SQLite 存储
pub async fn memory_storage() -> Arc<dyn Storage> {
    let database = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        ..Default::default()
    };
    let storage = SeaOrmStorage::connect(&database)
        .await
        .expect("in-memory storage");
    Arc::new(storage)
}

/// 与生产相同的路由配置
pub fn app(
    context: StorageContext,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::Data::new(context))
        .configure(routes::configure_api_routes)
        .configure(routes::configure_frontend_routes)
}

pub async fn create_account(
    storage: &Arc<dyn Storage>,
    username: &str,
    role: UserRole,
    permissions: Vec<Permission>,
) -> User {
    storage
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@school.test"),
            password_hash: hash_password(ADMIN_PASSWORD).expect("hash"),
            role,
            is_active: true,
            permissions,
        })
        .await
        .expect("create account")
}

pub fn token_for(user: &User) -> String {
    JwtUtils::generate_session_token(&SessionUser::from(user)).expect("token")
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// 存储与管理员令牌
pub struct Fixture {
    pub storage: Arc<dyn Storage>,
    pub admin: User,
    pub admin_token: String,
}

impl Fixture {
    pub async fn new() -> Self {
        let storage = memory_storage().await;
        let admin = create_account(&storage, "admin", UserRole::Admin, vec![]).await;
        let admin_token = token_for(&admin);
        Self {
            storage,
            admin,
            admin_token,
        }
    }

    pub fn context(&self) -> StorageContext {
        StorageContext::configured(self.storage.clone())
    }
}

pub fn student_body(name: &str, email: &str) -> Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "grade": "9",
        "parentContact": "555-0199",
    })
}

/// 取出响应体中的 data 字段
pub fn data(body: &Value) -> &Value {
    &body["data"]
}

/// 发送请求并返回 (状态码, JSON 响应体)，非 JSON 响应体记为 Null
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let bytes = actix_web::test::read_body(resp).await;
        let body: serde_json::Value =
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }};
}

/// 创建学生并返回 id
#[allow(unused_macros)]
macro_rules! create_student {
    ($app:expr, $token:expr, $name:expr, $email:expr) => {{
        let (status, body) = send!(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/api/students")
                .insert_header($crate::common::bearer($token))
                .set_json($crate::common::student_body($name, $email))
        );
        assert_eq!(status, actix_web::http::StatusCode::CREATED);
        body["data"]["student"]["id"].as_i64().expect("student id")
    }};
}

/// 创建课程并返回 id
#[allow(unused_macros)]
macro_rules! create_course {
    ($app:expr, $token:expr, $body:expr) => {{
        let (status, body) = send!(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/api/courses")
                .insert_header($crate::common::bearer($token))
                .set_json($body)
        );
        assert_eq!(status, actix_web::http::StatusCode::CREATED);
        body["data"]["course"]["id"].as_i64().expect("course id")
    }};
}
