//! 业务逻辑层
//!
//! 每个资源一个服务，每个操作一个文件。服务从请求的 app_data 中取得
//! `StorageContext`，错误统一经 `error_response` 记录并转换为响应。

pub mod attendance;
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod modules;
pub mod students;
pub mod teachers;
pub mod users;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use dashboard::DashboardService;
pub use enrollments::EnrollmentService;
pub use modules::ModuleService;
pub use students::StudentService;
pub use teachers::TeacherService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tracing::{error, info};

use crate::errors::{Result, SchoolError};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::{Storage, StorageContext};

/// 从请求中取得存储句柄
pub(crate) fn storage_from_request(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<StorageContext>>()
        .ok_or_else(|| SchoolError::database_config("Database not configured"))?
        .get()
}

/// 记录错误并转换为统一响应：5xx 记为 error，4xx 记为 info
pub(crate) fn error_response(request: &HttpRequest, err: SchoolError) -> HttpResponse {
    log_error(request, &err);
    err.to_http_response()
}

/// 同 `error_response`，但使用指定的业务错误码
pub(crate) fn error_response_with_code(
    request: &HttpRequest,
    err: SchoolError,
    code: ErrorCode,
) -> HttpResponse {
    log_error(request, &err);
    HttpResponse::build(err.status_code()).json(ApiResponse::error_empty(code, err.message()))
}

fn log_error(request: &HttpRequest, err: &SchoolError) {
    if err.status_code().is_server_error() {
        error!("[{} {}] {}", request.method(), request.path(), err);
    } else {
        info!("[{} {}] {}", request.method(), request.path(), err);
    }
}
