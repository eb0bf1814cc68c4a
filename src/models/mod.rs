//! 数据模型定义
//!
//! 每个资源分为 entities（业务实体）、requests（请求体/查询参数）与 responses（响应体）。

pub mod attendance;
pub mod auth;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod modules;
pub mod students;
pub mod teachers;
pub mod users;

pub use common::bulk::{BulkWriteError, BulkWriteResult};
pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
