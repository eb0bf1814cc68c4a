use std::sync::Arc;

use crate::models::{
    attendance::{
        entities::{Attendance, AttendanceDetail, AttendanceMark, AttendanceStatus},
        requests::AttendanceFilter,
    },
    courses::{
        entities::{Course, CourseDetail},
        requests::NewCourse,
    },
    dashboard::{
        entities::AttendanceDayCount,
        responses::{TeacherCourseCount, TopCourse},
    },
    enrollments::entities::EnrollmentDetail,
    modules::{entities::Module, requests::NewModule},
    students::{entities::Student, requests::NewStudent},
    teachers::{entities::Teacher, requests::NewTeacher},
    users::{
        entities::User,
        requests::{NewUser, UserChanges},
    },
};

use crate::errors::{Result, SchoolError};

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法
    // 创建账号
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取账号
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取账号
    async fn get_user_by_identifier(&self, identifier: &str) -> Result<Option<User>>;
    // 列出账号
    async fn list_users(&self) -> Result<Vec<User>>;
    // 部分更新账号
    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>>;
    // 删除账号
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;

    /// 功能模块方法
    async fn list_modules(&self) -> Result<Vec<Module>>;
    async fn create_module(&self, module: NewModule) -> Result<Module>;
    async fn count_modules(&self) -> Result<u64>;

    /// 学生管理方法
    async fn create_student(&self, student: NewStudent) -> Result<Student>;
    // 按创建时间倒序列出，limit 为 None 时返回全部
    async fn list_students(&self, limit: Option<u64>) -> Result<Vec<Student>>;
    // 返回给定 id 中实际存在的学生 id
    async fn existing_student_ids(&self, ids: &[i64]) -> Result<Vec<i64>>;
    async fn count_students(&self) -> Result<u64>;

    /// 教师管理方法
    async fn create_teacher(&self, teacher: NewTeacher) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers(&self, limit: Option<u64>) -> Result<Vec<Teacher>>;
    async fn count_teachers(&self) -> Result<u64>;
    // 按授课数量排名的教师
    async fn teacher_course_counts(&self, limit: u64) -> Result<Vec<TeacherCourseCount>>;

    /// 课程管理方法
    async fn create_course(&self, course: NewCourse) -> Result<CourseDetail>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    // 附带授课教师，按创建时间倒序
    async fn list_course_details(&self) -> Result<Vec<CourseDetail>>;
    async fn list_courses(&self, limit: Option<u64>) -> Result<Vec<Course>>;
    async fn count_courses(&self) -> Result<u64>;

    /// 选课管理方法
    async fn list_enrollments(
        &self,
        course_id: Option<i64>,
        include_inactive: bool,
    ) -> Result<Vec<EnrollmentDetail>>;
    // 按 (student, course) upsert，重新激活并刷新选课时间
    async fn upsert_enrollment(&self, course_id: i64, student_id: i64) -> Result<()>;
    // 软删除：active = false
    async fn deactivate_enrollments(&self, course_id: i64, student_ids: &[i64]) -> Result<u64>;
    // 硬删除
    async fn delete_enrollments(&self, course_id: i64, student_ids: &[i64]) -> Result<u64>;
    async fn count_active_enrollments(&self) -> Result<u64>;
    // 按有效选课数排名的课程
    async fn top_courses_by_enrollment(&self, limit: u64) -> Result<Vec<TopCourse>>;

    /// 考勤管理方法
    // 分页列出，按日期倒序，page 从 1 开始
    async fn list_attendance(
        &self,
        filter: AttendanceFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<AttendanceDetail>, u64)>;
    // 按 (student, course, date) upsert
    async fn upsert_attendance(&self, mark: AttendanceMark) -> Result<()>;
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>>;
    // remarks: None 不修改，Some(None) 清除
    async fn update_attendance(
        &self,
        id: i64,
        status: Option<AttendanceStatus>,
        remarks: Option<Option<String>>,
    ) -> Result<Option<Attendance>>;
    async fn delete_attendance_by_id(&self, id: i64) -> Result<bool>;
    // 删除某课程某天（UTC 零点）的全部考勤
    async fn delete_attendance_for_day(&self, course_id: i64, day_start: i64) -> Result<u64>;
    async fn count_attendance(&self) -> Result<u64>;
    async fn list_recent_attendance(&self, limit: u64) -> Result<Vec<AttendanceDetail>>;
    // [from, to] 区间内按天、按状态分组计数
    async fn attendance_day_counts(&self, from: i64, to: i64) -> Result<Vec<AttendanceDayCount>>;

    /// 生命周期
    async fn close(&self) -> Result<()>;
}

/// 进程级存储上下文
///
/// 启动时构建，关闭时释放。数据库未配置时为空，所有依赖存储的路由返回
/// "Database not configured"。
#[derive(Clone, Default)]
pub struct StorageContext {
    storage: Option<Arc<dyn Storage>>,
}

impl StorageContext {
    pub fn configured(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub fn unconfigured() -> Self {
        Self { storage: None }
    }

    pub fn is_configured(&self) -> bool {
        self.storage.is_some()
    }

    /// 获取存储句柄
    pub fn get(&self) -> Result<Arc<dyn Storage>> {
        self.storage
            .clone()
            .ok_or_else(|| SchoolError::database_config("Database not configured"))
    }

    /// 释放连接池，未配置时为空操作
    pub async fn close(&self) -> Result<()> {
        match &self.storage {
            Some(storage) => storage.close().await,
            None => Ok(()),
        }
    }
}

/// 按配置构建存储上下文；未配置数据库时返回空上下文
pub async fn create_storage_context() -> Result<StorageContext> {
    let config = crate::config::AppConfig::get();
    if !config.is_database_configured() {
        return Ok(StorageContext::unconfigured());
    }
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(StorageContext::configured(Arc::new(storage)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_context_reports_database_config() {
        let context = StorageContext::unconfigured();
        assert!(!context.is_configured());
        match context.get() {
            Err(SchoolError::DatabaseConfig(msg)) => assert_eq!(msg, "Database not configured"),
            _ => panic!("expected a database configuration error"),
        }
    }
}
