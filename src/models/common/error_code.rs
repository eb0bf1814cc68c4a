/// 业务错误码
///
/// 响应体中的 `code` 字段，0 表示成功。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,
    DatabaseNotConfigured = 1501,

    // 认证 2xxx
    AuthFailed = 2000,
    SessionExpired = 2001,

    // 账号 3xxx
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserNameInvalid = 3002,
    UserEmailInvalid = 3003,
    CanNotDeleteCurrentUser = 3004,

    // 学校数据 4xxx
    StudentAlreadyExists = 4000,
    TeacherAlreadyExists = 4100,
    CourseNotFound = 4200,
    EnrollmentInvalid = 4300,
    AttendanceInvalid = 4400,
    AttendanceNotFound = 4401,

    // 功能模块 5xxx
    ModuleAlreadyExists = 5000,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
