use serde::{Deserialize, Deserializer};
use ts_rs::TS;

use crate::models::PaginationQuery;

// 考勤列表查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListQuery {
    pub course: Option<String>,
    pub student: Option<String>,
    /// 单日过滤，优先于 from/to
    pub date: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

// 单个学生的考勤条目
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceEntryInput {
    #[serde(default)]
    #[ts(type = "string | number")]
    pub student: serde_json::Value,
    /// 非法状态的条目会被丢弃，而不是让整个请求失败
    #[serde(default)]
    #[ts(type = "string | null")]
    pub status: serde_json::Value,
    #[serde(default)]
    pub remarks: Option<String>,
}

// 批量考勤请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceRequest {
    #[serde(default)]
    #[ts(type = "string | number")]
    pub course: serde_json::Value,
    pub date: Option<String>,
    #[serde(default)]
    pub entries: Vec<AttendanceEntryInput>,
}

// 单条考勤更新请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct UpdateAttendanceRequest {
    #[serde(default)]
    #[ts(type = "string | number")]
    pub id: serde_json::Value,
    pub status: Option<String>,
    /// 缺省表示不修改，null 或空串表示清除
    #[serde(default, deserialize_with = "deserialize_present")]
    #[ts(type = "string | null")]
    pub remarks: Option<Option<String>>,
}

// 按 id 或按课程加日期删除
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct DeleteAttendanceRequest {
    #[serde(default)]
    #[ts(type = "string | number | null")]
    pub id: serde_json::Value,
    #[serde(default)]
    #[ts(type = "string | number | null")]
    pub course: serde_json::Value,
    pub date: Option<String>,
}

/// 存储层使用的考勤过滤条件，日期为闭区间 Unix 秒
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceFilter {
    pub course_id: Option<i64>,
    pub student_id: Option<i64>,
    pub date_from: Option<i64>,
    pub date_to: Option<i64>,
}

/// 区分字段缺省与显式 null
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
