use serde::Deserialize;
use ts_rs::TS;

// 课程创建请求
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// 数字或数字字符串，缺省为 3
    #[serde(default)]
    #[ts(type = "number | string | null")]
    pub credits: serde_json::Value,
    /// 教师 id
    #[serde(default)]
    #[ts(type = "number | string | null")]
    pub assigned_teacher: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub name: String,
    pub description: Option<String>,
    pub credits: f64,
    pub assigned_teacher_id: Option<i64>,
}
