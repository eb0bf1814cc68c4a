use serde::Deserialize;
use ts_rs::TS;

// 教师创建请求
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct CreateTeacherRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject_specialty: Option<String>,
    pub hire_date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
    pub subject_specialty: String,
    pub hire_date: chrono::DateTime<chrono::Utc>,
}
