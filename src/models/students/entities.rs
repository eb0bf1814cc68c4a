use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 家长信息
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct ParentInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub occupation: Option<String>,
    pub address: Option<String>,
}

// 学生实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub grade: String,
    pub enrollment_date: chrono::DateTime<chrono::Utc>,
    pub parent_contact: String,
    // 扩展档案
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<chrono::DateTime<chrono::Utc>>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub contact_no: Option<String>,
    pub photo_url: Option<String>,
    pub admission_no: Option<String>,
    pub roll_no: Option<String>,
    pub blood_group: Option<String>,
    pub category: Option<String>,
    pub religion: Option<String>,
    pub student_address: Option<String>,
    pub address_same_as_student: bool,
    pub parent: Option<ParentInfo>,
    /// 自由格式的附加数据
    pub meta: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
