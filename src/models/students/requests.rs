use super::entities::ParentInfo;
use serde::Deserialize;
use ts_rs::TS;

// 学生创建请求，必填项在服务层校验
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub grade: Option<String>,
    pub enrollment_date: Option<String>,
    pub parent_contact: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<String>,
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
    #[serde(default)]
    pub address_same_as_student: bool,
    pub parent: Option<ParentInfo>,
    pub meta: Option<serde_json::Value>,
}

/// 校验后的学生写入参数
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub grade: String,
    pub enrollment_date: chrono::DateTime<chrono::Utc>,
    pub parent_contact: String,
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
    pub meta: Option<serde_json::Value>,
}
