//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub grade: String,
    pub enrollment_date: i64,
    pub parent_contact: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<i64>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub contact_no: Option<String>,
    pub photo_url: Option<String>,
    pub admission_no: Option<String>,
    pub roll_no: Option<String>,
    pub blood_group: Option<String>,
    pub category: Option<String>,
    pub religion: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub student_address: Option<String>,
    pub address_same_as_student: bool,
    /// 家长信息 JSON
    #[sea_orm(column_type = "Text", nullable)]
    pub parent: Option<String>,
    /// 附加数据 JSON
    #[sea_orm(column_type = "Text", nullable)]
    pub meta: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use super::timestamp_to_datetime;
        use crate::models::students::entities::Student;

        Student {
            id: self.id,
            name: self.name,
            email: self.email,
            grade: self.grade,
            enrollment_date: timestamp_to_datetime(self.enrollment_date),
            parent_contact: self.parent_contact,
            first_name: self.first_name,
            last_name: self.last_name,
            dob: self.dob.map(timestamp_to_datetime),
            gender: self.gender,
            nationality: self.nationality,
            contact_no: self.contact_no,
            photo_url: self.photo_url,
            admission_no: self.admission_no,
            roll_no: self.roll_no,
            blood_group: self.blood_group,
            category: self.category,
            religion: self.religion,
            student_address: self.student_address,
            address_same_as_student: self.address_same_as_student,
            parent: self
                .parent
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            meta: self
                .meta
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
