use super::{SeaOrmStorage, db_err};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::Result;
use crate::models::students::{entities::Student, requests::NewStudent};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建学生，邮箱重复时返回 Conflict
    pub async fn create_student_impl(&self, student: NewStudent) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let parent = student
            .parent
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let meta = student
            .meta
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let model = ActiveModel {
            name: Set(student.name),
            email: Set(student.email),
            grade: Set(student.grade),
            enrollment_date: Set(student.enrollment_date.timestamp()),
            parent_contact: Set(student.parent_contact),
            first_name: Set(student.first_name),
            last_name: Set(student.last_name),
            dob: Set(student.dob.map(|d| d.timestamp())),
            gender: Set(student.gender),
            nationality: Set(student.nationality),
            contact_no: Set(student.contact_no),
            photo_url: Set(student.photo_url),
            admission_no: Set(student.admission_no),
            roll_no: Set(student.roll_no),
            blood_group: Set(student.blood_group),
            category: Set(student.category),
            religion: Set(student.religion),
            student_address: Set(student.student_address),
            address_same_as_student: Set(student.address_same_as_student),
            parent: Set(parent),
            meta: Set(meta),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create student"))?;

        Ok(result.into_student())
    }

    /// 按创建时间倒序列出学生
    pub async fn list_students_impl(&self, limit: Option<u64>) -> Result<Vec<Student>> {
        let students = Students::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list students"))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn existing_student_ids_impl(&self, ids: &[i64]) -> Result<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Students::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::Id.is_in(ids.iter().copied()))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(db_err("Failed to query students"))
    }

    pub async fn count_students_impl(&self) -> Result<u64> {
        Students::find()
            .count(&self.db)
            .await
            .map_err(db_err("Failed to count students"))
    }
}
