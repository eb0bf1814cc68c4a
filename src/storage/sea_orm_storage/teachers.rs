use super::{SeaOrmStorage, db_err};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::Result;
use crate::models::dashboard::responses::TeacherCourseCount;
use crate::models::teachers::{entities::Teacher, requests::NewTeacher};
use super::dashboard::rank_by_count;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;

#[derive(Debug, FromQueryResult)]
struct TeacherCourseRow {
    assigned_teacher_id: i64,
    cnt: i64,
}

impl SeaOrmStorage {
    /// 创建教师，邮箱重复时返回 Conflict
    pub async fn create_teacher_impl(&self, teacher: NewTeacher) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(teacher.name),
            email: Set(teacher.email),
            subject_specialty: Set(teacher.subject_specialty),
            hire_date: Set(teacher.hire_date.timestamp()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create teacher"))?;

        Ok(result.into_teacher())
    }

    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query teacher"))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 按创建时间倒序列出教师
    pub async fn list_teachers_impl(&self, limit: Option<u64>) -> Result<Vec<Teacher>> {
        let teachers = Teachers::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list teachers"))?;

        Ok(teachers.into_iter().map(|m| m.into_teacher()).collect())
    }

    pub async fn count_teachers_impl(&self) -> Result<u64> {
        Teachers::find()
            .count(&self.db)
            .await
            .map_err(db_err("Failed to count teachers"))
    }

    /// 按授课数量倒序排名教师
    pub async fn teacher_course_counts_impl(&self, limit: u64) -> Result<Vec<TeacherCourseCount>> {
        let rows = Courses::find()
            .select_only()
            .column(CourseColumn::AssignedTeacherId)
            .column_as(Expr::expr(Func::count(Expr::col(CourseColumn::Id))), "cnt")
            .filter(CourseColumn::AssignedTeacherId.is_not_null())
            .group_by(CourseColumn::AssignedTeacherId)
            .into_model::<TeacherCourseRow>()
            .all(&self.db)
            .await
            .map_err(db_err("Failed to aggregate teacher course counts"))?;
        let rows = rank_by_count(rows, |r| (r.assigned_teacher_id, r.cnt), limit);

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let teachers: HashMap<i64, Teacher> = Teachers::find()
            .filter(Column::Id.is_in(rows.iter().map(|r| r.assigned_teacher_id)))
            .all(&self.db)
            .await
            .map_err(db_err("Failed to query teachers"))?
            .into_iter()
            .map(|m| (m.id, m.into_teacher()))
            .collect();

        // 已删除的教师不出现在排名中
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                teachers
                    .get(&row.assigned_teacher_id)
                    .map(|teacher| TeacherCourseCount {
                        teacher_id: teacher.id,
                        name: teacher.name.clone(),
                        email: teacher.email.clone(),
                        course_count: row.cnt,
                    })
            })
            .collect())
    }
}
