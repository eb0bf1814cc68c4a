use super::dashboard::rank_by_count;
use super::{SeaOrmStorage, db_err};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::Result;
use crate::models::courses::entities::Course;
use crate::models::dashboard::responses::TopCourse;
use crate::models::enrollments::entities::EnrollmentDetail;
use crate::models::students::entities::Student;
use sea_orm::sea_query::{Expr, Func, OnConflict};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::collections::HashMap;

#[derive(Debug, FromQueryResult)]
struct CourseEnrollmentRow {
    course_id: i64,
    cnt: i64,
}

impl SeaOrmStorage {
    /// 列出选课记录并填充学生与课程
    pub async fn list_enrollments_impl(
        &self,
        course_id: Option<i64>,
        include_inactive: bool,
    ) -> Result<Vec<EnrollmentDetail>> {
        let mut select = Enrollments::find();
        if let Some(course_id) = course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if !include_inactive {
            select = select.filter(Column::Active.eq(true));
        }

        let rows = select
            .order_by_desc(Column::EnrolledAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list enrollments"))?;

        let students = self
            .students_by_ids(rows.iter().map(|r| r.student_id).collect())
            .await?;
        let courses = self
            .courses_by_ids(rows.iter().map(|r| r.course_id).collect())
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| EnrollmentDetail {
                student: students.get(&row.student_id).cloned(),
                course: courses.get(&row.course_id).cloned(),
                enrollment: row.into_enrollment(),
            })
            .collect())
    }

    /// 按 (student, course) upsert：已存在则重新激活并刷新选课时间
    pub async fn upsert_enrollment_impl(&self, course_id: i64, student_id: i64) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            active: Set(true),
            enrolled_at: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Enrollments::insert(model)
            .on_conflict(
                OnConflict::columns([Column::StudentId, Column::CourseId])
                    .update_columns([Column::Active, Column::EnrolledAt, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err("Failed to upsert enrollment"))?;

        Ok(())
    }

    /// 软删除
    pub async fn deactivate_enrollments_impl(
        &self,
        course_id: i64,
        student_ids: &[i64],
    ) -> Result<u64> {
        let now = chrono::Utc::now().timestamp();

        let result = Enrollments::update_many()
            .col_expr(Column::Active, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::StudentId.is_in(student_ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to deactivate enrollments"))?;

        Ok(result.rows_affected)
    }

    /// 硬删除
    pub async fn delete_enrollments_impl(
        &self,
        course_id: i64,
        student_ids: &[i64],
    ) -> Result<u64> {
        let result = Enrollments::delete_many()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::StudentId.is_in(student_ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete enrollments"))?;

        Ok(result.rows_affected)
    }

    pub async fn count_active_enrollments_impl(&self) -> Result<u64> {
        Enrollments::find()
            .filter(Column::Active.eq(true))
            .count(&self.db)
            .await
            .map_err(db_err("Failed to count enrollments"))
    }

    /// 按有效选课数倒序排名课程
    pub async fn top_courses_by_enrollment_impl(&self, limit: u64) -> Result<Vec<TopCourse>> {
        let rows = Enrollments::find()
            .select_only()
            .column(Column::CourseId)
            .column_as(Expr::expr(Func::count(Expr::col(Column::Id))), "cnt")
            .filter(Column::Active.eq(true))
            .group_by(Column::CourseId)
            .into_model::<CourseEnrollmentRow>()
            .all(&self.db)
            .await
            .map_err(db_err("Failed to aggregate enrollments"))?;
        let rows = rank_by_count(rows, |r| (r.course_id, r.cnt), limit);

        let courses = self
            .courses_by_ids(rows.iter().map(|r| r.course_id).collect())
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                courses.get(&row.course_id).map(|course| TopCourse {
                    course_id: course.id,
                    name: course.name.clone(),
                    count: row.cnt,
                })
            })
            .collect())
    }

    /// 批量加载学生
    pub(crate) async fn students_by_ids(&self, mut ids: Vec<i64>) -> Result<HashMap<i64, Student>> {
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        Ok(Students::find()
            .filter(StudentColumn::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(db_err("Failed to load students"))?
            .into_iter()
            .map(|m| (m.id, m.into_student()))
            .collect())
    }

    /// 批量加载课程
    pub(crate) async fn courses_by_ids(&self, mut ids: Vec<i64>) -> Result<HashMap<i64, Course>> {
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        Ok(Courses::find()
            .filter(CourseColumn::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(db_err("Failed to load courses"))?
            .into_iter()
            .map(|m| (m.id, m.into_course()))
            .collect())
    }
}
