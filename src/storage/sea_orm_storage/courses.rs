use super::{SeaOrmStorage, db_err};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::teachers::Entity as Teachers;
use crate::errors::Result;
use crate::models::courses::{
    entities::{Course, CourseDetail},
    requests::NewCourse,
};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 创建课程并返回附带教师的详情
    pub async fn create_course_impl(&self, course: NewCourse) -> Result<CourseDetail> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(course.name),
            description: Set(course.description),
            credits: Set(course.credits),
            assigned_teacher_id: Set(course.assigned_teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create course"))?;

        let assigned_teacher = match result.assigned_teacher_id {
            Some(teacher_id) => self.get_teacher_by_id_impl(teacher_id).await?,
            None => None,
        };

        Ok(CourseDetail {
            course: result.into_course(),
            assigned_teacher,
        })
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query course"))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 按创建时间倒序列出课程，附带授课教师
    pub async fn list_course_details_impl(&self) -> Result<Vec<CourseDetail>> {
        let rows = Courses::find()
            .find_also_related(Teachers)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list courses"))?;

        Ok(rows
            .into_iter()
            .map(|(course, teacher)| CourseDetail {
                course: course.into_course(),
                assigned_teacher: teacher.map(|t| t.into_teacher()),
            })
            .collect())
    }

    pub async fn list_courses_impl(&self, limit: Option<u64>) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list courses"))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    pub async fn count_courses_impl(&self) -> Result<u64> {
        Courses::find()
            .count(&self.db)
            .await
            .map_err(db_err("Failed to count courses"))
    }
}
