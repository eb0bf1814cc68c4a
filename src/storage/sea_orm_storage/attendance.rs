use super::{SeaOrmStorage, db_err};
use crate::entity::attendance::{ActiveModel, Column, Entity as AttendanceEntity};
use crate::errors::Result;
use crate::models::attendance::{
    entities::{Attendance, AttendanceDetail, AttendanceMark, AttendanceStatus},
    requests::AttendanceFilter,
};
use crate::utils::dates::SECONDS_PER_DAY;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 分页列出考勤记录，按日期倒序
    pub async fn list_attendance_impl(
        &self,
        filter: AttendanceFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<AttendanceDetail>, u64)> {
        let mut select = AttendanceEntity::find();

        if let Some(course_id) = filter.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(student_id) = filter.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(from) = filter.date_from {
            select = select.filter(Column::Date.gte(from));
        }
        if let Some(to) = filter.date_to {
            select = select.filter(Column::Date.lte(to));
        }

        let paginator = select
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id)
            .paginate(&self.db, page_size);

        let total = paginator
            .num_items()
            .await
            .map_err(db_err("Failed to count attendance"))?;

        // 超出末页时直接返回空页
        let page_index = page.saturating_sub(1);
        let past_end = page_index
            .checked_mul(page_size)
            .is_none_or(|offset| offset >= total);
        if past_end {
            return Ok((Vec::new(), total));
        }

        let rows = paginator
            .fetch_page(page_index)
            .await
            .map_err(db_err("Failed to list attendance"))?;

        let items = self.attach_references(rows).await?;
        Ok((items, total))
    }

    /// 按 (student, course, date) upsert，重复标记覆盖状态与备注
    pub async fn upsert_attendance_impl(&self, mark: AttendanceMark) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(mark.student_id),
            course_id: Set(mark.course_id),
            date: Set(mark.date.timestamp()),
            status: Set(mark.status.to_string()),
            remarks: Set(mark.remarks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        AttendanceEntity::insert(model)
            .on_conflict(
                OnConflict::columns([Column::StudentId, Column::CourseId, Column::Date])
                    .update_columns([Column::Status, Column::Remarks, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err("Failed to upsert attendance"))?;

        Ok(())
    }

    pub async fn get_attendance_by_id_impl(&self, id: i64) -> Result<Option<Attendance>> {
        let result = AttendanceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query attendance"))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    /// 更新单条记录，不存在时返回 None
    pub async fn update_attendance_impl(
        &self,
        id: i64,
        status: Option<AttendanceStatus>,
        remarks: Option<Option<String>>,
    ) -> Result<Option<Attendance>> {
        let Some(existing) = AttendanceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query attendance"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(status) = status {
            model.status = Set(status.to_string());
        }
        if let Some(remarks) = remarks {
            model.remarks = Set(remarks);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update attendance"))?;

        Ok(Some(updated.into_attendance()))
    }

    pub async fn delete_attendance_by_id_impl(&self, id: i64) -> Result<bool> {
        let result = AttendanceEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete attendance"))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除某课程某一天的全部考勤
    pub async fn delete_attendance_for_day_impl(
        &self,
        course_id: i64,
        day_start: i64,
    ) -> Result<u64> {
        let result = AttendanceEntity::delete_many()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Date.between(day_start, day_start + SECONDS_PER_DAY - 1))
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete attendance"))?;

        Ok(result.rows_affected)
    }

    pub async fn count_attendance_impl(&self) -> Result<u64> {
        AttendanceEntity::find()
            .count(&self.db)
            .await
            .map_err(db_err("Failed to count attendance"))
    }

    /// 最近写入的考勤，附带学生与课程
    pub async fn list_recent_attendance_impl(&self, limit: u64) -> Result<Vec<AttendanceDetail>> {
        let rows = AttendanceEntity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list attendance"))?;

        self.attach_references(rows).await
    }

    async fn attach_references(
        &self,
        rows: Vec<crate::entity::attendance::Model>,
    ) -> Result<Vec<AttendanceDetail>> {
        let students = self
            .students_by_ids(rows.iter().map(|r| r.student_id).collect())
            .await?;
        let courses = self
            .courses_by_ids(rows.iter().map(|r| r.course_id).collect())
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| AttendanceDetail {
                student: students.get(&row.student_id).cloned(),
                course: courses.get(&row.course_id).cloned(),
                attendance: row.into_attendance(),
            })
            .collect())
    }
}
