pub mod enroll;
pub mod list;
pub mod remove;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use std::sync::Arc;

use crate::errors::{Result, SchoolError};
use crate::models::enrollments::requests::{
    EnrollStudentsRequest, EnrollmentListQuery, RemoveEnrollmentsRequest,
};
use crate::storage::Storage;
use crate::utils::ids::{collect_valid_ids, parse_record_id};

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_enrollments(
        &self,
        query: EnrollmentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_enrollments(self, query, request).await
    }

    // 批量选课
    pub async fn enroll_students(
        &self,
        enroll_data: EnrollStudentsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll_students(self, enroll_data, request).await
    }

    // 批量退课：hard 为 true 时物理删除
    pub async fn remove_enrollments(
        &self,
        remove_data: RemoveEnrollmentsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        remove::remove_enrollments(self, remove_data, request).await
    }
}

/// 解析课程 id 与学生 id 列表，学生 id 中的非法项被丢弃
pub(crate) fn parse_batch(course: &Value, students: &[Value]) -> Result<(i64, Vec<i64>)> {
    let course_id =
        parse_record_id(course).ok_or_else(|| SchoolError::validation("Invalid course id"))?;
    let student_ids = collect_valid_ids(students);
    if student_ids.is_empty() {
        return Err(SchoolError::validation("No valid student ids provided"));
    }
    Ok((course_id, student_ids))
}

/// 课程必须存在
pub(crate) async fn ensure_course_exists(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<()> {
    match storage.get_course_by_id(course_id).await? {
        Some(_) => Ok(()),
        None => Err(SchoolError::not_found("Course not found")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_batch_drops_malformed_ids() {
        let students = [json!("7"), json!("not-an-id"), json!(7), json!(9)];
        let (course, students) = parse_batch(&json!("4"), &students).unwrap();
        assert_eq!(course, 4);
        assert_eq!(students, vec![7, 9]);
    }

    #[test]
    fn test_parse_batch_requires_a_valid_id() {
        let err = parse_batch(&json!(4), &[json!("nope")]).unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));
        let err = parse_batch(&json!("course"), &[json!(1)]).unwrap_err();
        assert_eq!(err.message(), "Invalid course id");
    }
}
