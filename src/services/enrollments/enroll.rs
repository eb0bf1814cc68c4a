use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::future::join_all;
use std::collections::HashSet;
use tracing::debug;

use super::{EnrollmentService, ensure_course_exists, parse_batch};
use crate::errors::SchoolError;
use crate::models::{
    ApiResponse, BulkWriteError, BulkWriteResult, ErrorCode,
    enrollments::{requests::EnrollStudentsRequest, responses::EnrollStudentsResponse},
};
use crate::services::{error_response, error_response_with_code};

pub async fn enroll_students(
    service: &EnrollmentService,
    enroll_data: EnrollStudentsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (course_id, student_ids) = match parse_batch(&enroll_data.course, &enroll_data.students) {
        Ok(batch) => batch,
        Err(e) => return Ok(error_response_with_code(request, e, ErrorCode::EnrollmentInvalid)),
    };

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    if let Err(e) = ensure_course_exists(&storage, course_id).await {
        return Ok(match e {
            SchoolError::NotFound(_) => {
                error_response_with_code(request, e, ErrorCode::CourseNotFound)
            }
            other => error_response(request, other),
        });
    }

    let known: HashSet<i64> = match storage.existing_student_ids(&student_ids).await {
        Ok(ids) => ids.into_iter().collect(),
        Err(e) => return Ok(error_response(request, e)),
    };

    // 无序批量写：每条独立执行，失败逐条记录
    let writes = student_ids.iter().enumerate().map(|(index, &student_id)| {
        let storage = storage.clone();
        let known = known.contains(&student_id);
        async move {
            if !known {
                return Err(BulkWriteError {
                    index,
                    student_id,
                    message: "Student not found".to_string(),
                });
            }
            storage
                .upsert_enrollment(course_id, student_id)
                .await
                .map_err(|e| BulkWriteError {
                    index,
                    student_id,
                    message: e.message().to_string(),
                })
        }
    });

    let mut result = BulkWriteResult {
        requested: student_ids.len(),
        ..Default::default()
    };
    for outcome in join_all(writes).await {
        match outcome {
            Ok(()) => result.succeeded += 1,
            Err(write_error) => result.write_errors.push(write_error),
        }
    }
    debug!(
        "Enrolled {}/{} students into course {}",
        result.succeeded, result.requested, course_id
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        EnrollStudentsResponse { result },
        "Students enrolled",
    )))
}
