use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EnrollmentService, ensure_course_exists, parse_batch};
use crate::errors::SchoolError;
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::{requests::RemoveEnrollmentsRequest, responses::RemoveEnrollmentsResponse},
};
use crate::services::{error_response, error_response_with_code};

pub async fn remove_enrollments(
    service: &EnrollmentService,
    remove_data: RemoveEnrollmentsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (course_id, student_ids) = match parse_batch(&remove_data.course, &remove_data.students) {
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

    let outcome = if remove_data.hard {
        storage.delete_enrollments(course_id, &student_ids).await
    } else {
        storage.deactivate_enrollments(course_id, &student_ids).await
    };

    match outcome {
        Ok(affected) => {
            info!(
                "Removed {} enrollments from course {} (hard: {})",
                affected, course_id, remove_data.hard
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                RemoveEnrollmentsResponse {
                    affected,
                    hard: remove_data.hard,
                },
                "Enrollments removed",
            )))
        }
        Err(e) => Ok(error_response(request, e)),
    }
}
