use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::errors::SchoolError;
use crate::models::{
    ApiResponse,
    enrollments::{requests::EnrollmentListQuery, responses::EnrollmentListResponse},
};
use crate::services::error_response;
use crate::utils::ids::parse_id_str;

pub async fn list_enrollments(
    service: &EnrollmentService,
    query: EnrollmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let course_id = match query.course.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match parse_id_str(raw) {
            Some(id) => Some(id),
            None => {
                return Ok(error_response(
                    request,
                    SchoolError::validation("Invalid course id"),
                ));
            }
        },
    };

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    match storage
        .list_enrollments(course_id, query.include_inactive)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EnrollmentListResponse { items },
            "Enrollments retrieved successfully",
        ))),
        Err(e) => Ok(error_response(request, e)),
    }
}
