use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, teachers::responses::TeacherListResponse};
use crate::services::error_response;

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    match storage.list_teachers(None).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherListResponse { items },
            "Teachers retrieved successfully",
        ))),
        Err(e) => Ok(error_response(request, e)),
    }
}
