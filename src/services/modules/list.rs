use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ModuleService;
use crate::models::{ApiResponse, modules::responses::ModuleListResponse};
use crate::services::error_response;

pub async fn list_modules(
    service: &ModuleService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    match storage.list_modules().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ModuleListResponse { items },
            "Modules retrieved successfully",
        ))),
        Err(e) => Ok(error_response(request, e)),
    }
}
