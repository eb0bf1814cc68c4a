use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::SchoolError;
use crate::middlewares::RequireSession;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, error_response_with_code};

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 不允许删除自己
    if RequireSession::extract_user_id(request) == Some(user_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CanNotDeleteCurrentUser,
            "You cannot delete your own account",
        )));
    }

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    match storage.delete_user(user_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "User deleted successfully",
        ))),
        Ok(false) => Ok(error_response_with_code(
            request,
            SchoolError::not_found("User not found"),
            ErrorCode::UserNotFound,
        )),
        Err(e) => Ok(error_response(request, e)),
    }
}
