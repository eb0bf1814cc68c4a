use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::SchoolError;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        requests::{UpdatePermissionsRequest, UserChanges},
        responses::UserResponse,
    },
};
use crate::services::{error_response, error_response_with_code};
use crate::utils::ids::parse_record_id;

pub async fn update_permissions(
    service: &UserService,
    permissions_data: UpdatePermissionsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (Some(user_id), Some(permissions)) = (
        parse_record_id(&permissions_data.user_id),
        permissions_data.permissions,
    ) else {
        return Ok(error_response(
            request,
            SchoolError::validation("Invalid payload: userId and permissions are required"),
        ));
    };

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    let changes = UserChanges {
        permissions: Some(permissions),
        ..Default::default()
    };
    match storage.update_user(user_id, changes).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "Permissions updated successfully",
        ))),
        Ok(None) => Ok(error_response_with_code(
            request,
            SchoolError::not_found("User not found"),
            ErrorCode::UserNotFound,
        )),
        Err(e) => Ok(error_response(request, e)),
    }
}
