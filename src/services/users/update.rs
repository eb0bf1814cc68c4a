use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::SchoolError;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        requests::{UpdateUserRequest, UserChanges},
        responses::UserResponse,
    },
};
use crate::services::{error_response, error_response_with_code};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_username};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut changes = UserChanges {
        role: update_data.role,
        is_active: update_data.is_active,
        permissions: update_data.permissions,
        ..Default::default()
    };

    if let Some(username) = update_data.username.map(|u| u.trim().to_string()) {
        if let Err(msg) = validate_username(&username) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
        }
        changes.username = Some(username);
    }

    if let Some(email) = update_data.email.map(|e| e.trim().to_lowercase()) {
        if let Err(msg) = validate_email(&email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
        }
        changes.email = Some(email);
    }

    // 空密码视为不修改
    if let Some(password) = update_data.password.filter(|p| !p.is_empty()) {
        match hash_password(&password) {
            Ok(hash) => changes.password_hash = Some(hash),
            Err(e) => return Ok(error_response(request, e)),
        }
    }

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    match storage.update_user(user_id, changes).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "User updated successfully",
        ))),
        Ok(None) => Ok(error_response_with_code(
            request,
            SchoolError::not_found("User not found"),
            ErrorCode::UserNotFound,
        )),
        Err(SchoolError::Conflict(_)) => Ok(error_response_with_code(
            request,
            SchoolError::conflict("Username or email already exists"),
            ErrorCode::UserAlreadyExists,
        )),
        Err(e) => Ok(error_response(request, e)),
    }
}
