use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::errors::SchoolError;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        requests::{CreateUserRequest, NewUser},
        responses::UserResponse,
    },
};
use crate::services::{error_response, error_response_with_code};
use crate::utils::password::hash_password;
use crate::utils::validate::{require_non_empty, validate_email, validate_username};

pub async fn create_user(
    service: &UserService,
    user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let username = match require_non_empty(user_data.username.as_deref(), "username") {
        Ok(username) => username,
        Err(e) => return Ok(error_response(request, e)),
    };
    // 验证用户名
    if let Err(msg) = validate_username(&username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    let email = match require_non_empty(user_data.email.as_deref(), "email") {
        Ok(email) => email.to_lowercase(),
        Err(e) => return Ok(error_response(request, e)),
    };
    // 验证邮箱
    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    let Some(role) = user_data.role else {
        return Ok(error_response(request, SchoolError::validation("role is required")));
    };

    let password = match user_data.password.as_deref() {
        Some(password) if !password.is_empty() => password,
        _ => {
            return Ok(error_response(
                request,
                SchoolError::validation("password is required"),
            ));
        }
    };
    let password_hash = match hash_password(password) {
        Ok(hash) => hash,
        Err(e) => return Ok(error_response(request, e)),
    };

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    let new_user = NewUser {
        username,
        email,
        password_hash,
        role,
        is_active: user_data.is_active.unwrap_or(true),
        permissions: user_data.permissions,
    };

    match storage.create_user(new_user).await {
        Ok(user) => {
            info!("Created {} account {}", user.role, user.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse { user },
                "User created successfully",
            )))
        }
        Err(SchoolError::Conflict(_)) => Ok(error_response_with_code(
            request,
            SchoolError::conflict("Username or email already exists"),
            ErrorCode::UserAlreadyExists,
        )),
        Err(e) => Ok(error_response(request, e)),
    }
}
