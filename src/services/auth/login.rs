use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::AuthService;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{entities::SessionUser, requests::LoginRequest, responses::LoginResponse},
};
use crate::services::error_response;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        INVALID_CREDENTIALS,
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    let identifier = login_request.identifier.trim();
    if identifier.is_empty() || login_request.password.is_empty() {
        return Ok(invalid_credentials());
    }

    // 1. 按用户名或邮箱查找账号
    let user = match storage.get_user_by_identifier(identifier).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(invalid_credentials()),
        Err(e) => return Ok(error_response(request, e)),
    };

    // 2. 停用账号与密码错误返回相同信息
    if !user.is_active || !verify_password(&login_request.password, &user.password_hash) {
        info!("Rejected login for {}", identifier);
        return Ok(invalid_credentials());
    }

    // 3. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    // 4. 签发会话令牌
    let session_user = SessionUser::from(&user);
    match JwtUtils::generate_session_token(&session_user) {
        Ok(token) => {
            info!("User {} logged in successfully", user.username);
            let cookie = JwtUtils::create_session_cookie(&token);
            let response = LoginResponse {
                token,
                expires_in: JwtUtils::session_expiry().num_seconds(),
                user: session_user,
            };
            Ok(HttpResponse::Ok()
                .cookie(cookie)
                .json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            error!("Failed to generate session token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}
