use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    if let Some(user) = JwtUtils::session_user(request) {
        tracing::info!("User {} logged out", user.username);
    }

    // 清除会话 Cookie
    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_session_cookie())
        .json(ApiResponse::<()>::success_empty("Logged out successfully")))
}
