use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireSession;
use crate::models::{ApiResponse, ErrorCode, auth::responses::SessionResponse};

pub async fn handle_session(request: &HttpRequest) -> ActixResult<HttpResponse> {
    match RequireSession::extract_session_user(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SessionResponse { user },
            "Session is valid",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Not authenticated",
        ))),
    }
}
