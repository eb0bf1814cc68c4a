/*!
 * 会话认证中间件
 *
 * 从 `Authorization: Bearer <token>` 或会话 Cookie 中读取 JWT，验证通过后
 * 重新加载账号，把最新的 `SessionUser` 放入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/students")
 *     .wrap(RequireCapability::new(Capability::module(FeatureModule::Students, PermissionAction::View)))
 *     .wrap(RequireSession)
 * ```
 *
 * 令牌无效、账号不存在或已停用时返回 401。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info};

use super::create_error_response;
use crate::models::ErrorCode;
use crate::models::auth::entities::SessionUser;
use crate::storage::StorageContext;
use crate::utils::jwt::JwtUtils;

#[derive(Clone)]
pub struct RequireSession;

// 辅助函数：提取并验证会话
async fn extract_and_validate_session(req: &ServiceRequest) -> Result<SessionUser, String> {
    let token = JwtUtils::extract_token(req.request())
        .ok_or_else(|| "Missing session token".to_string())?;

    let claims = JwtUtils::verify_session_token(&token).map_err(|err| {
        info!("Session token validation failed: {}", err);
        "Invalid or expired session".to_string()
    })?;

    // 未配置数据库时只能信任令牌内容，存储相关的处理器随后会返回配置错误
    let storage = match req.app_data::<web::Data<StorageContext>>() {
        Some(context) if context.is_configured() => context.get().map_err(|e| e.to_string())?,
        _ => return Ok(claims.user),
    };

    let user = storage
        .get_user_by_id(claims.user.id)
        .await
        .map_err(|e| format!("Failed to load session user: {e}"))?
        .ok_or_else(|| "User not found".to_string())?;

    if !user.is_active {
        return Err("User is not active".to_string());
    }

    Ok(SessionUser::from(&user))
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_session(&req).await {
                Ok(user) => {
                    debug!("Session authenticated for user ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "Session authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取会话信息
impl RequireSession {
    /// 从请求扩展中提取会话用户
    /// 此函数应该在应用了 RequireSession 中间件的路由处理程序中使用
    pub fn extract_session_user(req: &HttpRequest) -> Option<SessionUser> {
        req.extensions().get::<SessionUser>().cloned()
    }

    /// 从请求扩展中提取用户ID
    pub fn extract_user_id(req: &HttpRequest) -> Option<i64> {
        req.extensions().get::<SessionUser>().map(|user| user.id)
    }
}
