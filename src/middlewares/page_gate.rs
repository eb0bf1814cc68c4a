/*!
 * 页面访问门禁
 *
 * 包裹前端页面路由（不作用于 `/api`）。规则：
 * - 静态资源直接放行
 * - `/login`：已登录时按角色跳转到落地页
 * - `/admin*`：未登录跳转登录页，非管理员跳转首页
 * - 其余页面：未登录跳转登录页并带上 `callbackUrl`
 *
 * 所有跳转均为 307。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::LOCATION,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::debug;

use crate::models::auth::entities::SessionUser;
use crate::models::users::entities::UserRole;
use crate::utils::jwt::JwtUtils;

const STATIC_PREFIXES: [&str; 4] = ["/assets", "/static", "/favicon", "/_next"];
const API_PREFIX: &str = "/api/";
const LOGIN_PATH: &str = "/login";
const ADMIN_PREFIX: &str = "/admin";
const ADMIN_LANDING: &str = "/admin/dashboard";
const HOME: &str = "/";

/// 门禁判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(String),
}

fn login_redirect(path: &str) -> GateDecision {
    let callback: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
    GateDecision::Redirect(format!("{LOGIN_PATH}?callbackUrl={callback}"))
}

/// 根据路径与会话决定放行或跳转
pub fn decide(path: &str, user: Option<&SessionUser>) -> GateDecision {
    if STATIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) || path.starts_with(API_PREFIX)
    {
        return GateDecision::Allow;
    }

    if path == LOGIN_PATH {
        return match user {
            Some(user) if user.role == UserRole::Admin => {
                GateDecision::Redirect(ADMIN_LANDING.to_string())
            }
            Some(_) => GateDecision::Redirect(HOME.to_string()),
            None => GateDecision::Allow,
        };
    }

    if path.starts_with(ADMIN_PREFIX) {
        return match user {
            None => login_redirect(path),
            Some(user) if user.role != UserRole::Admin => GateDecision::Redirect(HOME.to_string()),
            Some(_) => GateDecision::Allow,
        };
    }

    match user {
        Some(_) => GateDecision::Allow,
        None => login_redirect(path),
    }
}

#[derive(Clone)]
pub struct PageGate;

impl<S, B> Transform<S, ServiceRequest> for PageGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = PageGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PageGateMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct PageGateMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for PageGateMiddleware<S>
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
            let user = JwtUtils::session_user(req.request());

            match decide(req.path(), user.as_ref()) {
                GateDecision::Allow => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                GateDecision::Redirect(location) => {
                    debug!("Page gate redirect {} -> {}", req.path(), location);
                    Ok(req.into_response(
                        HttpResponse::TemporaryRedirect()
                            .insert_header((LOCATION, location))
                            .finish()
                            .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: UserRole) -> SessionUser {
        SessionUser {
            id: 1,
            username: "user1".to_string(),
            email: "user1@school.test".to_string(),
            role,
            is_active: true,
            permissions: vec![],
        }
    }

    #[test]
    fn test_static_assets_are_allowed() {
        assert_eq!(decide("/assets/app.js", None), GateDecision::Allow);
        assert_eq!(decide("/favicon.ico", None), GateDecision::Allow);
        assert_eq!(decide("/_next/static/chunk.js", None), GateDecision::Allow);
    }

    #[test]
    fn test_unknown_api_paths_are_not_redirected() {
        assert_eq!(decide("/api/unknown", None), GateDecision::Allow);
    }

    #[test]
    fn test_unauthenticated_page_redirects_to_login() {
        assert_eq!(
            decide("/students", None),
            GateDecision::Redirect("/login?callbackUrl=%2Fstudents".to_string())
        );
        assert_eq!(
            decide("/admin/users", None),
            GateDecision::Redirect("/login?callbackUrl=%2Fadmin%2Fusers".to_string())
        );
    }

    #[test]
    fn test_login_page() {
        assert_eq!(decide("/login", None), GateDecision::Allow);
        assert_eq!(
            decide("/login", Some(&session(UserRole::Admin))),
            GateDecision::Redirect("/admin/dashboard".to_string())
        );
        assert_eq!(
            decide("/login", Some(&session(UserRole::Teacher))),
            GateDecision::Redirect("/".to_string())
        );
    }

    #[test]
    fn test_admin_prefix_requires_admin() {
        assert_eq!(
            decide("/admin/dashboard", Some(&session(UserRole::Student))),
            GateDecision::Redirect("/".to_string())
        );
        assert_eq!(
            decide("/admin/dashboard", Some(&session(UserRole::Admin))),
            GateDecision::Allow
        );
    }

    #[test]
    fn test_authenticated_pages_are_allowed() {
        assert_eq!(
            decide("/attendance", Some(&session(UserRole::Teacher))),
            GateDecision::Allow
        );
    }
}
