/*!
 * 统一的授权检查中间件
 *
 * 必须在 RequireSession 之后执行（actix 中后 `.wrap` 的先执行）。每个受保护
 * 路由声明一个 `Capability`，由 `SessionUser::satisfies` 统一判定：
 *
 * ```rust,ignore
 * web::resource("")
 *     .guard(guard::Get())
 *     .route(web::get().to(list_students))
 *     .wrap(RequireCapability::module(FeatureModule::Students, PermissionAction::View))
 * ```
 *
 * 缺少会话返回 401，能力不足返回 403。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use super::create_error_response;
use crate::models::{
    ErrorCode,
    auth::entities::{Capability, SessionUser},
    modules::entities::FeatureModule,
    users::entities::{PermissionAction, UserRole},
};

#[derive(Clone)]
pub struct RequireCapability {
    capability: Capability,
}

impl RequireCapability {
    pub fn new(capability: Capability) -> Self {
        Self { capability }
    }

    /// 任意已登录用户
    pub fn authenticated() -> Self {
        Self::new(Capability::Authenticated)
    }

    /// 指定角色（管理员总是通过）
    pub fn role(role: UserRole) -> Self {
        Self::new(Capability::Role(role))
    }

    /// 功能模块上的动作
    pub fn module(module: FeatureModule, action: PermissionAction) -> Self {
        Self::new(Capability::module(module, action))
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireCapability
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireCapabilityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireCapabilityMiddleware {
            service: Rc::new(service),
            capability: self.capability,
        }))
    }
}

pub struct RequireCapabilityMiddleware<S> {
    service: Rc<S>,
    capability: Capability,
}

impl<S, B> Service<ServiceRequest> for RequireCapabilityMiddleware<S>
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
        let capability = self.capability;

        Box::pin(async move {
            let user = req.extensions().get::<SessionUser>().cloned();

            match user {
                Some(user) if user.satisfies(&capability) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(user) => {
                    info!(
                        "User {} lacks capability {} for {} {}",
                        user.id,
                        capability,
                        req.method(),
                        req.path()
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Forbidden: insufficient permissions",
                        )
                        .map_into_right_body(),
                    ))
                }
                None => Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Unauthorized: missing session",
                    )
                    .map_into_right_body(),
                )),
            }
        })
    }
}
