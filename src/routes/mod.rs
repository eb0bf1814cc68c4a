pub mod attendance;

pub mod auth;

pub mod courses;

pub mod dashboard;

pub mod enrollments;

pub mod frontend;

pub mod modules;

pub mod students;

pub mod teachers;

pub mod users;

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use dashboard::configure_dashboard_routes;
pub use enrollments::configure_enrollment_routes;
pub use frontend::configure_frontend_routes;
pub use modules::configure_module_routes;
pub use students::configure_student_routes;
pub use teachers::configure_teacher_routes;
pub use users::configure_user_routes;

use actix_web::{
    FromRequest, Handler, Responder,
    dev::HttpServiceFactory,
    guard,
    http::Method,
    web,
};

use crate::middlewares::RequireCapability;

/// 单一方法的资源，附带该方法所需的授权能力
///
/// 同一路径下按方法拆分成多个资源，由方法守卫选择，
/// 从而每个方法可以声明不同的能力。
pub(crate) fn guarded<F, Args>(
    path: &str,
    method: Method,
    capability: RequireCapability,
    handler: F,
) -> impl HttpServiceFactory
where
    F: Handler<Args>,
    Args: FromRequest + 'static,
    F::Output: Responder + 'static,
{
    web::resource(path)
        .guard(guard::Method(method.clone()))
        .route(web::method(method).to(handler))
        .wrap(capability)
}

/// 配置全部 API 路由（前端路由需最后单独注册）
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    configure_auth_routes(cfg);
    configure_student_routes(cfg);
    configure_teacher_routes(cfg);
    configure_course_routes(cfg);
    configure_enrollment_routes(cfg);
    configure_attendance_routes(cfg);
    configure_dashboard_routes(cfg);
    configure_user_routes(cfg);
    configure_module_routes(cfg);
}
