use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::Method, web};
use once_cell::sync::Lazy;

use super::guarded;
use crate::middlewares::{RequireCapability, RequireSession};
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{modules::entities::FeatureModule, users::entities::PermissionAction};
use crate::services::CourseService;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(course_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/courses")
            .wrap(RequireSession)
            .service(guarded(
                "",
                Method::GET,
                RequireCapability::module(FeatureModule::Courses, PermissionAction::View),
                list_courses,
            ))
            .service(guarded(
                "",
                Method::POST,
                RequireCapability::module(FeatureModule::Courses, PermissionAction::Edit),
                create_course,
            )),
    );
}
