use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::Method, web};
use once_cell::sync::Lazy;

use super::guarded;
use crate::middlewares::{RequireCapability, RequireSession};
use crate::models::enrollments::requests::{
    EnrollStudentsRequest, EnrollmentListQuery, RemoveEnrollmentsRequest,
};
use crate::models::{modules::entities::FeatureModule, users::entities::PermissionAction};
use crate::services::EnrollmentService;

// 懒加载的全局 EnrollmentService 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn list_enrollments(
    req: HttpRequest,
    query: web::Query<EnrollmentListQuery>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_enrollments(query.into_inner(), &req)
        .await
}

pub async fn enroll_students(
    req: HttpRequest,
    enroll_data: web::Json<EnrollStudentsRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .enroll_students(enroll_data.into_inner(), &req)
        .await
}

pub async fn remove_enrollments(
    req: HttpRequest,
    remove_data: web::Json<RemoveEnrollmentsRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .remove_enrollments(remove_data.into_inner(), &req)
        .await
}

// 选课归属课程模块的权限
pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/enrollments")
            .wrap(RequireSession)
            .service(guarded(
                "",
                Method::GET,
                RequireCapability::module(FeatureModule::Courses, PermissionAction::View),
                list_enrollments,
            ))
            .service(guarded(
                "",
                Method::POST,
                RequireCapability::module(FeatureModule::Courses, PermissionAction::Edit),
                enroll_students,
            ))
            .service(guarded(
                "",
                Method::DELETE,
                RequireCapability::module(FeatureModule::Courses, PermissionAction::Delete),
                remove_enrollments,
            )),
    );
}
