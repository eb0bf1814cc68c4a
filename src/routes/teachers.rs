use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::Method, web};
use once_cell::sync::Lazy;

use super::guarded;
use crate::middlewares::{RequireCapability, RequireSession};
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::models::{modules::entities::FeatureModule, users::entities::PermissionAction};
use crate::services::TeacherService;

// 懒加载的全局 TeacherService 实例
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

pub async fn list_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_teachers(&req).await
}

pub async fn create_teacher(
    req: HttpRequest,
    teacher_data: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .create_teacher(teacher_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/teachers")
            .wrap(RequireSession)
            .service(guarded(
                "",
                Method::GET,
                RequireCapability::module(FeatureModule::Teachers, PermissionAction::View),
                list_teachers,
            ))
            .service(guarded(
                "",
                Method::POST,
                RequireCapability::module(FeatureModule::Teachers, PermissionAction::Edit),
                create_teacher,
            )),
    );
}
