use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::Method, web};
use once_cell::sync::Lazy;

use super::guarded;
use crate::middlewares::{RequireCapability, RequireSession};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{modules::entities::FeatureModule, users::entities::PermissionAction};
use crate::services::StudentService;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req).await
}

pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(student_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/students")
            .wrap(RequireSession)
            .service(guarded(
                "",
                Method::GET,
                RequireCapability::module(FeatureModule::Students, PermissionAction::View),
                list_students,
            ))
            .service(guarded(
                "",
                Method::POST,
                RequireCapability::module(FeatureModule::Students, PermissionAction::Edit),
                create_student,
            )),
    );
}
