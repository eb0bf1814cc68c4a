use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::Method, web};
use once_cell::sync::Lazy;

use super::guarded;
use crate::middlewares::{RequireCapability, RequireSession};
use crate::models::attendance::requests::{
    AttendanceListQuery, DeleteAttendanceRequest, MarkAttendanceRequest, UpdateAttendanceRequest,
};
use crate::models::{modules::entities::FeatureModule, users::entities::PermissionAction};
use crate::services::AttendanceService;

// 懒加载的全局 AttendanceService 实例
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(query.into_inner(), &req)
        .await
}

pub async fn mark_attendance(
    req: HttpRequest,
    mark_data: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .mark_attendance(mark_data.into_inner(), &req)
        .await
}

pub async fn update_attendance(
    req: HttpRequest,
    update_data: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(update_data.into_inner(), &req)
        .await
}

// 请求体可省略，此时按缺少删除目标处理
pub async fn delete_attendance(
    req: HttpRequest,
    delete_data: Option<web::Json<DeleteAttendanceRequest>>,
) -> ActixResult<HttpResponse> {
    let delete_data = delete_data.map(web::Json::into_inner).unwrap_or_default();
    ATTENDANCE_SERVICE.delete_attendance(delete_data, &req).await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    let edit = || RequireCapability::module(FeatureModule::Attendance, PermissionAction::Edit);

    cfg.service(
        web::scope("/api/attendance")
            .wrap(RequireSession)
            .service(guarded(
                "",
                Method::GET,
                RequireCapability::module(FeatureModule::Attendance, PermissionAction::View),
                list_attendance,
            ))
            .service(guarded("", Method::POST, edit(), mark_attendance))
            .service(guarded("", Method::PATCH, edit(), update_attendance))
            .service(guarded(
                "",
                Method::DELETE,
                RequireCapability::module(FeatureModule::Attendance, PermissionAction::Delete),
                delete_attendance,
            )),
    );
}
