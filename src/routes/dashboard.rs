use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireCapability, RequireSession};
use crate::models::{modules::entities::FeatureModule, users::entities::PermissionAction};
use crate::services::DashboardService;

// 懒加载的全局 DashboardService 实例
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn get_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.get_overview(&req).await
}

pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/dashboard")
            .wrap(RequireCapability::module(
                FeatureModule::Dashboard,
                PermissionAction::View,
            ))
            .wrap(RequireSession)
            .route("", web::get().to(get_dashboard)),
    );
}
