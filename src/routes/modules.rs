use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::Method, web};
use once_cell::sync::Lazy;

use super::guarded;
use crate::middlewares::{RequireCapability, RequireSession};
use crate::models::modules::requests::CreateModuleRequest;
use crate::models::users::entities::UserRole;
use crate::services::ModuleService;

// 懒加载的全局 ModuleService 实例
static MODULE_SERVICE: Lazy<ModuleService> = Lazy::new(ModuleService::new_lazy);

pub async fn list_modules(req: HttpRequest) -> ActixResult<HttpResponse> {
    MODULE_SERVICE.list_modules(&req).await
}

pub async fn create_module(
    req: HttpRequest,
    module_data: web::Json<CreateModuleRequest>,
) -> ActixResult<HttpResponse> {
    MODULE_SERVICE
        .create_module(module_data.into_inner(), &req)
        .await
}

pub fn configure_module_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/modules")
            .wrap(RequireSession)
            .service(guarded(
                "",
                Method::GET,
                RequireCapability::authenticated(),
                list_modules,
            ))
            .service(guarded(
                "",
                Method::POST,
                RequireCapability::role(UserRole::Admin),
                create_module,
            )),
    );
}
