use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireCapability, RequireSession};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{
    CreateUserRequest, UpdatePermissionsRequest, UpdateUserRequest,
};
use crate::services::UserService;
use crate::utils::SafeIDI64;

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

// HTTP处理程序
pub async fn list_users(req: HttpRequest) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(&req).await
}

pub async fn create_user(
    req: HttpRequest,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(user_data.into_inner(), &req).await
}

pub async fn update_user(
    req: HttpRequest,
    user_id: SafeIDI64,
    update_data: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(user_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_user(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(user_id.0, &req).await
}

pub async fn update_permissions(
    req: HttpRequest,
    permissions_data: web::Json<UpdatePermissionsRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_permissions(permissions_data.into_inner(), &req)
        .await
}

// 配置路由：全部仅限管理员
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .wrap(RequireCapability::role(UserRole::Admin))
            .wrap(RequireSession)
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/permissions", web::post().to(update_permissions))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}
