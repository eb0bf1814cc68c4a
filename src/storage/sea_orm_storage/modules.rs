use super::{SeaOrmStorage, db_err};
use crate::entity::modules::{ActiveModel, Column, Entity as Modules};
use crate::errors::Result;
use crate::models::modules::{entities::Module, requests::NewModule};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn list_modules_impl(&self) -> Result<Vec<Module>> {
        let modules = Modules::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list modules"))?;

        Ok(modules.into_iter().map(|m| m.into_module()).collect())
    }

    /// 创建功能模块，重名时返回 Conflict
    pub async fn create_module_impl(&self, module: NewModule) -> Result<Module> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(module.name),
            path: Set(module.path),
            icon: Set(module.icon),
            description: Set(module.description),
            is_active: Set(module.is_active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create module"))?;

        Ok(result.into_module())
    }

    pub async fn count_modules_impl(&self) -> Result<u64> {
        Modules::find()
            .count(&self.db)
            .await
            .map_err(db_err("Failed to count modules"))
    }
}
