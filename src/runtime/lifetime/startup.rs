use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::modules::{entities::FeatureModule, requests::NewModule};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::NewUser;
use crate::storage::{Storage, StorageContext, create_storage_context};
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct StartupContext {
    pub storage: StorageContext,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 功能模块表为空时写入默认模块
pub async fn seed_modules(storage: &Arc<dyn Storage>) -> Result<usize> {
    let count = storage.count_modules().await?;
    if count > 0 {
        debug!("Database already has {} module(s), skipping module seed", count);
        return Ok(0);
    }

    for module in FeatureModule::ALL {
        storage
            .create_module(NewModule {
                name: module.as_str().to_string(),
                path: module.path().to_string(),
                icon: Some(module.icon().to_string()),
                description: Some(module.description().to_string()),
                is_active: true,
            })
            .await?;
    }
    info!("Seeded {} default feature modules", FeatureModule::ALL.len());
    Ok(FeatureModule::ALL.len())
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何用户，则创建一个 admin 账号
async fn seed_admin(storage: &Arc<dyn Storage>) {
    // 检查是否已有用户
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| {
            let pwd = generate_random_password(16);
            warn!("==========================================================");
            warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
            warn!("  Generated admin password: {}", pwd);
            warn!("  Please save this password or set ADMIN_PASSWORD env var");
            warn!("==========================================================");
            pwd
        });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let seed = &AppConfig::get().seed;
    let admin = NewUser {
        username: seed.admin_username.clone(),
        email: seed.admin_email.to_lowercase(),
        password_hash,
        role: UserRole::Admin,
        is_active: true,
        permissions: vec![],
    };

    match storage.create_user(admin).await {
        Ok(user) => {
            info!(
                "Default admin account created successfully (ID: {}, username: {})",
                user.id, user.username
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 存储初始化失败时以未配置状态启动，存储相关路由返回 500
fn storage_or_unconfigured(result: Result<StorageContext>) -> StorageContext {
    match result {
        Ok(storage) => storage,
        Err(e) => {
            error!("Failed to initialize storage, continuing without a database: {}", e);
            StorageContext::unconfigured()
        }
    }
}

/// 准备服务器启动的上下文：连接存储、执行迁移并写入初始数据
pub async fn prepare_server_startup() -> StartupContext {
    let storage = storage_or_unconfigured(create_storage_context().await);

    match storage.get() {
        Ok(backend) => {
            warn!("Storage backend initialized and migrations completed");
            if let Err(e) = seed_modules(&backend).await {
                warn!("Failed to seed feature modules: {}", e);
            }
            seed_admin(&backend).await;
        }
        Err(_) => {
            warn!(
                "No storage backend, store-backed routes will report \"Database not configured\""
            );
        }
    }

    StartupContext { storage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SchoolError;

    #[test]
    fn test_generated_password_length_and_charset() {
        let password = generate_random_password(16);
        assert_eq!(password.chars().count(), 16);
        assert!(password.chars().all(|c| c.is_ascii_graphic()));
    }

    #[test]
    fn test_unreachable_store_starts_unconfigured() {
        let err = SchoolError::database_connection("SQLite connection failed: unable to open file");
        let storage = storage_or_unconfigured(Err(err));
        assert!(!storage.is_configured());
        assert!(storage.get().is_err());
    }
}
