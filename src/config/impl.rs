use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 常用环境变量到配置键的映射，优先级高于 `SCHOOL__*`
const ENV_OVERRIDES: [(&str, &str); 8] = [
    ("APP_ENV", "app.environment"),
    ("RUST_LOG", "app.log_level"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("CPU_COUNT", "server.workers"),
    ("JWT_SECRET", "session.secret"),
    ("DATABASE_URL", "database.url"),
    ("DATABASE_NAME", "database.name"),
];

impl AppConfig {
    /// 依次合并 config.toml、config.<APP_ENV>.toml、SCHOOL__* 与常用环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{environment}")).required(false))
            .add_source(
                Environment::with_prefix("SCHOOL")
                    .separator("__")
                    .try_parsing(true),
            );

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(key, std::env::var(var).ok())?;
        }

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;
        app_config.normalize()?;
        Ok(app_config)
    }

    /// 填充派生值并拒绝无法启动的组合
    fn normalize(&mut self) -> Result<(), ConfigError> {
        if self.server.workers == 0 {
            self.server.workers = num_cpus::get().min(self.server.max_workers);
        }
        if self.session.secret.is_empty() {
            return Err(ConfigError::Message(
                "session.secret (JWT_SECRET) must be set".to_string(),
            ));
        }
        if self.session.expiry_hours <= 0 {
            return Err(ConfigError::Message(
                "session.expiry_hours must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// 获取全局配置实例，首次访问时加载
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 启动时显式初始化
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 数据库 URL 为空时以未配置状态启动
    pub fn is_database_configured(&self) -> bool {
        !self.database.url.trim().is_empty()
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_fills_workers() {
        let mut config = AppConfig::default();
        config.session.secret = "secret".to_string();
        config.server.workers = 0;
        config.normalize().unwrap();
        assert!(config.server.workers >= 1);
        assert!(config.server.workers <= config.server.max_workers);
    }

    #[test]
    fn test_normalize_rejects_empty_secret() {
        let mut config = AppConfig::default();
        config.session.secret.clear();
        assert!(config.normalize().is_err());
    }

    #[test]
    fn test_blank_database_url_is_unconfigured() {
        let mut config = AppConfig::default();
        config.database.url = "   ".to_string();
        assert!(!config.is_database_configured());
        config.database.url = "sqlite://school.db".to_string();
        assert!(config.is_database_configured());
    }
}
