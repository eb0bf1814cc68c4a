use serde::Deserialize;
use ts_rs::TS;

// 模块创建请求
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/module.ts")]
pub struct CreateModuleRequest {
    pub name: Option<String>,
    pub path: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// 存储层使用的模块写入参数
#[derive(Debug, Clone)]
pub struct NewModule {
    pub name: String,
    pub path: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}
