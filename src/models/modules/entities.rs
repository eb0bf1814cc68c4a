use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 内置功能模块，权限检查按模块名进行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureModule {
    Dashboard,
    Students,
    Teachers,
    Courses,
    Attendance,
}

impl FeatureModule {
    pub const ALL: [FeatureModule; 5] = [
        FeatureModule::Dashboard,
        FeatureModule::Students,
        FeatureModule::Teachers,
        FeatureModule::Courses,
        FeatureModule::Attendance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureModule::Dashboard => "Dashboard",
            FeatureModule::Students => "Students",
            FeatureModule::Teachers => "Teachers",
            FeatureModule::Courses => "Courses",
            FeatureModule::Attendance => "Attendance",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            FeatureModule::Dashboard => "/admin/dashboard",
            FeatureModule::Students => "/students",
            FeatureModule::Teachers => "/teachers",
            FeatureModule::Courses => "/courses",
            FeatureModule::Attendance => "/attendance",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FeatureModule::Dashboard => "dashboard",
            FeatureModule::Students => "users",
            FeatureModule::Teachers => "user-check",
            FeatureModule::Courses => "book-open",
            FeatureModule::Attendance => "calendar-check",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FeatureModule::Dashboard => "Overview and statistics",
            FeatureModule::Students => "Manage student records",
            FeatureModule::Teachers => "Manage teacher records",
            FeatureModule::Courses => "Manage courses and enrollments",
            FeatureModule::Attendance => "Mark and review attendance",
        }
    }
}

impl std::fmt::Display for FeatureModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// 功能模块记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/module.ts")]
pub struct Module {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
