//! 会话身份与授权能力

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::modules::entities::FeatureModule;
use crate::models::users::entities::{Permission, PermissionAction, User, UserRole};

/// 会话中携带的用户信息，签入 JWT
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub permissions: Vec<Permission>,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            is_active: user.is_active,
            permissions: user.permissions.clone(),
        }
    }
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.is_active && self.role == UserRole::Admin
    }

    /// 管理员隐式拥有全部模块权限
    pub fn has_permission(&self, module: &str, action: PermissionAction) -> bool {
        if self.is_admin() {
            return true;
        }
        self.is_active
            && self
                .permissions
                .iter()
                .any(|p| p.matches(module) && p.allows(action))
    }

    pub fn satisfies(&self, capability: &Capability) -> bool {
        match capability {
            Capability::Authenticated => true,
            Capability::Role(role) => self.is_admin() || (self.is_active && self.role == *role),
            Capability::Module { module, action } => self.has_permission(module.as_str(), *action),
        }
    }
}

/// 路由所需的授权能力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// 任意已登录用户
    Authenticated,
    /// 指定角色
    Role(UserRole),
    /// 某功能模块上的某个动作
    Module {
        module: FeatureModule,
        action: PermissionAction,
    },
}

impl Capability {
    pub fn module(module: FeatureModule, action: PermissionAction) -> Self {
        Capability::Module { module, action }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Authenticated => write!(f, "authenticated"),
            Capability::Role(role) => write!(f, "role:{role}"),
            Capability::Module { module, action } => {
                write!(f, "{}:{:?}", module.as_str(), action)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole, permissions: Vec<Permission>) -> SessionUser {
        SessionUser {
            id: 7,
            username: "someone".to_string(),
            email: "someone@school.test".to_string(),
            role,
            is_active: true,
            permissions,
        }
    }

    #[test]
    fn test_admin_has_every_capability() {
        let admin = user(UserRole::Admin, vec![]);
        assert!(admin.satisfies(&Capability::Role(UserRole::Admin)));
        assert!(admin.satisfies(&Capability::module(
            FeatureModule::Attendance,
            PermissionAction::Delete
        )));
    }

    #[test]
    fn test_inactive_admin_is_not_privileged() {
        let mut admin = user(UserRole::Admin, vec![]);
        admin.is_active = false;
        assert!(!admin.satisfies(&Capability::Role(UserRole::Admin)));
        assert!(!admin.satisfies(&Capability::module(
            FeatureModule::Students,
            PermissionAction::View
        )));
        assert!(admin.satisfies(&Capability::Authenticated));
    }

    #[test]
    fn test_module_permission_is_case_insensitive() {
        let teacher = user(
            UserRole::Teacher,
            vec![Permission {
                module: "ATTENDANCE".to_string(),
                can_view: true,
                can_edit: true,
                can_delete: false,
            }],
        );
        assert!(teacher.satisfies(&Capability::module(
            FeatureModule::Attendance,
            PermissionAction::Edit
        )));
        assert!(!teacher.satisfies(&Capability::module(
            FeatureModule::Attendance,
            PermissionAction::Delete
        )));
        assert!(!teacher.satisfies(&Capability::module(
            FeatureModule::Students,
            PermissionAction::View
        )));
    }

    #[test]
    fn test_role_capability_requires_matching_role() {
        let student = user(UserRole::Student, vec![]);
        assert!(student.satisfies(&Capability::Role(UserRole::Student)));
        assert!(!student.satisfies(&Capability::Role(UserRole::Admin)));
    }
}
