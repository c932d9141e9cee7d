//! 路由守卫
//!
//! 导航判定是 (路由元数据, 当前身份) 的纯函数，中间件只负责把
//! RedirectToLogin 映射为 302 响应。

use crate::models::users::entities::{User, UserRole};

/// 路由元数据：是否要求登录、要求的角色
#[derive(Debug, Clone, Default)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub role: Option<UserRole>,
}

impl RouteMeta {
    /// 不设限制的路由
    pub fn open() -> Self {
        Self::default()
    }

    /// 仅要求登录
    pub fn authenticated() -> Self {
        Self {
            requires_auth: true,
            role: None,
        }
    }

    /// 要求登录且角色精确匹配
    pub fn with_role(role: UserRole) -> Self {
        Self {
            requires_auth: true,
            role: Some(role),
        }
    }
}

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
}

/// 当前身份是否持有指定角色
///
/// 严格相等比较，无角色层级：Admin 不会隐式通过 Lecturer 校验。
pub fn has_role(identity: Option<&User>, role: &UserRole) -> bool {
    identity.is_some_and(|user| &user.role == role)
}

/// 导航判定
///
/// 1. 目标要求登录且无当前身份 -> 重定向到登录页
/// 2. 目标要求角色且 has_role 为否 -> 重定向到登录页
/// 3. 否则放行
pub fn evaluate(meta: &RouteMeta, identity: Option<&User>) -> GuardDecision {
    if meta.requires_auth && identity.is_none() {
        return GuardDecision::RedirectToLogin;
    }
    if let Some(required) = &meta.role {
        if !has_role(identity, required) {
            return GuardDecision::RedirectToLogin;
        }
    }
    GuardDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;

    fn identity(role: UserRole) -> User {
        let now = chrono::Utc::now();
        User {
            id: 1,
            username: "test-user".to_string(),
            display_name: "Test User".to_string(),
            email: Some("test@university.edu".to_string()),
            matric_number: None,
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            courses: vec![],
            advisees: vec![],
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_requires_auth_without_identity_redirects() {
        let meta = RouteMeta::authenticated();
        assert_eq!(evaluate(&meta, None), GuardDecision::RedirectToLogin);
    }

    #[test]
    fn test_role_mismatch_redirects() {
        let meta = RouteMeta::with_role(UserRole::Student);
        let lecturer = identity(UserRole::Lecturer);
        assert_eq!(
            evaluate(&meta, Some(&lecturer)),
            GuardDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_admin_does_not_satisfy_lecturer_check() {
        let meta = RouteMeta::with_role(UserRole::Lecturer);
        let admin = identity(UserRole::Admin);
        assert_eq!(evaluate(&meta, Some(&admin)), GuardDecision::RedirectToLogin);
    }

    #[test]
    fn test_matching_role_allows() {
        let meta = RouteMeta::with_role(UserRole::Advisor);
        let advisor = identity(UserRole::Advisor);
        assert_eq!(evaluate(&meta, Some(&advisor)), GuardDecision::Allow);
    }

    #[test]
    fn test_unrestricted_route_always_allows() {
        let meta = RouteMeta::open();
        assert_eq!(evaluate(&meta, None), GuardDecision::Allow);
        let student = identity(UserRole::Student);
        assert_eq!(evaluate(&meta, Some(&student)), GuardDecision::Allow);
    }

    #[test]
    fn test_authenticated_route_allows_any_role() {
        let meta = RouteMeta::authenticated();
        let student = identity(UserRole::Student);
        assert_eq!(evaluate(&meta, Some(&student)), GuardDecision::Allow);
    }

    #[test]
    fn test_has_role_without_identity_is_false() {
        assert!(!has_role(None, &UserRole::Admin));
        assert!(!has_role(None, &UserRole::Student));
    }
}
