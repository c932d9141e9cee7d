use std::sync::atomic::Ordering;

use super::MemoryStorage;
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    users::{
        entities::{User, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

impl MemoryStorage {
    /// 创建用户
    pub(crate) fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let mut users = self
            .users
            .write()
            .map_err(|_| PortalError::storage_operation("用户集合写锁中毒"))?;

        let duplicate = users.iter().any(|u| {
            u.username == req.username
                || (req.email.is_some() && u.email == req.email)
                || (req.matric_number.is_some() && u.matric_number == req.matric_number)
        });
        if duplicate {
            return Err(PortalError::conflict(
                "Username, email or matric number already exists",
            ));
        }

        let now = chrono::Utc::now();
        let user = User {
            id: self.next_user_id.fetch_add(1, Ordering::SeqCst),
            username: req.username,
            display_name: req.display_name,
            email: req.email,
            matric_number: req.matric_number,
            password_hash: req.password,
            role: req.role,
            status: UserStatus::Active,
            courses: req.courses,
            advisees: req.advisees,
            last_login: None,
            created_at: now,
            updated_at: now,
        };

        users.push(user.clone());
        Ok(user)
    }

    /// 通过 ID 获取用户
    pub(crate) fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| PortalError::storage_operation("用户集合读锁中毒"))?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    /// 通过用户名获取用户
    pub(crate) fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| PortalError::storage_operation("用户集合读锁中毒"))?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    /// 通过登录标识符获取用户：邮箱、学号或用户名精确匹配
    pub(crate) fn get_user_by_identifier_impl(&self, identifier: &str) -> Result<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| PortalError::storage_operation("用户集合读锁中毒"))?;
        Ok(users
            .iter()
            .find(|u| {
                u.email.as_deref() == Some(identifier)
                    || u.matric_number.as_deref() == Some(identifier)
                    || u.username == identifier
            })
            .cloned())
    }

    /// 分页列出用户
    pub(crate) fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let users = self
            .users
            .read()
            .map_err(|_| PortalError::storage_operation("用户集合读锁中毒"))?;

        let filtered: Vec<&User> = users
            .iter()
            .filter(|u| query.role.as_ref().is_none_or(|r| &u.role == r))
            .filter(|u| query.status.as_ref().is_none_or(|s| &u.status == s))
            .filter(|u| {
                query.search.as_deref().is_none_or(|s| {
                    let s = s.to_lowercase();
                    u.username.to_lowercase().contains(&s)
                        || u.display_name.to_lowercase().contains(&s)
                        || u.email
                            .as_deref()
                            .is_some_and(|e| e.to_lowercase().contains(&s))
                        || u.matric_number
                            .as_deref()
                            .is_some_and(|m| m.to_lowercase().contains(&s))
                })
            })
            .collect();

        let total = filtered.len() as i64;
        let page = query.page.unwrap_or(1).max(1);
        let size = query.size.unwrap_or(10).max(1);
        let total_pages = (total + size - 1) / size;

        let items = filtered
            .into_iter()
            .skip(((page - 1) * size) as usize)
            .take(size as usize)
            .cloned()
            .collect();

        Ok(UserListResponse {
            items,
            pagination: PaginationInfo {
                page,
                page_size: size,
                total,
                total_pages,
            },
        })
    }

    /// 更新用户
    pub(crate) fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let mut users = self
            .users
            .write()
            .map_err(|_| PortalError::storage_operation("用户集合写锁中毒"))?;

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        if let Some(display_name) = update.display_name {
            user.display_name = display_name;
        }
        if let Some(email) = update.email {
            user.email = Some(email);
        }
        if let Some(matric_number) = update.matric_number {
            user.matric_number = Some(matric_number);
        }
        if let Some(password_hash) = update.password {
            user.password_hash = password_hash;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(status) = update.status {
            user.status = status;
        }
        if let Some(courses) = update.courses {
            user.courses = courses;
        }
        if let Some(advisees) = update.advisees {
            user.advisees = advisees;
        }
        user.updated_at = chrono::Utc::now();

        Ok(Some(user.clone()))
    }

    /// 删除用户
    pub(crate) fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let mut users = self
            .users
            .write()
            .map_err(|_| PortalError::storage_operation("用户集合写锁中毒"))?;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }

    /// 更新最后登录时间
    pub(crate) fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let mut users = self
            .users
            .write()
            .map_err(|_| PortalError::storage_operation("用户集合写锁中毒"))?;
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.last_login = Some(chrono::Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 用户总数
    pub(crate) fn count_users_impl(&self) -> Result<i64> {
        let users = self
            .users
            .read()
            .map_err(|_| PortalError::storage_operation("用户集合读锁中毒"))?;
        Ok(users.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::Storage;

    fn create_request(username: &str, email: Option<&str>, matric: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            display_name: username.to_string(),
            email: email.map(String::from),
            matric_number: matric.map(String::from),
            password: "hash".to_string(),
            role: UserRole::Student,
            courses: vec![],
            advisees: vec![],
        }
    }

    #[tokio::test]
    async fn test_identifier_lookup_matches_email_and_matric() {
        let storage = MemoryStorage::new();
        storage
            .create_user(create_request(
                "alice-j",
                Some("alice@university.edu"),
                Some("STU001"),
            ))
            .await
            .unwrap();

        let by_email = storage
            .get_user_by_identifier("alice@university.edu")
            .await
            .unwrap();
        assert!(by_email.is_some());

        let by_matric = storage.get_user_by_identifier("STU001").await.unwrap();
        assert!(by_matric.is_some());

        let unknown = storage.get_user_by_identifier("STU999").await.unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let storage = MemoryStorage::new();
        storage
            .create_user(create_request("alice-j", None, Some("STU001")))
            .await
            .unwrap();
        let err = storage
            .create_user(create_request("alice-j", None, Some("STU002")))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_user_ids_are_monotonic() {
        let storage = MemoryStorage::new();
        let a = storage
            .create_user(create_request("user-one", None, Some("STU001")))
            .await
            .unwrap();
        let b = storage
            .create_user(create_request("user-two", None, Some("STU002")))
            .await
            .unwrap();
        assert!(b.id > a.id);
    }
}
