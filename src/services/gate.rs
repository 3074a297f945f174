//! Identity gate - role resolution for elevated operations.
//!
//! The caller's stored role is re-read on every operation so role
//! changes take effect immediately; the token is never trusted for
//! authorization. Policy: any failure to resolve the role (missing
//! profile, store error) is treated as non-admin. The fault is still
//! recorded so it stays observable.

use crate::domain::Identity;
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Resolve whether the caller holds the admin role.
pub(crate) async fn is_admin(users: &dyn UserRepository, caller: &Identity) -> bool {
    match users.find_by_id(caller.id).await {
        Ok(Some(user)) => user.is_admin(),
        Ok(None) => false,
        Err(e) => {
            tracing::warn!(
                user_id = %caller.id,
                "role lookup failed, treating caller as non-admin: {e}"
            );
            false
        }
    }
}

/// Fail with `Forbidden` unless the caller is an admin.
pub(crate) async fn require_admin(users: &dyn UserRepository, caller: &Identity) -> AppResult<()> {
    if is_admin(users, caller).await {
        Ok(())
    } else {
        Err(AppError::forbidden("Admin privileges required"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{User, UserRole};
    use crate::infra::repositories::MockUserRepository;

    fn user_with_role(id: Uuid, role: UserRole) -> User {
        User {
            id,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn admin_role_passes_the_gate() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user_with_role(id, UserRole::Admin))));

        let caller = Identity::new(Uuid::new_v4());
        assert!(is_admin(&users, &caller).await);
        assert!(require_admin(&users, &caller).await.is_ok());
    }

    #[tokio::test]
    async fn user_role_is_rejected() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user_with_role(id, UserRole::User))));

        let caller = Identity::new(Uuid::new_v4());
        let err = require_admin(&users, &caller).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn missing_profile_is_treated_as_non_admin() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let caller = Identity::new(Uuid::new_v4());
        assert!(!is_admin(&users, &caller).await);
    }

    #[tokio::test]
    async fn lookup_failure_is_treated_as_non_admin() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|_| Err(AppError::internal("store down")));

        let caller = Identity::new(Uuid::new_v4());
        assert!(!is_admin(&users, &caller).await);
    }
}
