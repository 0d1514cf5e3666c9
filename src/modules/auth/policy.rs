use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use uuid::Uuid;

use crate::db::models::{User, UserRole};
use crate::error::{AppError, AppResult};

pub const SESSION_USER_KEY: &str = "auth.user";

/// Identity carried in the session row between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        SessionUser {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

pub async fn current_user(session: &Session) -> AppResult<Option<SessionUser>> {
    Ok(session.get::<SessionUser>(SESSION_USER_KEY).await?)
}

pub async fn require_auth(session: &Session) -> AppResult<SessionUser> {
    current_user(session)
        .await?
        .ok_or_else(|| AppError::Authentication("No valid session".to_string()))
}

pub fn check_role(user: &SessionUser, role: UserRole) -> AppResult<()> {
    if user.role == role {
        Ok(())
    } else {
        Err(AppError::Authorization(format!(
            "{:?} access required",
            role
        )))
    }
}

pub async fn require_role(session: &Session, role: UserRole) -> AppResult<SessionUser> {
    let user = require_auth(session).await?;
    check_role(&user, role)?;
    Ok(user)
}

pub async fn require_admin(session: &Session) -> AppResult<SessionUser> {
    require_role(session, UserRole::Admin).await
}

/// Sign-in domain restriction. The comparison is anchored at the `@` so a
/// hostile domain merely ending in the allowed suffix does not pass.
pub fn email_in_domain(email: &str, domain: &str) -> bool {
    email
        .to_lowercase()
        .ends_with(&format!("@{}", domain.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            email: "user@bootlabstech.com".to_string(),
            role,
        }
    }

    #[test]
    fn role_check_rejects_mismatch() {
        assert!(check_role(&user(UserRole::Admin), UserRole::Admin).is_ok());
        assert!(matches!(
            check_role(&user(UserRole::Employee), UserRole::Admin),
            Err(AppError::Authorization(_))
        ));
        // An admin asking for the employee gate is still a mismatch, not a
        // silent downgrade.
        assert!(check_role(&user(UserRole::Admin), UserRole::Employee).is_err());
    }

    #[test]
    fn domain_check_is_anchored_at_the_at_sign() {
        assert!(email_in_domain("user@bootlabstech.com", "bootlabstech.com"));
        assert!(email_in_domain("User@BootLabsTech.com", "bootlabstech.com"));
        assert!(!email_in_domain("user@otherdomain.com", "bootlabstech.com"));
        assert!(!email_in_domain(
            "user@evil-bootlabstech.com",
            "bootlabstech.com"
        ));
        assert!(!email_in_domain("bootlabstech.com", "bootlabstech.com"));
    }
}
