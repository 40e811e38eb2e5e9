//! Caller identity.
//!
//! Identity comes from a trusted header carrying an opaque token. Nothing here
//! verifies that token; it is a development stand-in for real authentication,
//! not a security boundary.

use axum::http::HeaderMap;
use uuid::Uuid;

use crate::config::IdentityConfig;
use crate::database::models::{DataItem, Project, User};
use crate::database::{DatabaseError, Store};

/// Resolved caller, passed explicitly into every scoped operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user: User,
}

impl Caller {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> i64 {
        self.user.id
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Identity header is not valid visible ASCII")]
    Malformed,
    #[error("Identity token exceeds {0} characters")]
    TooLong(usize),
}

/// Read the identity token from the configured header.
///
/// Absent or blank headers yield the configured placeholder identity.
pub fn token_from_headers(headers: &HeaderMap, config: &IdentityConfig) -> Result<String, IdentityError> {
    let Some(raw) = headers.get(config.header.as_str()) else {
        return Ok(config.placeholder.clone());
    };

    let value = raw.to_str().map_err(|_| IdentityError::Malformed)?.trim();
    if value.is_empty() {
        return Ok(config.placeholder.clone());
    }
    if value.chars().any(|c| !c.is_ascii_graphic()) {
        return Err(IdentityError::Malformed);
    }
    if value.chars().count() > config.max_token_length {
        return Err(IdentityError::TooLong(config.max_token_length));
    }
    Ok(value.to_string())
}

/// Map a token to its user, creating the user on first occurrence
pub async fn resolve_caller(store: &dyn Store, token: &str) -> Result<Caller, DatabaseError> {
    let user = store.resolve_user(token).await?;
    Ok(Caller::new(user))
}

/// Entities that belong to exactly one user
pub trait Owned {
    fn owner_id(&self) -> i64;
}

impl Owned for Project {
    fn owner_id(&self) -> i64 {
        self.owner_id
    }
}

/// The single authorization predicate used by every scoped operation
pub fn owns<E: Owned + ?Sized>(caller: &Caller, entity: &E) -> bool {
    entity.owner_id() == caller.user_id()
}

/// A data item is reachable only through the project it was created under
pub fn belongs_to(item: &DataItem, project_id: Uuid) -> bool {
    item.project_id == project_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Utc;

    fn caller(id: i64) -> Caller {
        Caller::new(User { id, external_id: format!("user{}", id) })
    }

    fn project(owner_id: i64) -> Project {
        Project {
            id: Uuid::new_v4(),
            name: "Test Project".to_string(),
            owner_id,
            deleted: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn owner_owns_project() {
        let p = project(1);
        assert!(owns(&caller(1), &p));
        assert!(!owns(&caller(2), &p));
    }

    #[test]
    fn ownership_ignores_soft_delete() {
        let mut p = project(1);
        p.deleted = true;
        assert!(owns(&caller(1), &p));
    }

    #[test]
    fn missing_or_blank_header_falls_back_to_placeholder() {
        let config = IdentityConfig::default();
        let mut headers = HeaderMap::new();
        assert_eq!(token_from_headers(&headers, &config).unwrap(), "test_user_id");

        headers.insert("x-logto-user", HeaderValue::from_static("   "));
        assert_eq!(token_from_headers(&headers, &config).unwrap(), "test_user_id");
    }

    #[test]
    fn header_token_is_trimmed() {
        let config = IdentityConfig::default();
        let mut headers = HeaderMap::new();
        headers.insert("x-logto-user", HeaderValue::from_static(" user1 "));
        assert_eq!(token_from_headers(&headers, &config).unwrap(), "user1");
    }

    #[test]
    fn oversized_token_is_rejected() {
        let config = IdentityConfig { max_token_length: 4, ..IdentityConfig::default() };
        let mut headers = HeaderMap::new();
        headers.insert("x-logto-user", HeaderValue::from_static("user12345"));
        assert_eq!(token_from_headers(&headers, &config), Err(IdentityError::TooLong(4)));
    }

    #[test]
    fn inner_whitespace_is_rejected() {
        let config = IdentityConfig::default();
        let mut headers = HeaderMap::new();
        headers.insert("x-logto-user", HeaderValue::from_static("user 1"));
        assert_eq!(token_from_headers(&headers, &config), Err(IdentityError::Malformed));

        headers.insert("x-logto-user", HeaderValue::from_static("user\t1"));
        assert_eq!(token_from_headers(&headers, &config), Err(IdentityError::Malformed));
    }

    #[test]
    fn non_ascii_token_is_rejected() {
        let config = IdentityConfig::default();
        let mut headers = HeaderMap::new();
        headers.insert("x-logto-user", HeaderValue::from_bytes(&[0x75, 0xff]).unwrap());
        assert_eq!(token_from_headers(&headers, &config), Err(IdentityError::Malformed));
    }
}
