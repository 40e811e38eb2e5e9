use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{FieldErrors, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub owner_id: i64,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
}

/// Partial update; fields left out (or sent as null) keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl UpdateProject {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.deleted.is_none()
    }

    /// Apply present fields onto an existing record
    pub fn apply(&self, project: &mut Project) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(deleted) = self.deleted {
            project.deleted = deleted;
        }
    }
}

fn check_name(name: &str, errors: &mut FieldErrors) {
    if name.trim().is_empty() {
        errors.insert("name".to_string(), "Project name must not be empty".to_string());
    }
}

impl Validate for CreateProject {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_name(&self.name, &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Validate for UpdateProject {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            check_name(name, &mut errors);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            id: Uuid::new_v4(),
            name: "Old Name".to_string(),
            owner_id: 1,
            deleted: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(CreateProject { name: "   ".to_string() }.validate().is_err());
        assert!(CreateProject { name: "Test Project".to_string() }.validate().is_ok());

        let update = UpdateProject { name: Some(String::new()), deleted: None };
        let errors = update.validate().unwrap_err();
        assert!(errors.contains_key("name"));
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut p = project();
        UpdateProject { name: None, deleted: Some(true) }.apply(&mut p);
        assert_eq!(p.name, "Old Name");
        assert!(p.deleted);

        UpdateProject { name: Some("New Name".to_string()), deleted: None }.apply(&mut p);
        assert_eq!(p.name, "New Name");
        assert!(p.deleted);
    }

    #[test]
    fn null_fields_count_as_absent() {
        let update: UpdateProject = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(update.is_empty());
    }
}
