use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::content::Message;
use super::{FieldErrors, Validate};

/// One input/output exchange recorded under a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataItem {
    pub id: Uuid,
    pub project_id: Uuid,
    pub input_message: Message,
    pub output_message: Option<Message>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDataItem {
    pub input_message: Message,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_message: Option<Message>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDataItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl UpdateDataItem {
    pub fn is_empty(&self) -> bool {
        self.input_message.is_none() && self.output_message.is_none() && self.deleted.is_none()
    }

    pub fn soft_delete() -> Self {
        Self {
            deleted: Some(true),
            ..Self::default()
        }
    }

    pub fn apply(&self, item: &mut DataItem) {
        if let Some(input) = &self.input_message {
            item.input_message = input.clone();
        }
        if let Some(output) = &self.output_message {
            item.output_message = Some(output.clone());
        }
        if let Some(deleted) = self.deleted {
            item.deleted = deleted;
        }
    }
}

fn check_input(input: &Message, errors: &mut FieldErrors) {
    if input.is_empty() {
        errors.insert(
            "input_message".to_string(),
            "Input message must contain at least one content block".to_string(),
        );
    }
}

impl Validate for CreateDataItem {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_input(&self.input_message, &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Validate for UpdateDataItem {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(input) = &self.input_message {
            check_input(input, &mut errors);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::ContentBlock;

    fn item() -> DataItem {
        DataItem {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            input_message: vec![ContentBlock::text("Hello")],
            output_message: None,
            deleted: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn output_only_update_leaves_input_and_deleted() {
        let mut it = item();
        let update = UpdateDataItem {
            output_message: Some(vec![ContentBlock::text("World")]),
            ..UpdateDataItem::default()
        };
        update.apply(&mut it);
        assert_eq!(it.input_message, vec![ContentBlock::text("Hello")]);
        assert_eq!(it.output_message, Some(vec![ContentBlock::text("World")]));
        assert!(!it.deleted);
    }

    #[test]
    fn empty_input_message_is_rejected() {
        let create = CreateDataItem { input_message: vec![], output_message: None };
        assert!(create.validate().unwrap_err().contains_key("input_message"));

        let update = UpdateDataItem { input_message: Some(vec![]), ..UpdateDataItem::default() };
        assert!(update.validate().is_err());
        assert!(UpdateDataItem::soft_delete().validate().is_ok());
    }

    #[test]
    fn create_rejects_unknown_block_type() {
        let body = r#"{"input_message": [{"type": "invalid_type", "content": "x"}]}"#;
        assert!(serde_json::from_str::<CreateDataItem>(body).is_err());
    }
}
