pub mod content;
pub mod data_item;
pub mod project;
pub mod user;

use std::collections::HashMap;

pub use content::{ContentBlock, Message};
pub use data_item::{CreateDataItem, DataItem, UpdateDataItem};
pub use project::{CreateProject, Project, UpdateProject};
pub use user::User;

/// Field name -> human readable problem
pub type FieldErrors = HashMap<String, String>;

/// Semantic checks run on a request body after it deserialized cleanly
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}
