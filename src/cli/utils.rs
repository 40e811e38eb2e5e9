use anyhow::Context;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Read;

use crate::cli::OutputFormat;
use crate::database::models::{ContentBlock, DataItem, Message, Project};

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });
            if let Some(data_value) = data {
                response["data"] = data_value;
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn output_projects(output_format: &OutputFormat, projects: &[Project]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => print_json(&projects),
        OutputFormat::Text => {
            if projects.is_empty() {
                println!("No projects yet");
            }
            for project in projects {
                println!("{}  {}{}", project.id, project.name, if project.deleted { " (deleted)" } else { "" });
            }
            Ok(())
        }
    }
}

pub fn output_data_items(output_format: &OutputFormat, items: &[DataItem]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Text => {
            if items.is_empty() {
                println!("No data items yet");
            }
            for item in items {
                println!("{}  {}", item.id, summarize(&item.input_message, 60));
            }
            Ok(())
        }
    }
}

pub fn output_data_item(output_format: &OutputFormat, item: &DataItem) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => print_json(item),
        OutputFormat::Text => {
            println!("ID:      {}", item.id);
            println!("Project: {}", item.project_id);
            println!("Input:   {}", summarize(&item.input_message, 200));
            if let Some(output) = &item.output_message {
                println!("Output:  {}", summarize(output, 200));
            }
            if item.deleted {
                println!("Deleted: yes");
            }
            Ok(())
        }
    }
}

/// One-line rendering of a message, truncated to `max` characters
pub fn summarize(message: &Message, max: usize) -> String {
    let joined = message
        .iter()
        .map(|block| match block {
            ContentBlock::Text { content } => content.clone(),
            ContentBlock::Image { content } => format!("[image {}]", content),
        })
        .collect::<Vec<_>>()
        .join(" ");

    if joined.chars().count() > max {
        let cut: String = joined.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    } else {
        joined
    }
}

/// Parse a message given inline as JSON, or read from stdin when `raw` is `-`
pub fn parse_message(raw: &str) -> anyhow::Result<Message> {
    let source = if raw == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read message from stdin")?;
        buffer
    } else {
        raw.to_string()
    };

    serde_json::from_str(&source).context("message must be a JSON array of content blocks")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_joins_and_truncates() {
        let message = vec![ContentBlock::text("Hello"), ContentBlock::image("a.png")];
        assert_eq!(summarize(&message, 100), "Hello [image a.png]");
        assert_eq!(summarize(&message, 6), "Hello…");
    }

    #[test]
    fn parse_message_validates_blocks() {
        let message = parse_message(r#"[{"type": "text", "content": "Hi"}]"#).unwrap();
        assert_eq!(message, vec![ContentBlock::text("Hi")]);
        assert!(parse_message(r#"[{"type": "audio", "content": "x"}]"#).is_err());
    }
}
