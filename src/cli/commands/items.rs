use anyhow::bail;
use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cli::utils::{output_data_item, output_data_items, output_success, parse_message};
use crate::cli::{ApiClient, OutputFormat};
use crate::database::models::{ContentBlock, CreateDataItem, Message, UpdateDataItem};

#[derive(Subcommand)]
pub enum ItemCommands {
    #[command(about = "List data items in a project")]
    List {
        #[arg(help = "Project ID")]
        project: Uuid,
    },

    #[command(about = "Create a data item")]
    Create {
        #[arg(help = "Project ID")]
        project: Uuid,
        #[arg(long, conflicts_with = "input", help = "Plain text input (a single text block)")]
        text: Option<String>,
        #[arg(long, help = "Input message as a JSON array of blocks, or - for stdin")]
        input: Option<String>,
        #[arg(long, help = "Output message as a JSON array of blocks, or - for stdin")]
        output: Option<String>,
    },

    #[command(about = "Show a single data item")]
    Show {
        #[arg(help = "Project ID")]
        project: Uuid,
        #[arg(help = "Data item ID")]
        item: Uuid,
    },

    #[command(about = "Update a data item's messages")]
    Update {
        #[arg(help = "Project ID")]
        project: Uuid,
        #[arg(help = "Data item ID")]
        item: Uuid,
        #[arg(long, conflicts_with = "input", help = "Replace the input with a single text block")]
        text: Option<String>,
        #[arg(long, help = "Replacement input message (JSON array, or - for stdin)")]
        input: Option<String>,
        #[arg(long, help = "Replacement output message (JSON array, or - for stdin)")]
        output: Option<String>,
    },

    #[command(about = "Soft delete a data item")]
    Delete {
        #[arg(help = "Project ID")]
        project: Uuid,
        #[arg(help = "Data item ID")]
        item: Uuid,
    },
}

pub async fn handle(cmd: ItemCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ItemCommands::List { project } => {
            let items = client.list_data_items(project).await?;
            output_data_items(&output_format, &items)
        }
        ItemCommands::Create { project, text, input, output } => {
            let Some(input_message) = input_from(text, input)? else {
                bail!("an input message is required (--text or --input)");
            };
            let output_message = output.as_deref().map(parse_message).transpose()?;
            let item = client
                .create_data_item(project, &CreateDataItem { input_message, output_message })
                .await?;
            let message = format!("Data item created: {}", item.id);
            output_success(&output_format, &message, Some(json!(item)))
        }
        ItemCommands::Show { project, item } => {
            let item = client.get_data_item(project, item).await?;
            output_data_item(&output_format, &item)
        }
        ItemCommands::Update { project, item, text, input, output } => {
            let update = UpdateDataItem {
                input_message: input_from(text, input)?,
                output_message: output.as_deref().map(parse_message).transpose()?,
                deleted: None,
            };
            if update.is_empty() {
                bail!("nothing to update (use --text, --input or --output)");
            }
            let item = client.update_data_item(project, item, &update).await?;
            let message = format!("Data item updated: {}", item.id);
            output_success(&output_format, &message, Some(json!(item)))
        }
        ItemCommands::Delete { project, item } => {
            let body = client.delete_data_item(project, item).await?;
            output_success(&output_format, &format!("Data item deleted: {}", item), Some(body))
        }
    }
}

fn input_from(text: Option<String>, input: Option<String>) -> anyhow::Result<Option<Message>> {
    match (text, input) {
        (Some(text), _) => Ok(Some(vec![ContentBlock::text(text)])),
        (None, Some(raw)) => Ok(Some(parse_message(&raw)?)),
        (None, None) => Ok(None),
    }
}
