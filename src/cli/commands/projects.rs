use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cli::utils::{output_projects, output_success, print_json};
use crate::cli::{ApiClient, OutputFormat};
use crate::database::models::{Project, UpdateProject};

#[derive(Subcommand)]
pub enum ProjectCommands {
    #[command(about = "List your projects")]
    List,

    #[command(about = "Create a project")]
    Create {
        #[arg(help = "Project name")]
        name: String,
    },

    #[command(about = "Show a single project")]
    Show {
        #[arg(help = "Project ID")]
        id: Uuid,
    },

    #[command(about = "Rename a project")]
    Rename {
        #[arg(help = "Project ID")]
        id: Uuid,
        #[arg(help = "New project name")]
        name: String,
    },

    #[command(about = "Soft delete a project")]
    Delete {
        #[arg(help = "Project ID")]
        id: Uuid,
    },

    #[command(about = "Restore a soft-deleted project")]
    Restore {
        #[arg(help = "Project ID")]
        id: Uuid,
    },
}

pub async fn handle(cmd: ProjectCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ProjectCommands::List => {
            let projects = client.list_projects().await?;
            output_projects(&output_format, &projects)
        }
        ProjectCommands::Create { name } => {
            let project = client.create_project(&name).await?;
            report(&output_format, "Project created", &project)
        }
        ProjectCommands::Show { id } => {
            let project = client.get_project(id).await?;
            match output_format {
                OutputFormat::Json => print_json(&project),
                OutputFormat::Text => {
                    println!("ID:      {}", project.id);
                    println!("Name:    {}", project.name);
                    println!("Created: {}", project.created_at);
                    if let Some(updated_at) = project.updated_at {
                        println!("Updated: {}", updated_at);
                    }
                    if project.deleted {
                        println!("Deleted: yes");
                    }
                    Ok(())
                }
            }
        }
        ProjectCommands::Rename { id, name } => {
            let update = UpdateProject { name: Some(name), deleted: None };
            let project = client.update_project(id, &update).await?;
            report(&output_format, "Project renamed", &project)
        }
        ProjectCommands::Delete { id } => {
            let update = UpdateProject { name: None, deleted: Some(true) };
            let project = client.update_project(id, &update).await?;
            report(&output_format, "Project deleted", &project)
        }
        ProjectCommands::Restore { id } => {
            let update = UpdateProject { name: None, deleted: Some(false) };
            let project = client.update_project(id, &update).await?;
            report(&output_format, "Project restored", &project)
        }
    }
}

fn report(output_format: &OutputFormat, action: &str, project: &Project) -> anyhow::Result<()> {
    let message = format!("{}: {} ({})", action, project.name, project.id);
    output_success(output_format, &message, Some(json!(project)))
}
