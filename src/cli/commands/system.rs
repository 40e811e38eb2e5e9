use anyhow::bail;

use crate::cli::utils::print_json;
use crate::cli::{ApiClient, OutputFormat};

pub async fn health(client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let (status, body) = client.health().await?;

    match output_format {
        OutputFormat::Json => print_json(&body)?,
        OutputFormat::Text => {
            let state = body.get("status").and_then(|s| s.as_str()).unwrap_or("unknown");
            let database = body.get("database").and_then(|s| s.as_str()).unwrap_or("unknown");
            println!("Server:   {}", client.base_url());
            println!("Status:   {}", state);
            println!("Database: {}", database);
        }
    }

    if !status.is_success() {
        bail!("server reported {}", status);
    }
    Ok(())
}

pub async fn whoami(client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let user = client.whoami().await?;

    match output_format {
        OutputFormat::Json => print_json(&user),
        OutputFormat::Text => {
            println!("{} (id {})", user.external_id, user.id);
            Ok(())
        }
    }
}
