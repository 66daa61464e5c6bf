use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use reqwest::blocking::multipart;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::REPORT_MARKER;
use crate::fabric::client::FabricClient;

const ITEM_METADATA: &str = "item.json";

#[derive(Debug, Deserialize)]
struct Workspace {
    id: String,
    #[serde(rename = "displayName")]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ItemSummary {
    id: String,
    #[serde(rename = "displayName")]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct CreatedItem {
    id: String,
}

/// Return the id of the workspace named `name`, creating it when absent.
pub fn ensure_workspace(client: &FabricClient, name: &str) -> Result<String> {
    let workspaces: Vec<Workspace> = client
        .get("/workspaces")?
        .json()
        .context("workspace list was not valid JSON")?;

    if let Some(existing) = workspaces.iter().find(|w| w.display_name == name) {
        debug!(id = %existing.id, name, "workspace already exists");
        return Ok(existing.id.clone());
    }

    info!(name, "creating workspace");
    let created: Workspace = client
        .post_json("/workspaces", &json!({ "displayName": name }))?
        .json()
        .context("workspace creation returned an unexpected document")?;
    Ok(created.id)
}

/// Create or update one Fabric item from a PBIP item folder.
///
/// The display name is the folder name up to its first dot; the item
/// type comes from the folder suffix. An item whose display name already
/// exists in the workspace gets its definition updated in place,
/// otherwise the item is created from `item.json` plus the definition
/// file.
pub fn publish_item(client: &FabricClient, workspace_id: &str, folder: &Path) -> Result<()> {
    let item_type = item_type_for(folder)?;
    let display_name = display_name_for(folder)?;

    let definition_path = folder.join(REPORT_MARKER);
    let definition = fs::read(&definition_path)
        .with_context(|| format!("missing item definition {}", definition_path.display()))?;

    info!(item = %folder.display(), item_type, "publishing item");
    let items: Vec<ItemSummary> = client
        .get(&format!("/workspaces/{workspace_id}/items?type={item_type}"))?
        .json()
        .context("item list was not valid JSON")?;

    if let Some(existing) = items.iter().find(|i| i.display_name == display_name) {
        debug!(id = %existing.id, "updating existing item definition");
        let form = multipart::Form::new().part(
            "definition",
            multipart::Part::bytes(definition).file_name(REPORT_MARKER),
        );
        client.post_multipart(
            &format!(
                "/workspaces/{workspace_id}/items/{}/updateDefinition?updateMetadata=false",
                existing.id
            ),
            form,
        )?;
        return Ok(());
    }

    debug!(%display_name, "creating new item");
    let metadata_path = folder.join(ITEM_METADATA);
    let metadata = fs::read(&metadata_path)
        .with_context(|| format!("missing item metadata {}", metadata_path.display()))?;
    let form = multipart::Form::new()
        .part("item", multipart::Part::bytes(metadata).file_name(ITEM_METADATA))
        .part(
            "definition",
            multipart::Part::bytes(definition).file_name(REPORT_MARKER),
        );
    let created: CreatedItem = client
        .post_multipart(&format!("/workspaces/{workspace_id}/items"), form)?
        .json()
        .with_context(|| format!("Fabric did not return a created item for {display_name}"))?;

    info!(id = %created.id, %display_name, "created item");
    Ok(())
}

/// Fabric item type for a PBIP folder, derived from the folder suffix.
fn item_type_for(folder: &Path) -> Result<&'static str> {
    match folder.extension().and_then(|e| e.to_str()) {
        Some("Report") => Ok("Report"),
        Some("SemanticModel") => Ok("SemanticModel"),
        _ => bail!(
            "cannot derive a Fabric item type for {} (expected a .Report or .SemanticModel folder)",
            folder.display()
        ),
    }
}

/// Item display name: the folder name up to its first dot.
fn display_name_for(folder: &Path) -> Result<String> {
    folder
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .with_context(|| format!("cannot derive a display name for {}", folder.display()))
}
