//! Installed app instances (`installedapps/...`).

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use super::SmartThings;

/// Optional event payloads for [`SmartThings::create_installedapp_events`].
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledAppEvents {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_app_events: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_app_dashboard_card_events: Option<Value>,
}

impl SmartThings {
    /// List the installed app instances visible to the token.
    pub async fn list_installedapps(&self) -> Result<Value> {
        self.get("installedapps").await
    }

    /// Fetch one installed app.
    pub async fn get_installedapp(&self, installed_app_id: &str) -> Result<Value> {
        self.get(&format!("installedapps/{installed_app_id}")).await
    }

    /// Delete an installed app.
    pub async fn delete_installedapp(&self, installed_app_id: &str) -> Result<Value> {
        self.delete(&format!("installedapps/{installed_app_id}"))
            .await
    }

    /// List the install configurations for an installed app.
    pub async fn list_configurations(&self, installed_app_id: &str) -> Result<Value> {
        self.get(&format!("installedapps/{installed_app_id}/configs"))
            .await
    }

    /// Fetch one install configuration with its config entries.
    pub async fn get_configuration(
        &self,
        installed_app_id: &str,
        configuration_id: &str,
    ) -> Result<Value> {
        self.get(&format!(
            "installedapps/{installed_app_id}/configs/{configuration_id}"
        ))
        .await
    }

    /// Publish SmartApp events for an installed app.
    pub async fn create_installedapp_events(
        &self,
        installed_app_id: &str,
        events: InstalledAppEvents,
    ) -> Result<Value> {
        self.post(&format!("installedapps/{installed_app_id}/events"), &events)
            .await
    }
}
