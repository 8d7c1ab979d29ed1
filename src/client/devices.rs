//! Device management (`devices/...`).

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use super::SmartThings;

/// Optional fields for device installation.
#[derive(Debug, Default, Clone)]
pub struct InstallDeviceOptions {
    pub label: Option<String>,
    pub external_id: Option<String>,
}

impl SmartThings {
    /// List the devices visible to the token.
    pub async fn list_devices(&self) -> Result<Value> {
        self.get("devices").await
    }

    /// Install a device from a device profile.
    pub async fn install_device(
        &self,
        location_id: &str,
        profile_id: &str,
        installed_app_id: &str,
        opts: InstallDeviceOptions,
    ) -> Result<Value> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body {
            location_id: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            label: Option<String>,
            app: AppRef,
        }
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct AppRef {
            profile_id: String,
            installed_app_id: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            external_id: Option<String>,
        }

        let body = Body {
            location_id: location_id.to_string(),
            label: opts.label,
            app: AppRef {
                profile_id: profile_id.to_string(),
                installed_app_id: installed_app_id.to_string(),
                external_id: opts.external_id,
            },
        };
        self.post("devices", &body).await
    }

    /// Get a device's description.
    pub async fn get_device(&self, device_id: &str) -> Result<Value> {
        self.get(&format!("devices/{device_id}")).await
    }

    /// Delete a device.
    pub async fn delete_device(&self, device_id: &str) -> Result<Value> {
        self.delete(&format!("devices/{device_id}")).await
    }

    /// Update a device's label and components.
    pub async fn update_device(
        &self,
        device_id: &str,
        label: &str,
        components: Value,
    ) -> Result<Value> {
        #[derive(Serialize)]
        struct Body<'a> {
            label: &'a str,
            components: Value,
        }
        self.put(&format!("devices/{device_id}"), &Body { label, components })
            .await
    }

    /// Execute commands on a device.
    pub async fn execute_commands(&self, device_id: &str, commands: Value) -> Result<Value> {
        #[derive(Serialize)]
        struct Body {
            commands: Value,
        }
        self.post(&format!("devices/{device_id}/commands"), &Body { commands })
            .await
    }

    /// Publish attribute state updates for a device.
    pub async fn create_device_events(
        &self,
        device_id: &str,
        device_events: Value,
    ) -> Result<Value> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body {
            device_events: Value,
        }
        self.post(&format!("devices/{device_id}/events"), &Body { device_events })
            .await
    }

    /// Current status of all of a device's components.
    pub async fn device_status(&self, device_id: &str) -> Result<Value> {
        self.get(&format!("devices/{device_id}/status")).await
    }

    /// Status of every attribute of one component.
    pub async fn component_status(&self, device_id: &str, component_id: &str) -> Result<Value> {
        self.get(&format!("devices/{device_id}/components/{component_id}/status"))
            .await
    }

    /// Status of one capability of one component.
    pub async fn capability_status(
        &self,
        device_id: &str,
        component_id: &str,
        capability_id: &str,
    ) -> Result<Value> {
        self.get(&format!(
            "devices/{device_id}/components/{component_id}/capabilities/{capability_id}/status"
        ))
        .await
    }
}
