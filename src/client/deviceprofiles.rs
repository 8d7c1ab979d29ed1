//! Device profiles (`deviceprofiles/...`).

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use super::SmartThings;

#[derive(Serialize)]
struct ProfileBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    components: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Value>,
}

impl SmartThings {
    /// Create a device profile.
    pub async fn create_deviceprofile(
        &self,
        name: &str,
        components: Value,
        metadata: Option<Value>,
    ) -> Result<Value> {
        let body = ProfileBody {
            name: Some(name),
            components,
            metadata,
        };
        self.post("deviceprofiles", &body).await
    }

    /// List device profiles.
    pub async fn list_deviceprofiles(&self) -> Result<Value> {
        self.get("deviceprofiles").await
    }

    /// Get one device profile.
    pub async fn get_deviceprofile(&self, device_profile_id: &str) -> Result<Value> {
        self.get(&format!("deviceprofiles/{device_profile_id}"))
            .await
    }

    /// Delete a device profile.
    pub async fn delete_deviceprofile(&self, device_profile_id: &str) -> Result<Value> {
        self.delete(&format!("deviceprofiles/{device_profile_id}"))
            .await
    }

    /// Replace a device profile's components and metadata.
    pub async fn update_deviceprofile(
        &self,
        device_profile_id: &str,
        components: Value,
        metadata: Option<Value>,
    ) -> Result<Value> {
        let body = ProfileBody {
            name: None,
            components,
            metadata,
        };
        self.put(&format!("deviceprofiles/{device_profile_id}"), &body)
            .await
    }
}
