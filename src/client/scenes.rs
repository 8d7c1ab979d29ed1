//! Scenes (`scenes/...`).

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use super::SmartThings;

impl SmartThings {
    /// List the scenes visible to the token.
    pub async fn list_scenes(&self) -> Result<Value> {
        self.get("scenes").await
    }

    /// Execute a scene.
    pub async fn execute_scene(&self, scene_id: &str, status: Option<&str>) -> Result<Value> {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            status: Option<&'a str>,
        }
        self.post(&format!("scenes/{scene_id}/execute"), &Body { status })
            .await
    }
}
