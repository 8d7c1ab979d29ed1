//! Event subscriptions for an installed app
//! (`installedapps/{id}/subscriptions/...`).
//!
//! A subscription registers the app to receive EVENT callbacks when the
//! named source changes. Each source type nests its parameters under its
//! own key next to `sourceType`.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use super::SmartThings;

/// Optional fields for a DEVICE subscription.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSubscriptionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_change_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modes: Option<Vec<String>>,
}

/// Optional fields for a CAPABILITY subscription.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySubscriptionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_change_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modes: Option<Vec<String>>,
}

/// Optional fields shared by DEVICE_LIFECYCLE and DEVICE_HEALTH
/// subscriptions.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceGroupSubscriptionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceBody {
    source_type: &'static str,
    device: DeviceSource,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceSource {
    device_id: String,
    #[serde(flatten)]
    opts: DeviceSubscriptionOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CapabilityBody {
    source_type: &'static str,
    capability: CapabilitySource,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CapabilitySource {
    location_id: String,
    capability: String,
    #[serde(flatten)]
    opts: CapabilitySubscriptionOptions,
}

/// Sources that only carry a location id plus an optional name
/// (MODE, SECURITY_ARM_STATE, HUB_HEALTH, SCENE_LIFECYCLE).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocationSource {
    location_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    subscription_name: Option<String>,
}

impl LocationSource {
    fn new(location_id: &str, subscription_name: Option<&str>) -> Self {
        Self {
            location_id: location_id.to_string(),
            subscription_name: subscription_name.map(str::to_string),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModeBody {
    source_type: &'static str,
    mode: LocationSource,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SecurityArmStateBody {
    source_type: &'static str,
    security_arm_state: LocationSource,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HubHealthBody {
    source_type: &'static str,
    hub_health: LocationSource,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SceneLifecycleBody {
    source_type: &'static str,
    scene_lifecycle: LocationSource,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceLifecycleBody {
    source_type: &'static str,
    device_lifecycle: DeviceGroupSubscriptionOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceHealthBody {
    source_type: &'static str,
    device_health: DeviceGroupSubscriptionOptions,
}

impl SmartThings {
    fn subscriptions_path(installed_app_id: &str) -> String {
        format!("installedapps/{installed_app_id}/subscriptions")
    }

    /// List the subscriptions for an installed app.
    pub async fn list_subscriptions(&self, installed_app_id: &str) -> Result<Value> {
        self.get(&Self::subscriptions_path(installed_app_id)).await
    }

    /// Subscribe to events from one device.
    pub async fn create_device_subscription(
        &self,
        installed_app_id: &str,
        device_id: &str,
        opts: DeviceSubscriptionOptions,
    ) -> Result<Value> {
        let body = DeviceBody {
            source_type: "DEVICE",
            device: DeviceSource {
                device_id: device_id.to_string(),
                opts,
            },
        };
        self.post(&Self::subscriptions_path(installed_app_id), &body)
            .await
    }

    /// Subscribe to events from every device in a location exposing a
    /// capability.
    pub async fn create_capability_subscription(
        &self,
        installed_app_id: &str,
        location_id: &str,
        capability: &str,
        opts: CapabilitySubscriptionOptions,
    ) -> Result<Value> {
        let body = CapabilityBody {
            source_type: "CAPABILITY",
            capability: CapabilitySource {
                location_id: location_id.to_string(),
                capability: capability.to_string(),
                opts,
            },
        };
        self.post(&Self::subscriptions_path(installed_app_id), &body)
            .await
    }

    /// Subscribe to mode changes in a location.
    pub async fn create_mode_subscription(
        &self,
        installed_app_id: &str,
        location_id: &str,
    ) -> Result<Value> {
        let body = ModeBody {
            source_type: "MODE",
            mode: LocationSource::new(location_id, None),
        };
        self.post(&Self::subscriptions_path(installed_app_id), &body)
            .await
    }

    /// Subscribe to device create/delete/move events.
    pub async fn create_device_lifecycle_subscription(
        &self,
        installed_app_id: &str,
        opts: DeviceGroupSubscriptionOptions,
    ) -> Result<Value> {
        let body = DeviceLifecycleBody {
            source_type: "DEVICE_LIFECYCLE",
            device_lifecycle: opts,
        };
        self.post(&Self::subscriptions_path(installed_app_id), &body)
            .await
    }

    /// Subscribe to device online/offline events.
    pub async fn create_device_health_subscription(
        &self,
        installed_app_id: &str,
        opts: DeviceGroupSubscriptionOptions,
    ) -> Result<Value> {
        let body = DeviceHealthBody {
            source_type: "DEVICE_HEALTH",
            device_health: opts,
        };
        self.post(&Self::subscriptions_path(installed_app_id), &body)
            .await
    }

    /// Subscribe to security system arm-state changes.
    pub async fn create_security_arm_state_subscription(
        &self,
        installed_app_id: &str,
        location_id: &str,
        subscription_name: Option<&str>,
    ) -> Result<Value> {
        let body = SecurityArmStateBody {
            source_type: "SECURITY_ARM_STATE",
            security_arm_state: LocationSource::new(location_id, subscription_name),
        };
        self.post(&Self::subscriptions_path(installed_app_id), &body)
            .await
    }

    /// Subscribe to hub online/offline events.
    pub async fn create_hub_health_subscription(
        &self,
        installed_app_id: &str,
        location_id: &str,
        subscription_name: Option<&str>,
    ) -> Result<Value> {
        let body = HubHealthBody {
            source_type: "HUB_HEALTH",
            hub_health: LocationSource::new(location_id, subscription_name),
        };
        self.post(&Self::subscriptions_path(installed_app_id), &body)
            .await
    }

    /// Subscribe to scene create/update/delete events.
    pub async fn create_scene_lifecycle_subscription(
        &self,
        installed_app_id: &str,
        location_id: &str,
        subscription_name: Option<&str>,
    ) -> Result<Value> {
        let body = SceneLifecycleBody {
            source_type: "SCENE_LIFECYCLE",
            scene_lifecycle: LocationSource::new(location_id, subscription_name),
        };
        self.post(&Self::subscriptions_path(installed_app_id), &body)
            .await
    }

    /// Delete every subscription for an installed app.
    pub async fn delete_subscriptions(&self, installed_app_id: &str) -> Result<Value> {
        self.delete(&Self::subscriptions_path(installed_app_id)).await
    }

    /// Get one subscription.
    pub async fn get_subscription(
        &self,
        installed_app_id: &str,
        subscription_id: &str,
    ) -> Result<Value> {
        self.get(&format!(
            "installedapps/{installed_app_id}/subscriptions/{subscription_id}"
        ))
        .await
    }

    /// Delete one subscription.
    pub async fn delete_subscription(
        &self,
        installed_app_id: &str,
        subscription_id: &str,
    ) -> Result<Value> {
        self.delete(&format!(
            "installedapps/{installed_app_id}/subscriptions/{subscription_id}"
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_body_nests_under_device_key() {
        let body = DeviceBody {
            source_type: "DEVICE",
            device: DeviceSource {
                device_id: "dev-1".to_string(),
                opts: DeviceSubscriptionOptions {
                    capability: Some("motionSensor".to_string()),
                    attribute: Some("motion".to_string()),
                    state_change_only: Some(true),
                    ..Default::default()
                },
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["sourceType"], "DEVICE");
        assert_eq!(json["device"]["deviceId"], "dev-1");
        assert_eq!(json["device"]["capability"], "motionSensor");
        assert_eq!(json["device"]["stateChangeOnly"], true);
        assert!(json["device"].get("modes").is_none());
    }

    #[test]
    fn capability_body_nests_under_capability_key() {
        let body = CapabilityBody {
            source_type: "CAPABILITY",
            capability: CapabilitySource {
                location_id: "loc-1".to_string(),
                capability: "switch".to_string(),
                opts: CapabilitySubscriptionOptions::default(),
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["sourceType"], "CAPABILITY");
        assert_eq!(
            json["capability"],
            serde_json::json!({ "locationId": "loc-1", "capability": "switch" })
        );
    }

    #[test]
    fn location_source_bodies_nest_under_their_source_key() {
        let json = serde_json::to_value(ModeBody {
            source_type: "MODE",
            mode: LocationSource::new("loc-1", None),
        })
        .unwrap();
        assert_eq!(json["sourceType"], "MODE");
        assert_eq!(json["mode"]["locationId"], "loc-1");
        assert!(json["mode"].get("subscriptionName").is_none());

        let json = serde_json::to_value(HubHealthBody {
            source_type: "HUB_HEALTH",
            hub_health: LocationSource::new("loc-1", Some("hub")),
        })
        .unwrap();
        assert_eq!(json["hubHealth"]["subscriptionName"], "hub");
    }
}
