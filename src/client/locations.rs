//! Locations (`locations/...`).

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use super::SmartThings;

/// Optional fields shared by location create and update.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_scale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl SmartThings {
    /// List the locations in the account.
    pub async fn list_locations(&self) -> Result<Value> {
        self.get("locations").await
    }

    /// Create a location.
    pub async fn create_location(
        &self,
        name: &str,
        country_code: &str,
        opts: LocationOptions,
    ) -> Result<Value> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            name: &'a str,
            country_code: &'a str,
            #[serde(flatten)]
            opts: LocationOptions,
        }
        self.post(
            "locations",
            &Body {
                name,
                country_code,
                opts,
            },
        )
        .await
    }

    /// Get one location.
    pub async fn get_location(&self, location_id: &str) -> Result<Value> {
        self.get(&format!("locations/{location_id}")).await
    }

    /// Update a location's name and optional attributes.
    pub async fn update_location(
        &self,
        location_id: &str,
        name: &str,
        opts: LocationOptions,
    ) -> Result<Value> {
        #[derive(Serialize)]
        struct Body<'a> {
            name: &'a str,
            #[serde(flatten)]
            opts: LocationOptions,
        }
        self.put(&format!("locations/{location_id}"), &Body { name, opts })
            .await
    }

    /// Delete a location.
    pub async fn delete_location(&self, location_id: &str) -> Result<Value> {
        self.delete(&format!("locations/{location_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_options_omit_absent_fields() {
        let json = serde_json::to_value(LocationOptions::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));

        let json = serde_json::to_value(LocationOptions {
            latitude: Some(40.7),
            temperature_scale: Some("C".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["latitude"], 40.7);
        assert_eq!(json["temperatureScale"], "C");
        assert!(json.get("longitude").is_none());
    }
}
