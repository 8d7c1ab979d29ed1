//! Rules (`rules/...`).

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use super::SmartThings;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RuleBody<'a> {
    name: &'a str,
    actions: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_zone_id: Option<&'a str>,
}

impl SmartThings {
    /// List the rules for the token's location.
    pub async fn list_rules(&self) -> Result<Value> {
        self.get("rules").await
    }

    /// Create a rule.
    pub async fn create_rule(
        &self,
        name: &str,
        actions: Value,
        time_zone_id: Option<&str>,
    ) -> Result<Value> {
        self.post(
            "rules",
            &RuleBody {
                name,
                actions,
                time_zone_id,
            },
        )
        .await
    }

    /// Get one rule.
    pub async fn get_rule(&self, rule_id: &str) -> Result<Value> {
        self.get(&format!("rules/{rule_id}")).await
    }

    /// Replace a rule's name and actions.
    pub async fn update_rule(
        &self,
        rule_id: &str,
        name: &str,
        actions: Value,
        time_zone_id: Option<&str>,
    ) -> Result<Value> {
        self.put(
            &format!("rules/{rule_id}"),
            &RuleBody {
                name,
                actions,
                time_zone_id,
            },
        )
        .await
    }

    /// Delete a rule.
    pub async fn delete_rule(&self, rule_id: &str) -> Result<Value> {
        self.delete(&format!("rules/{rule_id}")).await
    }

    /// Trigger a rule to run now.
    pub async fn execute_rule(&self, rule_id: &str) -> Result<Value> {
        self.post(&format!("rules/execute/{rule_id}"), &serde_json::json!({}))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_body_omits_absent_time_zone() {
        let body = RuleBody {
            name: "evening",
            actions: serde_json::json!([]),
            time_zone_id: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("timeZoneId").is_none());

        let body = RuleBody {
            name: "evening",
            actions: serde_json::json!([]),
            time_zone_id: Some("America/New_York"),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["timeZoneId"], "America/New_York");
    }
}
