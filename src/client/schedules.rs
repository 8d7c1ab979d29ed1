//! Schedules for an installed app (`installedapps/{id}/schedules/...`).

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use super::SmartThings;

#[derive(Serialize)]
struct OnceBody<'a> {
    name: &'a str,
    once: OnceSpec,
}

#[derive(Serialize)]
struct OnceSpec {
    /// Absolute trigger time in epoch milliseconds.
    time: i64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    overwrite: bool,
}

#[derive(Serialize)]
struct CronBody<'a> {
    name: &'a str,
    cron: CronSpec<'a>,
}

#[derive(Serialize)]
struct CronSpec<'a> {
    expression: &'a str,
    timezone: &'a str,
}

fn once_spec(minutes_from_now: i64, overwrite: bool) -> OnceSpec {
    OnceSpec {
        time: Utc::now().timestamp_millis() + minutes_from_now * 60 * 1000,
        overwrite,
    }
}

impl SmartThings {
    /// List the schedules for an installed app.
    pub async fn list_schedules(&self, installed_app_id: &str) -> Result<Value> {
        self.get(&format!("installedapps/{installed_app_id}/schedules"))
            .await
    }

    /// Create a one-shot schedule firing `minutes_from_now` minutes from now.
    pub async fn save_once_schedule(
        &self,
        installed_app_id: &str,
        name: &str,
        minutes_from_now: i64,
        overwrite: bool,
    ) -> Result<Value> {
        let body = OnceBody {
            name,
            once: once_spec(minutes_from_now, overwrite),
        };
        self.post(&format!("installedapps/{installed_app_id}/schedules"), &body)
            .await
    }

    /// Create a recurring cron schedule.
    pub async fn save_cron_schedule(
        &self,
        installed_app_id: &str,
        name: &str,
        expression: &str,
        timezone: &str,
    ) -> Result<Value> {
        let body = CronBody {
            name,
            cron: CronSpec {
                expression,
                timezone,
            },
        };
        self.post(&format!("installedapps/{installed_app_id}/schedules"), &body)
            .await
    }

    /// Delete every schedule for an installed app.
    pub async fn delete_schedules(&self, installed_app_id: &str) -> Result<Value> {
        self.delete(&format!("installedapps/{installed_app_id}/schedules"))
            .await
    }

    /// Get one schedule by name.
    pub async fn get_schedule(
        &self,
        installed_app_id: &str,
        schedule_name: &str,
    ) -> Result<Value> {
        self.get(&format!(
            "installedapps/{installed_app_id}/schedules/{schedule_name}"
        ))
        .await
    }

    /// Delete one schedule by name.
    pub async fn delete_schedule(
        &self,
        installed_app_id: &str,
        schedule_name: &str,
    ) -> Result<Value> {
        self.delete(&format!(
            "installedapps/{installed_app_id}/schedules/{schedule_name}"
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_schedule_time_is_in_the_future() {
        let before = Utc::now().timestamp_millis();
        let spec = once_spec(15, false);
        assert!(spec.time >= before + 15 * 60 * 1000);
        assert!(spec.time <= Utc::now().timestamp_millis() + 15 * 60 * 1000);
    }

    #[test]
    fn once_body_omits_overwrite_unless_set() {
        let json = serde_json::to_value(OnceBody {
            name: "wake",
            once: OnceSpec {
                time: 1_000,
                overwrite: false,
            },
        })
        .unwrap();
        assert!(json["once"].get("overwrite").is_none());

        let json = serde_json::to_value(OnceBody {
            name: "wake",
            once: OnceSpec {
                time: 1_000,
                overwrite: true,
            },
        })
        .unwrap();
        assert_eq!(json["once"]["overwrite"], true);
    }
}
