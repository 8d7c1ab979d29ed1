//! Configuration page state machine for the installation wizard.
//!
//! During CONFIGURATION the platform calls back once per wizard step with
//! the user's answers so far, and we respond with the next page to render.
//! This module is a pure function of `(phase, page_id, answers)`; it holds
//! no state between calls.
//!
//! The wizard is three pages: pick a trigger, pick the devices relevant to
//! that trigger, then optional conditions plus a time window.

use std::collections::HashMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Trigger ids offered on page 1. Page 2's layout branches on which one
/// the user picked.
const TRIGGER_MOTION: &str = "motion";
const TRIGGER_CONTACT: &str = "contact";
const TRIGGER_PRESENCE: &str = "presence";

// ── Inbound types ───────────────────────────────────────────────────────────

/// The `configurationData` payload of a CONFIGURATION lifecycle call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationData {
    pub phase: String,
    #[serde(default)]
    pub page_id: Option<String>,
    /// Answers collected so far, keyed by setting id. Required by the
    /// protocol even when empty; its absence is a malformed request.
    #[serde(default)]
    pub config: Option<InstallConfig>,
}

/// Prior answers: setting id → selected value(s).
pub type InstallConfig = HashMap<String, Vec<ConfigEntry>>;

/// One selected value for a setting.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEntry {
    #[serde(default)]
    pub value_type: Option<String>,
    #[serde(default)]
    pub string_config: Option<StringConfig>,
    #[serde(default)]
    pub device_config: Option<DeviceConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringConfig {
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfig {
    pub device_id: String,
    #[serde(default)]
    pub component_id: Option<String>,
}

// ── Outbound types ──────────────────────────────────────────────────────────

/// Either an initialization descriptor or a wizard page, depending on the
/// requested phase.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ConfigResponse {
    Initialize { initialize: AppInfo },
    Page { page: ConfigPage },
}

/// Static app metadata returned for the INITIALIZE phase.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub name: String,
    pub description: String,
    pub id: String,
    pub first_page_id: String,
    pub permissions: Vec<String>,
}

/// One screen of the installation wizard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPage {
    pub page_id: String,
    pub name: String,
    pub next_page_id: Option<String>,
    pub previous_page_id: Option<String>,
    pub complete: bool,
    pub sections: Vec<Section>,
}

#[derive(Debug, Serialize)]
pub struct Section {
    pub name: String,
    pub settings: Vec<Setting>,
}

/// A single typed input field within a page.
#[derive(Debug, Serialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Setting {
    Device {
        id: String,
        name: String,
        description: String,
        required: bool,
        multiple: bool,
        capabilities: Vec<String>,
        permissions: Vec<String>,
    },
    Enum {
        id: String,
        name: String,
        description: String,
        required: bool,
        multiple: bool,
        options: Vec<EnumOption>,
    },
    Time {
        id: String,
        name: String,
        description: String,
        required: bool,
    },
}

#[derive(Debug, Serialize)]
pub struct EnumOption {
    pub id: String,
    pub name: String,
}

impl EnumOption {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

// ── State machine ───────────────────────────────────────────────────────────

/// Top-level CONFIGURATION entry point.
///
/// A missing `config` map is a malformed request regardless of phase, and
/// any phase outside INITIALIZE/PAGE is unsupported; both abort the request.
pub fn handle(data: &ConfigurationData) -> Result<ConfigResponse> {
    let Some(config) = data.config.as_ref() else {
        bail!("no config section set in request");
    };

    match data.phase.as_str() {
        "INITIALIZE" => Ok(ConfigResponse::Initialize {
            initialize: app_info(),
        }),
        "PAGE" => {
            let page_id = data.page_id.as_deref().unwrap_or_default();
            Ok(ConfigResponse::Page {
                page: create_page(page_id, config)?,
            })
        }
        phase => bail!("unsupported config phase: {phase}"),
    }
}

/// App metadata shown before the first page, including which page the
/// wizard starts on.
fn app_info() -> AppInfo {
    AppInfo {
        name: "Switchboard".to_string(),
        description: "Turn lights on when something happens".to_string(),
        id: "app".to_string(),
        first_page_id: "1".to_string(),
        permissions: vec!["r:devices:*".to_string(), "x:devices:*".to_string()],
    }
}

/// Produce the wizard page for `page_id` given the answers so far.
///
/// Page ids form a closed set; anything else is a fatal input error rather
/// than a fallback page.
pub fn create_page(page_id: &str, current: &InstallConfig) -> Result<ConfigPage> {
    match page_id {
        "1" => Ok(page_one()),
        "2" => Ok(page_two(current)),
        "3" => Ok(page_three()),
        other => bail!("unsupported page id: {other}"),
    }
}

fn page_one() -> ConfigPage {
    ConfigPage {
        page_id: "1".to_string(),
        name: "What should this automation do?".to_string(),
        next_page_id: Some("2".to_string()),
        previous_page_id: None,
        complete: false,
        sections: vec![
            Section {
                name: "Control these lights".to_string(),
                settings: vec![Setting::Device {
                    id: "lights".to_string(),
                    name: "Which lights?".to_string(),
                    description: "Tap to set".to_string(),
                    required: true,
                    multiple: true,
                    capabilities: vec!["switch".to_string()],
                    permissions: vec!["r".to_string(), "x".to_string()],
                }],
            },
            Section {
                name: "Turn them on when...".to_string(),
                settings: vec![Setting::Enum {
                    id: "trigger".to_string(),
                    name: "What kind of trigger?".to_string(),
                    description: "Tap to set".to_string(),
                    required: true,
                    multiple: false,
                    options: vec![
                        EnumOption::new(TRIGGER_MOTION, "When motion is detected"),
                        EnumOption::new(TRIGGER_CONTACT, "When a door or window opens"),
                        EnumOption::new(TRIGGER_PRESENCE, "When someone arrives"),
                    ],
                }],
            },
        ],
    }
}

/// Page 2 branches on the trigger chosen on page 1: a motion trigger wants
/// exactly one sensor, a contact trigger allows several, and anything else
/// (presence, or an unrecognized value) falls back to offering both sensor
/// kinds.
fn page_two(current: &InstallConfig) -> ConfigPage {
    let trigger = selected_trigger(current);

    let sections = match trigger {
        Some(TRIGGER_MOTION) => vec![Section {
            name: "When motion is detected on...".to_string(),
            settings: vec![device_setting("motionSensor", "motionSensor", false)],
        }],
        Some(TRIGGER_CONTACT) => vec![Section {
            name: "When any of these open...".to_string(),
            settings: vec![device_setting("contactSensors", "contactSensor", true)],
        }],
        _ => vec![
            Section {
                name: "When motion is detected on...".to_string(),
                settings: vec![device_setting("motionSensors", "motionSensor", true)],
            },
            Section {
                name: "Or any of these open...".to_string(),
                settings: vec![device_setting("contactSensors", "contactSensor", true)],
            },
        ],
    };

    ConfigPage {
        page_id: "2".to_string(),
        name: "Choose your trigger devices".to_string(),
        next_page_id: Some("3".to_string()),
        previous_page_id: Some("1".to_string()),
        complete: false,
        sections,
    }
}

fn page_three() -> ConfigPage {
    ConfigPage {
        page_id: "3".to_string(),
        name: "Extra conditions".to_string(),
        next_page_id: None,
        previous_page_id: Some("2".to_string()),
        complete: true,
        sections: vec![Section {
            name: "Only run when...".to_string(),
            settings: vec![
                Setting::Enum {
                    id: "condition".to_string(),
                    name: "Which times of day?".to_string(),
                    description: "Tap to set".to_string(),
                    required: false,
                    multiple: false,
                    options: vec![
                        EnumOption::new("always", "Always"),
                        EnumOption::new("day", "Daytime only"),
                        EnumOption::new("night", "Nighttime only"),
                    ],
                },
                Setting::Time {
                    id: "initTime".to_string(),
                    name: "Starting at".to_string(),
                    description: "Tap to set".to_string(),
                    required: false,
                },
                Setting::Time {
                    id: "endTime".to_string(),
                    name: "Ending at".to_string(),
                    description: "Tap to set".to_string(),
                    required: false,
                },
            ],
        }],
    }
}

/// The trigger id the user picked on page 1, if present in the answers.
fn selected_trigger(current: &InstallConfig) -> Option<&str> {
    current
        .get("trigger")?
        .first()?
        .string_config
        .as_ref()
        .map(|s| s.value.as_str())
}

fn device_setting(id: &str, capability: &str, multiple: bool) -> Setting {
    Setting::Device {
        id: id.to_string(),
        name: "Which?".to_string(),
        description: "Tap to set".to_string(),
        required: true,
        multiple,
        capabilities: vec![capability.to_string()],
        permissions: vec!["r".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers_with_trigger(value: &str) -> InstallConfig {
        let mut config = InstallConfig::new();
        config.insert(
            "trigger".to_string(),
            vec![ConfigEntry {
                value_type: Some("STRING".to_string()),
                string_config: Some(StringConfig {
                    value: value.to_string(),
                }),
                device_config: None,
            }],
        );
        config
    }

    fn device_multiples(page: &ConfigPage) -> Vec<bool> {
        page.sections
            .iter()
            .flat_map(|s| &s.settings)
            .map(|setting| match setting {
                Setting::Device { multiple, .. } => *multiple,
                other => panic!("expected DEVICE setting, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn unknown_page_id_is_fatal() {
        for id in ["0", "4", "", "nope"] {
            let err = create_page(id, &InstallConfig::new()).unwrap_err();
            assert!(
                err.to_string().contains(&format!("unsupported page id: {id}")),
                "error for {id:?} was: {err}"
            );
        }
    }

    #[test]
    fn page_one_layout() {
        let page = create_page("1", &InstallConfig::new()).unwrap();
        assert_eq!(page.next_page_id.as_deref(), Some("2"));
        assert_eq!(page.previous_page_id, None);
        assert!(!page.complete);
        assert_eq!(page.sections.len(), 2);
    }

    #[test]
    fn page_two_motion_wants_a_single_sensor() {
        let page = create_page("2", &answers_with_trigger(TRIGGER_MOTION)).unwrap();
        assert_eq!(page.sections.len(), 1);
        assert_eq!(device_multiples(&page), vec![false]);
        assert_eq!(page.next_page_id.as_deref(), Some("3"));
    }

    #[test]
    fn page_two_contact_allows_several() {
        let page = create_page("2", &answers_with_trigger(TRIGGER_CONTACT)).unwrap();
        assert_eq!(page.sections.len(), 1);
        assert_eq!(device_multiples(&page), vec![true]);
    }

    #[test]
    fn page_two_other_triggers_offer_both_kinds() {
        for trigger in [TRIGGER_PRESENCE, "something-else"] {
            let page = create_page("2", &answers_with_trigger(trigger)).unwrap();
            assert_eq!(page.sections.len(), 2, "trigger {trigger}");
            assert_eq!(device_multiples(&page), vec![true, true]);
        }
    }

    #[test]
    fn page_two_without_trigger_answer_offers_both_kinds() {
        let page = create_page("2", &InstallConfig::new()).unwrap();
        assert_eq!(page.sections.len(), 2);
    }

    #[test]
    fn page_three_is_terminal() {
        let page = create_page("3", &InstallConfig::new()).unwrap();
        assert!(page.complete);
        assert_eq!(page.next_page_id, None);

        let settings: Vec<_> = page.sections.iter().flat_map(|s| &s.settings).collect();
        let enums: Vec<_> = settings
            .iter()
            .filter_map(|s| match s {
                Setting::Enum { options, .. } => Some(options),
                _ => None,
            })
            .collect();
        assert_eq!(enums.len(), 1);
        assert_eq!(enums[0].len(), 3);

        let times: Vec<_> = settings
            .iter()
            .filter_map(|s| match s {
                Setting::Time { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(times, vec!["initTime", "endTime"]);
    }

    #[test]
    fn initialize_is_constant() {
        for page_id in [None, Some("1"), Some("99")] {
            let data = ConfigurationData {
                phase: "INITIALIZE".to_string(),
                page_id: page_id.map(str::to_string),
                config: Some(answers_with_trigger(TRIGGER_MOTION)),
            };
            match handle(&data).unwrap() {
                ConfigResponse::Initialize { initialize } => {
                    assert_eq!(initialize, app_info())
                }
                ConfigResponse::Page { .. } => panic!("expected initialize response"),
            }
        }
    }

    #[test]
    fn missing_config_is_fatal_for_every_phase() {
        for phase in ["INITIALIZE", "PAGE", "WHATEVER"] {
            let data = ConfigurationData {
                phase: phase.to_string(),
                page_id: Some("1".to_string()),
                config: None,
            };
            let err = handle(&data).unwrap_err();
            assert!(err.to_string().contains("no config section"), "{err}");
        }
    }

    #[test]
    fn unsupported_phase_is_fatal() {
        let data = ConfigurationData {
            phase: "FINALIZE".to_string(),
            page_id: None,
            config: Some(InstallConfig::new()),
        };
        let err = handle(&data).unwrap_err();
        assert!(err.to_string().contains("unsupported config phase: FINALIZE"));
    }

    #[test]
    fn page_serializes_with_protocol_field_names() {
        let page = create_page("1", &InstallConfig::new()).unwrap();
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pageId"], "1");
        assert_eq!(json["nextPageId"], "2");
        assert_eq!(json["previousPageId"], serde_json::Value::Null);
        assert_eq!(json["sections"][0]["settings"][0]["type"], "DEVICE");
        assert_eq!(json["sections"][1]["settings"][0]["type"], "ENUM");
    }
}
