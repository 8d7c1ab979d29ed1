//! App registrations (`apps/...`).
//!
//! Covers webhook and lambda SmartApp creation, settings, OAuth client
//! management, and endpoint registration.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use super::SmartThings;

/// Optional fields accepted when creating an app. `None` omits the field
/// from the request body.
#[derive(Debug, Default, Clone)]
pub struct CreateAppOptions {
    pub single_instance: Option<bool>,
    pub icon_url: Option<String>,
    pub principal_type: Option<String>,
    pub client_name: Option<String>,
    pub scope: Option<Vec<String>>,
    pub redirect_uris: Option<Vec<String>>,
    pub plugin_id: Option<String>,
    pub plugin_uri: Option<String>,
}

/// Optional fields accepted when updating an app.
#[derive(Debug, Default, Clone)]
pub struct UpdateAppOptions {
    pub single_instance: Option<bool>,
    pub icon_url: Option<String>,
    pub plugin_id: Option<String>,
    pub plugin_uri: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    app_name: Option<String>,
    display_name: String,
    description: String,
    app_type: &'static str,
    classifications: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_smart_app: Option<WebhookSmartApp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lambda_smart_app: Option<LambdaSmartApp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    single_instance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    principal_type: Option<String>,
    ui: UiSettings,
    icon_image: IconImage,
    #[serde(skip_serializing_if = "Option::is_none")]
    oauth: Option<OauthBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookSmartApp {
    target_url: String,
}

#[derive(Debug, Serialize)]
struct LambdaSmartApp {
    functions: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UiSettings {
    dashboard_cards_enabled: bool,
    pre_install_dashboard_cards_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    plugin_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plugin_uri: Option<String>,
}

#[derive(Debug, Serialize)]
struct IconImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct OauthBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_uris: Option<Vec<String>>,
}

fn create_body(
    app_name: &str,
    display_name: &str,
    description: &str,
    classifications: Vec<String>,
    kind: AppKind,
    dashboard_cards_enabled: bool,
    pre_install_dashboard_cards_enabled: bool,
    opts: CreateAppOptions,
) -> AppBody {
    let (app_type, webhook, lambda) = match kind {
        AppKind::Webhook { target_url } => (
            "WEBHOOK_SMART_APP",
            Some(WebhookSmartApp { target_url }),
            None,
        ),
        AppKind::Lambda { functions } => {
            ("LAMBDA_SMART_APP", None, Some(LambdaSmartApp { functions }))
        }
    };

    AppBody {
        app_name: Some(app_name.to_string()),
        display_name: display_name.to_string(),
        description: description.to_string(),
        app_type,
        classifications,
        webhook_smart_app: webhook,
        lambda_smart_app: lambda,
        single_instance: opts.single_instance,
        principal_type: opts.principal_type,
        ui: UiSettings {
            dashboard_cards_enabled,
            pre_install_dashboard_cards_enabled,
            plugin_id: opts.plugin_id,
            plugin_uri: opts.plugin_uri,
        },
        icon_image: IconImage { url: opts.icon_url },
        oauth: Some(OauthBody {
            client_name: opts.client_name,
            scope: opts.scope,
            redirect_uris: opts.redirect_uris,
        }),
    }
}

fn update_body(
    display_name: &str,
    description: &str,
    classifications: Vec<String>,
    kind: AppKind,
    dashboard_cards_enabled: bool,
    pre_install_dashboard_cards_enabled: bool,
    opts: UpdateAppOptions,
) -> AppBody {
    let (app_type, webhook, lambda) = match kind {
        AppKind::Webhook { target_url } => (
            "WEBHOOK_SMART_APP",
            Some(WebhookSmartApp { target_url }),
            None,
        ),
        AppKind::Lambda { functions } => {
            ("LAMBDA_SMART_APP", None, Some(LambdaSmartApp { functions }))
        }
    };

    AppBody {
        app_name: None,
        display_name: display_name.to_string(),
        description: description.to_string(),
        app_type,
        classifications,
        webhook_smart_app: webhook,
        lambda_smart_app: lambda,
        single_instance: opts.single_instance,
        principal_type: None,
        ui: UiSettings {
            dashboard_cards_enabled,
            pre_install_dashboard_cards_enabled,
            plugin_id: opts.plugin_id,
            plugin_uri: opts.plugin_uri,
        },
        icon_image: IconImage { url: opts.icon_url },
        oauth: None,
    }
}

enum AppKind {
    Webhook { target_url: String },
    Lambda { functions: Vec<String> },
}

impl SmartThings {
    /// Create a webhook SmartApp registration.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_webhook_app(
        &self,
        app_name: &str,
        display_name: &str,
        description: &str,
        classifications: Vec<String>,
        target_url: &str,
        dashboard_cards_enabled: bool,
        pre_install_dashboard_cards_enabled: bool,
        opts: CreateAppOptions,
    ) -> Result<Value> {
        let body = create_body(
            app_name,
            display_name,
            description,
            classifications,
            AppKind::Webhook {
                target_url: target_url.to_string(),
            },
            dashboard_cards_enabled,
            pre_install_dashboard_cards_enabled,
            opts,
        );
        self.post("apps", &body).await
    }

    /// Create a lambda SmartApp registration.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_lambda_app(
        &self,
        app_name: &str,
        display_name: &str,
        description: &str,
        classifications: Vec<String>,
        functions: Vec<String>,
        dashboard_cards_enabled: bool,
        pre_install_dashboard_cards_enabled: bool,
        opts: CreateAppOptions,
    ) -> Result<Value> {
        let body = create_body(
            app_name,
            display_name,
            description,
            classifications,
            AppKind::Lambda { functions },
            dashboard_cards_enabled,
            pre_install_dashboard_cards_enabled,
            opts,
        );
        self.post("apps", &body).await
    }

    /// List all apps configured in the account.
    pub async fn list_apps(&self) -> Result<Value> {
        self.get("apps").await
    }

    /// Get a single app by its `appName` or `appId`.
    pub async fn get_app(&self, app_name_or_id: &str) -> Result<Value> {
        self.get(&format!("apps/{app_name_or_id}")).await
    }

    /// Update a webhook SmartApp registration.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_webhook_app(
        &self,
        app_name_or_id: &str,
        display_name: &str,
        description: &str,
        classifications: Vec<String>,
        target_url: &str,
        dashboard_cards_enabled: bool,
        pre_install_dashboard_cards_enabled: bool,
        opts: UpdateAppOptions,
    ) -> Result<Value> {
        let body = update_body(
            display_name,
            description,
            classifications,
            AppKind::Webhook {
                target_url: target_url.to_string(),
            },
            dashboard_cards_enabled,
            pre_install_dashboard_cards_enabled,
            opts,
        );
        self.put(&format!("apps/{app_name_or_id}"), &body).await
    }

    /// Update a lambda SmartApp registration.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_lambda_app(
        &self,
        app_name_or_id: &str,
        display_name: &str,
        description: &str,
        classifications: Vec<String>,
        functions: Vec<String>,
        dashboard_cards_enabled: bool,
        pre_install_dashboard_cards_enabled: bool,
        opts: UpdateAppOptions,
    ) -> Result<Value> {
        let body = update_body(
            display_name,
            description,
            classifications,
            AppKind::Lambda { functions },
            dashboard_cards_enabled,
            pre_install_dashboard_cards_enabled,
            opts,
        );
        self.put(&format!("apps/{app_name_or_id}"), &body).await
    }

    /// Delete an app.
    pub async fn delete_app(&self, app_name_or_id: &str) -> Result<Value> {
        self.delete(&format!("apps/{app_name_or_id}")).await
    }

    /// Get an app's settings.
    pub async fn app_settings(&self, app_name_or_id: &str) -> Result<Value> {
        self.get(&format!("apps/{app_name_or_id}/settings")).await
    }

    /// Replace an app's settings.
    pub async fn update_app_settings(
        &self,
        app_name_or_id: &str,
        settings: Value,
    ) -> Result<Value> {
        #[derive(Serialize)]
        struct Body {
            settings: Value,
        }
        self.put(&format!("apps/{app_name_or_id}/settings"), &Body { settings })
            .await
    }

    /// Get an app's OAuth settings.
    pub async fn oauth_settings(&self, app_name_or_id: &str) -> Result<Value> {
        self.get(&format!("apps/{app_name_or_id}/oauth")).await
    }

    /// Replace an app's OAuth settings.
    pub async fn update_oauth_settings(
        &self,
        app_name_or_id: &str,
        client_name: &str,
        scope: Vec<String>,
        redirect_uris: Vec<String>,
    ) -> Result<Value> {
        let body = OauthBody {
            client_name: Some(client_name.to_string()),
            scope: Some(scope),
            redirect_uris: Some(redirect_uris),
        };
        self.put(&format!("apps/{app_name_or_id}/oauth"), &body).await
    }

    /// Generate a new OAuth client id/secret pair for an app.
    pub async fn generate_app_oauth(
        &self,
        app_name_or_id: &str,
        client_name: Option<String>,
        scope: Option<Vec<String>>,
    ) -> Result<Value> {
        let body = OauthBody {
            client_name,
            scope,
            redirect_uris: None,
        };
        self.post(&format!("apps/{app_name_or_id}/oauth/generate"), &body)
            .await
    }

    /// Ask the platform to re-send the CONFIRMATION request to the app's
    /// target URL.
    pub async fn send_app_confirmation(&self, app_name_or_id: &str) -> Result<Value> {
        self.put(&format!("apps/{app_name_or_id}/register"), &serde_json::json!({}))
            .await
    }

    /// Change how the platform signs requests to this app.
    pub async fn update_signature_type(
        &self,
        app_name_or_id: &str,
        signature_type: &str,
    ) -> Result<Value> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            signature_type: &'a str,
        }
        self.put(
            &format!("apps/{app_name_or_id}/signature-type"),
            &Body { signature_type },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_omits_absent_options() {
        let body = create_body(
            "my.app",
            "My App",
            "Does things",
            vec!["AUTOMATION".to_string()],
            AppKind::Webhook {
                target_url: "https://example.com/webhook".to_string(),
            },
            true,
            false,
            CreateAppOptions::default(),
        );
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["appName"], "my.app");
        assert_eq!(json["appType"], "WEBHOOK_SMART_APP");
        assert_eq!(json["webhookSmartApp"]["targetUrl"], "https://example.com/webhook");
        assert_eq!(json["ui"]["dashboardCardsEnabled"], true);
        assert_eq!(json["iconImage"], serde_json::json!({}));
        assert_eq!(json["oauth"], serde_json::json!({}));
        assert!(json.get("singleInstance").is_none());
        assert!(json.get("principalType").is_none());
        assert!(json.get("lambdaSmartApp").is_none());
    }

    #[test]
    fn create_body_includes_present_options() {
        let opts = CreateAppOptions {
            single_instance: Some(true),
            icon_url: Some("https://example.com/icon.png".to_string()),
            client_name: Some("client".to_string()),
            scope: Some(vec!["r:devices:*".to_string()]),
            ..Default::default()
        };
        let body = create_body(
            "my.app",
            "My App",
            "Does things",
            vec![],
            AppKind::Lambda {
                functions: vec!["arn:aws:lambda:fn".to_string()],
            },
            false,
            false,
            opts,
        );
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["appType"], "LAMBDA_SMART_APP");
        assert_eq!(json["lambdaSmartApp"]["functions"][0], "arn:aws:lambda:fn");
        assert_eq!(json["singleInstance"], true);
        assert_eq!(json["iconImage"]["url"], "https://example.com/icon.png");
        assert_eq!(json["oauth"]["clientName"], "client");
        assert!(json.get("webhookSmartApp").is_none());
    }

    #[test]
    fn update_body_has_no_app_name_or_oauth() {
        let body = update_body(
            "My App",
            "Does things",
            vec![],
            AppKind::Webhook {
                target_url: "https://example.com/webhook".to_string(),
            },
            true,
            true,
            UpdateAppOptions::default(),
        );
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("appName").is_none());
        assert!(json.get("oauth").is_none());
    }
}
