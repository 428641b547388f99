//! Tunnel rule record type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::Record;

fn default_true() -> bool {
    true
}

/// One ingress mapping for the tunnel daemon: a public hostname routed
/// to a local service target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelRule {
    /// Unique identifier, assigned at creation, immutable afterwards.
    pub id: Uuid,

    /// Public hostname routed through the tunnel.
    pub hostname: String,

    /// Local service type/target.
    pub service: String,

    /// Optional auxiliary target URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Whether the rule participates in the rendered daemon config.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl TunnelRule {
    /// Field names the search operation may match against.
    pub const SEARCH_FIELDS: [&'static str; 4] = ["hostname", "service", "url", "enabled"];
}

/// Write-side field set for a tunnel rule (form submission shape).
///
/// `None` fields take their defaults on create and clear the value on
/// update; validation sees missing and empty identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TunnelRuleFields {
    pub hostname: Option<String>,
    pub service: Option<String>,
    pub url: Option<String>,
    pub enabled: Option<bool>,
}

impl TunnelRuleFields {
    /// Create a field set with hostname and service set.
    pub fn new(hostname: &str, service: &str) -> Self {
        Self {
            hostname: Some(hostname.to_string()),
            service: Some(service.to_string()),
            url: None,
            enabled: None,
        }
    }

    /// Set the target URL (builder pattern).
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Set the enabled flag (builder pattern).
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }
}

impl Record for TunnelRule {
    type Fields = TunnelRuleFields;

    fn create(id: Uuid, fields: &TunnelRuleFields) -> Self {
        Self {
            id,
            hostname: fields.hostname.clone().unwrap_or_default(),
            service: fields.service.clone().unwrap_or_default(),
            url: fields.url.clone().filter(|u| !u.is_empty()),
            enabled: fields.enabled.unwrap_or(true),
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply(&mut self, fields: &TunnelRuleFields) {
        self.hostname = fields.hostname.clone().unwrap_or_default();
        self.service = fields.service.clone().unwrap_or_default();
        self.url = fields.url.clone().filter(|u| !u.is_empty());
        self.enabled = fields.enabled.unwrap_or(true);
    }

    fn template() -> TunnelRuleFields {
        TunnelRuleFields {
            hostname: Some(String::new()),
            service: Some(String::new()),
            url: None,
            enabled: Some(true),
        }
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            "hostname" => Some(self.hostname.clone()),
            "service" => Some(self.service.clone()),
            "url" => self.url.clone(),
            "enabled" => Some(if self.enabled { "1" } else { "0" }.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_builder() {
        let fields = TunnelRuleFields::new("app.example.com", "https")
            .with_url("http://127.0.0.1:8080")
            .with_enabled(false);

        assert_eq!(fields.hostname.as_deref(), Some("app.example.com"));
        assert_eq!(fields.service.as_deref(), Some("https"));
        assert_eq!(fields.url.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(fields.enabled, Some(false));
    }

    #[test]
    fn test_create_applies_defaults() {
        let id = Uuid::new_v4();
        let rule = TunnelRule::create(id, &TunnelRuleFields::new("app.example.com", "http"));

        assert_eq!(rule.id, id);
        assert!(rule.enabled);
        assert_eq!(rule.url, None);
    }

    #[test]
    fn test_apply_keeps_id() {
        let id = Uuid::new_v4();
        let mut rule = TunnelRule::create(id, &TunnelRuleFields::new("old.example.com", "http"));

        rule.apply(&TunnelRuleFields::new("new.example.com", "https"));
        assert_eq!(rule.id, id);
        assert_eq!(rule.hostname, "new.example.com");
        assert_eq!(rule.service, "https");
    }

    #[test]
    fn test_empty_url_normalizes_to_none() {
        let fields = TunnelRuleFields::new("app.example.com", "http").with_url("");
        let rule = TunnelRule::create(Uuid::new_v4(), &fields);
        assert_eq!(rule.url, None);
    }

    #[test]
    fn test_field_text_projection() {
        let rule = TunnelRule::create(
            Uuid::new_v4(),
            &TunnelRuleFields::new("app.example.com", "https").with_enabled(false),
        );

        assert_eq!(rule.field_text("hostname").as_deref(), Some("app.example.com"));
        assert_eq!(rule.field_text("enabled").as_deref(), Some("0"));
        assert_eq!(rule.field_text("url"), None);
        assert_eq!(rule.field_text("nonexistent"), None);
    }

    #[test]
    fn test_rule_deserializes_enabled_default() {
        let rule: TunnelRule = serde_json::from_str(
            r#"{"id": "8c0e0f3e-1b2a-4c3d-9e8f-001122334455",
                "hostname": "app.example.com",
                "service": "http"}"#,
        )
        .unwrap();
        assert!(rule.enabled);
        assert_eq!(rule.url, None);
    }
}
