//! Renders the cloudflared YAML configuration from the persisted
//! document.
//!
//! A disabled (or empty) document renders a parked configuration that
//! keeps the daemon answerable: tunnel `disabled`, single catch-all
//! returning 503. An enabled document renders one ingress entry per
//! enabled rule that has both a hostname and a target URL, terminated
//! by the mandatory 404 catch-all.

use serde::Serialize;

use cfd_mgr_common::{CfdError, CfdResult};
use cfd_settings::{ConfigDocument, TunnelRule};

/// Credentials file the daemon reads in config mode.
pub const CREDENTIALS_FILE: &str = "/usr/local/etc/cloudflared/cert.pem";

/// Tunnel name used when the document does not set one.
pub const DEFAULT_TUNNEL_NAME: &str = "cloudflared-tunnel";

/// Tunnel placeholder for the parked configuration.
pub const DISABLED_TUNNEL: &str = "disabled";

/// Catch-all service for the parked configuration.
const PARKED_SERVICE: &str = "http_status:503";

/// Mandatory final catch-all for an active configuration.
const CATCH_ALL_SERVICE: &str = "http_status:404";

/// Origin request options on an ingress entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OriginRequest {
    #[serde(rename = "noTLSVerify")]
    pub no_tls_verify: bool,
}

/// One entry of the daemon's ingress list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngressEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub service: String,
    #[serde(rename = "originRequest", skip_serializing_if = "Option::is_none")]
    pub origin_request: Option<OriginRequest>,
}

impl IngressEntry {
    fn catch_all(service: &str) -> Self {
        Self {
            hostname: None,
            service: service.to_string(),
            origin_request: None,
        }
    }
}

/// The daemon configuration file shape (config mode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaemonConfig {
    pub tunnel: String,
    #[serde(rename = "credentials-file")]
    pub credentials_file: String,
    pub ingress: Vec<IngressEntry>,
}

fn ingress_entry(rule: &TunnelRule) -> Option<IngressEntry> {
    if !rule.enabled || rule.hostname.is_empty() {
        return None;
    }
    let url = rule.url.as_deref().filter(|u| !u.is_empty())?;

    // HTTP origins behind the tunnel commonly present no usable TLS;
    // mark them so the daemon skips origin verification.
    let origin_request = match rule.service.as_str() {
        "http" | "https" => Some(OriginRequest {
            no_tls_verify: url.starts_with("http://"),
        }),
        _ => None,
    };

    Some(IngressEntry {
        hostname: Some(rule.hostname.clone()),
        service: url.to_string(),
        origin_request,
    })
}

/// Builds the daemon configuration from the document.
pub fn render_config(doc: &ConfigDocument) -> DaemonConfig {
    if !doc.general.enabled {
        return DaemonConfig {
            tunnel: DISABLED_TUNNEL.to_string(),
            credentials_file: CREDENTIALS_FILE.to_string(),
            ingress: vec![IngressEntry::catch_all(PARKED_SERVICE)],
        };
    }

    let tunnel = if doc.general.tunnel_name.is_empty() {
        DEFAULT_TUNNEL_NAME.to_string()
    } else {
        doc.general.tunnel_name.clone()
    };

    let mut ingress: Vec<IngressEntry> =
        doc.tunnels.iter().filter_map(ingress_entry).collect();
    ingress.push(IngressEntry::catch_all(CATCH_ALL_SERVICE));

    DaemonConfig {
        tunnel,
        credentials_file: CREDENTIALS_FILE.to_string(),
        ingress,
    }
}

/// Serializes the configuration to YAML.
pub fn to_yaml(config: &DaemonConfig) -> CfdResult<String> {
    serde_yaml::to_string(config).map_err(|e| CfdError::render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use cfd_settings::{GeneralSettings, Record, TunnelRuleFields};
    use uuid::Uuid;

    fn rule(hostname: &str, service: &str, url: Option<&str>, enabled: bool) -> TunnelRule {
        let mut fields = TunnelRuleFields::new(hostname, service).with_enabled(enabled);
        fields.url = url.map(|u| u.to_string());
        TunnelRule::create(Uuid::new_v4(), &fields)
    }

    fn enabled_doc(tunnels: Vec<TunnelRule>) -> ConfigDocument {
        ConfigDocument {
            general: GeneralSettings {
                enabled: true,
                tunnel_name: "edge".to_string(),
                ..GeneralSettings::default()
            },
            tunnels,
        }
    }

    #[test]
    fn test_disabled_document_renders_parked_config() {
        let config = render_config(&ConfigDocument::default());
        assert_eq!(config.tunnel, "disabled");
        assert_eq!(config.ingress.len(), 1);
        assert_eq!(config.ingress[0].service, "http_status:503");
    }

    #[test]
    fn test_enabled_document_renders_rules_and_catch_all() {
        let doc = enabled_doc(vec![
            rule("a.example.com", "https", Some("https://10.0.0.1:8443"), true),
            rule("b.example.com", "http", Some("http://10.0.0.2"), true),
        ]);

        let config = render_config(&doc);
        assert_eq!(config.tunnel, "edge");
        assert_eq!(config.credentials_file, CREDENTIALS_FILE);
        assert_eq!(config.ingress.len(), 3);

        assert_eq!(config.ingress[0].hostname.as_deref(), Some("a.example.com"));
        assert_eq!(config.ingress[0].service, "https://10.0.0.1:8443");
        assert_eq!(
            config.ingress[0].origin_request,
            Some(OriginRequest {
                no_tls_verify: false
            })
        );

        // Plain-http origin skips TLS verification
        assert_eq!(
            config.ingress[1].origin_request,
            Some(OriginRequest {
                no_tls_verify: true
            })
        );

        let last = config.ingress.last().unwrap();
        assert_eq!(last.hostname, None);
        assert_eq!(last.service, "http_status:404");
    }

    #[test]
    fn test_disabled_and_incomplete_rules_are_skipped() {
        let doc = enabled_doc(vec![
            rule("off.example.com", "http", Some("http://10.0.0.1"), false),
            rule("nourl.example.com", "http", None, true),
            rule("ok.example.com", "http", Some("http://10.0.0.2"), true),
        ]);

        let config = render_config(&doc);
        // One surviving rule plus the catch-all
        assert_eq!(config.ingress.len(), 2);
        assert_eq!(
            config.ingress[0].hostname.as_deref(),
            Some("ok.example.com")
        );
    }

    #[test]
    fn test_non_http_service_has_no_origin_request() {
        let doc = enabled_doc(vec![rule(
            "ssh.example.com",
            "tcp",
            Some("tcp://10.0.0.3:22"),
            true,
        )]);

        let config = render_config(&doc);
        assert_eq!(config.ingress[0].origin_request, None);
    }

    #[test]
    fn test_default_tunnel_name() {
        let doc = ConfigDocument {
            general: GeneralSettings {
                enabled: true,
                ..GeneralSettings::default()
            },
            tunnels: Vec::new(),
        };
        assert_eq!(render_config(&doc).tunnel, DEFAULT_TUNNEL_NAME);
    }

    #[test]
    fn test_yaml_field_names() {
        let yaml = to_yaml(&render_config(&enabled_doc(vec![rule(
            "a.example.com",
            "http",
            Some("http://10.0.0.1"),
            true,
        )])))
        .unwrap();

        assert!(yaml.contains("tunnel: edge"));
        assert!(yaml.contains("credentials-file: /usr/local/etc/cloudflared/cert.pem"));
        assert!(yaml.contains("hostname: a.example.com"));
        assert!(yaml.contains("originRequest:"));
        assert!(yaml.contains("noTLSVerify: true"));
        assert!(yaml.contains("service: http_status:404"));
    }
}
