//! Write-time schema for tunnel rules.

use crate::model::{TunnelRule, TunnelRuleFields};
use crate::repository::{ValidationErrors, Validator};

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

/// Schema for [`TunnelRule`] writes: `hostname` and `service` must be
/// non-empty while the rule is enabled. Disabled rules may be saved
/// half-filled. The storage layer never enforces this; only writes do.
pub struct TunnelRuleValidator;

impl Validator<TunnelRule> for TunnelRuleValidator {
    fn validate(&self, fields: &TunnelRuleFields) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        // Missing fields default to enabled=true at create time, so an
        // absent flag validates like an enabled rule.
        if fields.enabled.unwrap_or(true) {
            if is_blank(fields.hostname.as_deref()) {
                errors
                    .entry("hostname".to_string())
                    .or_default()
                    .push("A hostname is required for an enabled rule".to_string());
            }
            if is_blank(fields.service.as_deref()) {
                errors
                    .entry("service".to_string())
                    .or_default()
                    .push("A service is required for an enabled rule".to_string());
            }
        }

        errors
    }
}
