// ✅ Validation Outcome - three severities, no exceptions
//
// Hard failure: valid=false, blocks the action
// Soft warning: valid=true with a cautionary message
// Silent pass:  valid=true, no message

use serde::{Deserialize, Serialize};

// ============================================================================
// SEVERITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the action
    Failure,
    /// Allowed, but the user should look twice
    Warning,
    /// Nothing to report
    Pass,
}

// ============================================================================
// VALIDATION OUTCOME
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ValidationOutcome {
    pub fn pass() -> Self {
        ValidationOutcome {
            valid: true,
            warning: None,
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        ValidationOutcome {
            valid: true,
            warning: Some(message.into()),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        ValidationOutcome {
            valid: false,
            warning: Some(message.into()),
        }
    }

    pub fn severity(&self) -> Severity {
        match (self.valid, &self.warning) {
            (false, _) => Severity::Failure,
            (true, Some(_)) => Severity::Warning,
            (true, None) => Severity::Pass,
        }
    }

    pub fn is_blocking(&self) -> bool {
        !self.valid
    }

    pub fn message(&self) -> Option<&str> {
        self.warning.as_deref()
    }
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self::pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        assert_eq!(ValidationOutcome::pass().severity(), Severity::Pass);
        assert_eq!(ValidationOutcome::warn("careful").severity(), Severity::Warning);
        assert_eq!(ValidationOutcome::fail("no").severity(), Severity::Failure);
    }

    #[test]
    fn test_pass_serializes_without_warning() {
        let json = serde_json::to_string(&ValidationOutcome::pass()).unwrap();
        assert_eq!(json, r#"{"valid":true}"#);

        let json = serde_json::to_string(&ValidationOutcome::fail("Datum ligt in het verleden")).unwrap();
        assert!(json.contains(r#""valid":false"#));
        assert!(json.contains("verleden"));
    }
}
