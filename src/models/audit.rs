//! Audit trace models.
//!
//! Every proposal carries a record of the calculation decisions that produced
//! it, so a sales representative can explain each figure to the customer.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The plan tier the step applies to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_id: Option<String>,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag figures that are valid but worth pointing out to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a proposal.
///
/// # Example
///
/// ```
/// use home_plan_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_step_omits_missing_tier() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "tax_deduction".to_string(),
            rule_name: "Mortgage Tax Deduction".to_string(),
            tier_id: None,
            input: serde_json::json!({"loan_principal": 40800000.0}),
            output: serde_json::json!({"total_return": 3112385.0}),
            reasoning: "13 years projected".to_string(),
        };
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"rule_id\":\"tax_deduction\""));
        assert!(!json.contains("tier_id"));
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning::new("ZERO_RATE", "straight-line repayment used", "low");
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"ZERO_RATE\""));
        assert!(json.contains("\"severity\":\"low\""));
    }

    #[test]
    fn test_audit_trace_round_trips() {
        let trace = AuditTrace {
            steps: vec![AuditStep {
                step_number: 1,
                rule_id: "fee_adjustment".to_string(),
                rule_name: "Fee Adjustment".to_string(),
                tier_id: Some("premium".to_string()),
                input: serde_json::json!({"building": 3000.0}),
                output: serde_json::json!({"fees": 295.0}),
                reasoning: "280 + 15 = 295".to_string(),
            }],
            warnings: vec![],
            duration_us: 42,
        };
        let json = serde_json::to_string(&trace).unwrap();
        let parsed: AuditTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, trace);
    }
}
