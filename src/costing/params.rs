use serde::{Deserialize, Serialize};

use crate::costing::constants::*;
use crate::error::{CostError, Result};

/// Cost parameters as supplied by a caller. Absent fields fall back to defaults.
///
/// `null` in JSON is treated the same as a missing field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labor_cost_per_hour: Option<f64>,

    /// A percentage (15 means 15%), not a fraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overhead_percentage: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging_cost: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_margin_percentage: Option<f64>,
}

impl CostParameters {
    /// True when no field has been set.
    pub fn is_empty(&self) -> bool {
        self.labor_cost_per_hour.is_none()
            && self.overhead_percentage.is_none()
            && self.packaging_cost.is_none()
            && self.profit_margin_percentage.is_none()
    }

    /// Fill every unset field from `fallback`.
    pub fn or(self, fallback: CostParameters) -> Self {
        Self {
            labor_cost_per_hour: self.labor_cost_per_hour.or(fallback.labor_cost_per_hour),
            overhead_percentage: self.overhead_percentage.or(fallback.overhead_percentage),
            packaging_cost: self.packaging_cost.or(fallback.packaging_cost),
            profit_margin_percentage: self
                .profit_margin_percentage
                .or(fallback.profit_margin_percentage),
        }
    }

    /// Apply defaults to absent fields and reject negative or non-finite values.
    pub fn resolve(&self) -> Result<ResolvedParameters> {
        let resolved = ResolvedParameters {
            labor_cost_per_hour: self
                .labor_cost_per_hour
                .unwrap_or(DEFAULT_LABOR_COST_PER_HOUR),
            overhead_percentage: self
                .overhead_percentage
                .unwrap_or(DEFAULT_OVERHEAD_PERCENTAGE),
            packaging_cost: self.packaging_cost.unwrap_or(DEFAULT_PACKAGING_COST),
            profit_margin_percentage: self
                .profit_margin_percentage
                .unwrap_or(DEFAULT_PROFIT_MARGIN_PERCENTAGE),
        };
        resolved.validate()?;
        Ok(resolved)
    }
}

/// Cost parameters after defaults have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedParameters {
    pub labor_cost_per_hour: f64,
    pub overhead_percentage: f64,
    pub packaging_cost: f64,
    pub profit_margin_percentage: f64,
}

impl Default for ResolvedParameters {
    fn default() -> Self {
        Self {
            labor_cost_per_hour: DEFAULT_LABOR_COST_PER_HOUR,
            overhead_percentage: DEFAULT_OVERHEAD_PERCENTAGE,
            packaging_cost: DEFAULT_PACKAGING_COST,
            profit_margin_percentage: DEFAULT_PROFIT_MARGIN_PERCENTAGE,
        }
    }
}

impl ResolvedParameters {
    /// Field names match the wire format so errors point at what the caller sent.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("laborCostPerHour", self.labor_cost_per_hour),
            ("overheadPercentage", self.overhead_percentage),
            ("packagingCost", self.packaging_cost),
            ("profitMarginPercentage", self.profit_margin_percentage),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CostError::InvalidParameter { field, value });
            }
        }
        Ok(())
    }
}

impl From<ResolvedParameters> for CostParameters {
    fn from(resolved: ResolvedParameters) -> Self {
        Self {
            labor_cost_per_hour: Some(resolved.labor_cost_per_hour),
            overhead_percentage: Some(resolved.overhead_percentage),
            packaging_cost: Some(resolved.packaging_cost),
            profit_margin_percentage: Some(resolved.profit_margin_percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_empty_uses_defaults() {
        let resolved = CostParameters::default().resolve().unwrap();
        assert_eq!(resolved, ResolvedParameters::default());
        assert_eq!(resolved.labor_cost_per_hour, 25.0);
        assert_eq!(resolved.overhead_percentage, 15.0);
        assert_eq!(resolved.packaging_cost, 0.0);
        assert_eq!(resolved.profit_margin_percentage, 30.0);
    }

    #[test]
    fn test_resolve_keeps_supplied_fields() {
        let params = CostParameters {
            packaging_cost: Some(2.0),
            ..Default::default()
        };
        let resolved = params.resolve().unwrap();
        assert_eq!(resolved.packaging_cost, 2.0);
        assert_eq!(resolved.labor_cost_per_hour, DEFAULT_LABOR_COST_PER_HOUR);
    }

    #[test]
    fn test_resolve_rejects_negative() {
        let params = CostParameters {
            profit_margin_percentage: Some(-5.0),
            ..Default::default()
        };
        match params.resolve() {
            Err(CostError::InvalidParameter { field, value }) => {
                assert_eq!(field, "profitMarginPercentage");
                assert_eq!(value, -5.0);
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_rejects_nan() {
        let params = CostParameters {
            labor_cost_per_hour: Some(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            params.resolve(),
            Err(CostError::InvalidParameter {
                field: "laborCostPerHour",
                ..
            })
        ));
    }

    #[test]
    fn test_or_prefers_self() {
        let requested = CostParameters {
            overhead_percentage: Some(10.0),
            ..Default::default()
        };
        let saved = CostParameters {
            overhead_percentage: Some(20.0),
            packaging_cost: Some(1.5),
            ..Default::default()
        };
        let merged = requested.or(saved);
        assert_eq!(merged.overhead_percentage, Some(10.0));
        assert_eq!(merged.packaging_cost, Some(1.5));
        assert_eq!(merged.labor_cost_per_hour, None);
    }

    #[test]
    fn test_null_fields_deserialize_as_absent() {
        let json = r#"{"laborCostPerHour": null, "packagingCost": 2}"#;
        let params: CostParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.labor_cost_per_hour, None);
        assert_eq!(params.packaging_cost, Some(2.0));
    }
}
