/// Default hourly labor rate.
pub const DEFAULT_LABOR_COST_PER_HOUR: f64 = 25.0;

/// Default overhead, as a percentage of ingredient cost.
pub const DEFAULT_OVERHEAD_PERCENTAGE: f64 = 15.0;

/// Default fixed packaging cost per batch.
pub const DEFAULT_PACKAGING_COST: f64 = 0.0;

/// Default profit margin applied on top of cost per unit.
pub const DEFAULT_PROFIT_MARGIN_PERCENTAGE: f64 = 30.0;

pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Decimal places used when presenting money.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Finest rounding offered; beyond this `f64` carries no useful digits for money.
pub const MAX_DISPLAY_DECIMALS: u32 = 12;
