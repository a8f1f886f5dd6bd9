pub mod breakdown;
pub mod calculations;
pub mod constants;
pub mod params;

pub use breakdown::{CostBreakdown, CostReport, LineCost, round_to};
pub use calculations::{compute_cost, labor_cost, line_cost, overhead_cost, suggested_price};
pub use constants::*;
pub use params::{CostParameters, ResolvedParameters};
