pub const DEFAULT_GRID_SIZE: usize = 1000;
pub const DEMOGRAPHIC_PARITY: &str = "demographic_parity";
pub const EQUALIZED_ODDS: &str = "equalized_odds";
pub const NEGATIVE_LABEL: f64 = 0.0;
pub const POSITIVE_LABEL: f64 = 1.0;
