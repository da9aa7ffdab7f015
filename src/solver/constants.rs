// Configuration constants for the solver module
pub const EPSILON: f64 = 1e-6;
pub const DEFAULT_GOAL: f64 = 24.0;
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;
