//! Forecast interpretation: which period is "today" and how warm it is

pub mod period_selector;
pub mod temperature;

pub use period_selector::select_today;
pub use temperature::classify;
