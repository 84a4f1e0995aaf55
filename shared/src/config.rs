use serde::{Deserialize, Serialize};

/// Upper bound on the number of tracked weeks, keeps the payment table small.
pub const MAX_WEEKS: u32 = 52;

/// Configuration for the fee dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    pub default_week_count: u32,
    pub max_weeks: u32,
    pub default_required_amount: u64,
    pub default_roster_size: u32,
    /// Default students are named "<prefix> <n>"
    pub default_student_name_prefix: String,
    /// Location fragment prefix that marks a read-only share token
    pub view_route: String,
    pub copy_ack_duration_ms: u32,
    pub currency_symbol: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_week_count: 8,
            max_weeks: MAX_WEEKS,
            default_required_amount: 20,
            default_roster_size: 40,
            default_student_name_prefix: "นักเรียนคนที่".to_string(),
            view_route: "#/view/".to_string(),
            copy_ack_duration_ms: 2000,
            currency_symbol: "฿".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Clamp a requested week count into `[1, max_weeks]`
    pub fn clamp_week_count(&self, count: i64) -> u32 {
        count.clamp(1, i64::from(self.max_weeks.max(1))) as u32
    }
}
