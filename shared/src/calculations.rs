use serde::{Deserialize, Serialize};

use crate::models::{Amount, Ledger, Student, StudentId, Week};

/// Payment classification of a single ledger cell, used for display styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    PaidInFull,
    /// No fee is required and nothing was paid
    Free,
    /// No fee is required but something was paid anyway
    Voluntary,
}

impl PaymentStatus {
    pub fn css_class(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "status-unpaid",
            PaymentStatus::Partial => "status-partial",
            PaymentStatus::PaidInFull => "status-paid",
            PaymentStatus::Free => "status-free",
            PaymentStatus::Voluntary => "status-voluntary",
        }
    }
}

pub fn classify_payment(paid: Amount, required: Amount) -> PaymentStatus {
    if required == 0 {
        return if paid == 0 {
            PaymentStatus::Free
        } else {
            PaymentStatus::Voluntary
        };
    }
    if paid == 0 {
        PaymentStatus::Unpaid
    } else if paid >= required {
        PaymentStatus::PaidInFull
    } else {
        PaymentStatus::Partial
    }
}

// Amounts come from share links unchecked, so every total saturates at
// `Amount::MAX` instead of overflowing.

pub fn student_total(ledger: &Ledger, student_id: StudentId, week_count: Week) -> Amount {
    (1..=week_count)
        .map(|week| ledger.amount(student_id, week))
        .fold(0, Amount::saturating_add)
}

pub fn week_total(ledger: &Ledger, roster: &[Student], week: Week) -> Amount {
    roster
        .iter()
        .map(|student| ledger.amount(student.id, week))
        .fold(0, Amount::saturating_add)
}

/// Sum of all week totals; equal to the sum of all student totals
pub fn grand_total(ledger: &Ledger, roster: &[Student], week_count: Week) -> Amount {
    (1..=week_count)
        .map(|week| week_total(ledger, roster, week))
        .fold(0, Amount::saturating_add)
}

pub fn expected_total(roster_len: usize, week_count: Week, required: Amount) -> Amount {
    (roster_len as Amount)
        .saturating_mul(Amount::from(week_count))
        .saturating_mul(required)
}

/// Collected as a percentage of expected. Not clamped: overpayment exceeds 100.
pub fn collection_progress(collected: Amount, expected: Amount) -> f64 {
    if expected > 0 {
        collected as f64 / expected as f64 * 100.0
    } else {
        0.0
    }
}

/// Collection totals for the summary dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_collected: Amount,
    pub total_expected: Amount,
}

impl Summary {
    /// Amount still outstanding, never negative
    pub fn remaining(&self) -> Amount {
        self.total_expected.saturating_sub(self.total_collected)
    }

    pub fn progress_percent(&self) -> f64 {
        collection_progress(self.total_collected, self.total_expected)
    }

    /// Progress clamped to `[0, 100]` for the progress bar
    pub fn progress_bar_width(&self) -> f64 {
        self.progress_percent().clamp(0.0, 100.0)
    }
}
