use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::DashboardConfig;

pub type StudentId = u32;
/// 1-indexed week number
pub type Week = u32;
/// Non-negative amount paid, in whole currency units
pub type Amount = u64;

/// A student on the class roster. Identity is `id`; `name` is display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
}

impl Student {
    /// Build the default roster: ids `1..=size`, named "<prefix> <id>"
    pub fn default_roster(size: u32, name_prefix: &str) -> Vec<Student> {
        (1..=size)
            .map(|id| Student {
                id,
                name: format!("{} {}", name_prefix, id),
            })
            .collect()
    }
}

/// Sparse record of amounts paid, keyed by student then by week.
///
/// A missing `(student, week)` entry reads as zero. Each student's weeks sit
/// behind an `Arc` so cloning the ledger is cheap and a write only copies the
/// one student map it touches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: BTreeMap<StudentId, Arc<BTreeMap<Week, Amount>>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(&self, student_id: StudentId, week: Week) -> Amount {
        self.entries
            .get(&student_id)
            .and_then(|weeks| weeks.get(&week))
            .copied()
            .unwrap_or(0)
    }

    /// Store an amount, creating the student's entry if needed
    pub fn set(&mut self, student_id: StudentId, week: Week, amount: Amount) {
        let weeks = self.entries.entry(student_id).or_default();
        Arc::make_mut(weeks).insert(week, amount);
    }

    /// Store the same amount for every week in `weeks`
    pub fn set_weeks(
        &mut self,
        student_id: StudentId,
        weeks: impl IntoIterator<Item = Week>,
        amount: Amount,
    ) {
        let entry = Arc::make_mut(self.entries.entry(student_id).or_default());
        for week in weeks {
            entry.insert(week, amount);
        }
    }
}

/// Week count and per-week fee for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub week_count: Week,
    pub required_amount: Amount,
}

impl SessionConfig {
    /// Active weeks, `1..=week_count`
    pub fn weeks(&self) -> std::ops::RangeInclusive<Week> {
        1..=self.week_count
    }
}

/// Whether the session accepts edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Admin,
    /// Reconstructed from a share link; every mutating command is ignored
    ReadOnlyViewer,
}

/// The full live state of the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub config: SessionConfig,
    /// Display order is insertion order
    pub roster: Vec<Student>,
    pub ledger: Ledger,
    pub mode: Mode,
}

impl Session {
    /// Default roster, default configuration, empty ledger, admin mode
    pub fn with_defaults(settings: &DashboardConfig) -> Self {
        Self {
            config: SessionConfig {
                week_count: settings.clamp_week_count(i64::from(settings.default_week_count)),
                required_amount: settings.default_required_amount,
            },
            roster: Student::default_roster(
                settings.default_roster_size,
                &settings.default_student_name_prefix,
            ),
            ledger: Ledger::new(),
            mode: Mode::Admin,
        }
    }
}
