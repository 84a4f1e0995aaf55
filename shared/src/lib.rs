pub mod calculations;
pub mod config;
pub mod controller;
pub mod format;
pub mod input;
pub mod models;
pub mod share_codec;

pub use calculations::{
    classify_payment, collection_progress, expected_total, grand_total, student_total,
    week_total, PaymentStatus, Summary,
};
pub use config::{DashboardConfig, MAX_WEEKS};
pub use controller::{SessionCommand, SessionController};
pub use models::{Amount, Ledger, Mode, Session, SessionConfig, Student, StudentId, Week};
pub use share_codec::{DecodeError, EncodeError, SharedState};
