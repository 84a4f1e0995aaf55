use log::{debug, info, warn};

use crate::calculations::{self, PaymentStatus, Summary};
use crate::config::DashboardConfig;
use crate::models::{Amount, Ledger, Mode, Session, SessionConfig, Student, StudentId, Week};
use crate::share_codec::{self, DecodeError, EncodeError};

/// A user intent forwarded from the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    SetPayment {
        student_id: StudentId,
        week: Week,
        amount: i64,
    },
    RenameStudent {
        student_id: StudentId,
        name: String,
    },
    PayAllForStudent(StudentId),
    PayAllForWeek(Week),
    SetWeekCount(i64),
    SetRequiredAmount(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionController {
    session: Session,
    settings: DashboardConfig,
}

impl SessionController {
    /// Default session in admin mode
    pub fn new(settings: DashboardConfig) -> Self {
        let session = Session::with_defaults(&settings);
        Self { session, settings }
    }

    /// Build the session for the current location fragment.
    ///
    /// A fragment carrying a share token that decodes cleanly yields a
    /// read-only session. No token, or any decode failure, yields the default
    /// admin session.
    pub fn initialize(settings: DashboardConfig, location_hash: Option<&str>) -> Self {
        let token = location_hash
            .and_then(|hash| share_codec::token_from_location(hash, &settings.view_route));

        let Some(token) = token else {
            info!("No share token in location, starting with default session");
            return Self::new(settings);
        };

        match Self::from_token(settings.clone(), token) {
            Ok(controller) => controller,
            Err(e) => {
                warn!("Ignoring share token, falling back to default session: {}", e);
                Self::new(settings)
            }
        }
    }

    /// Adopt a shared snapshot in read-only viewer mode
    pub fn from_token(settings: DashboardConfig, token: &str) -> Result<Self, DecodeError> {
        let shared = share_codec::decode(token)?;
        info!(
            "Loaded shared session: {} students, {} weeks, {} per week",
            shared.roster.len(),
            shared.config.week_count,
            shared.config.required_amount
        );
        Ok(Self {
            session: Session {
                config: shared.config,
                roster: shared.roster,
                ledger: shared.ledger,
                mode: Mode::ReadOnlyViewer,
            },
            settings,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &DashboardConfig {
        &self.settings
    }

    pub fn mode(&self) -> Mode {
        self.session.mode
    }

    pub fn is_viewer(&self) -> bool {
        self.session.mode == Mode::ReadOnlyViewer
    }

    pub fn config(&self) -> SessionConfig {
        self.session.config
    }

    pub fn roster(&self) -> &[Student] {
        &self.session.roster
    }

    pub fn ledger(&self) -> &Ledger {
        &self.session.ledger
    }

    /// Apply a command, returning whether the session changed
    pub fn apply(&mut self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::SetPayment { student_id, week, amount } => {
                self.set_payment(student_id, week, amount)
            }
            SessionCommand::RenameStudent { student_id, name } => {
                self.rename_student(student_id, &name)
            }
            SessionCommand::PayAllForStudent(student_id) => self.pay_all_for_student(student_id),
            SessionCommand::PayAllForWeek(week) => self.pay_all_for_week(week),
            SessionCommand::SetWeekCount(count) => self.set_week_count(count),
            SessionCommand::SetRequiredAmount(amount) => self.set_required_amount(amount),
        }
    }

    fn ensure_editable(&self, command: &str) -> bool {
        if self.is_viewer() {
            debug!("Ignoring {} in read-only viewer mode", command);
            return false;
        }
        true
    }

    /// Store a payment, clamping negative amounts to zero.
    ///
    /// The week is not checked against the week count; entries past it are
    /// kept but never displayed or summed.
    pub fn set_payment(&mut self, student_id: StudentId, week: Week, amount: i64) -> bool {
        if !self.ensure_editable("set_payment") {
            return false;
        }
        let amount = clamp_amount(amount);
        self.session.ledger.set(student_id, week, amount);
        true
    }

    /// Rename a student. Blank names and unknown ids are ignored.
    pub fn rename_student(&mut self, student_id: StudentId, name: &str) -> bool {
        if !self.ensure_editable("rename_student") {
            return false;
        }
        if name.trim().is_empty() {
            debug!("Ignoring blank name for student {}", student_id);
            return false;
        }
        match self.session.roster.iter_mut().find(|student| student.id == student_id) {
            Some(student) => {
                student.name = name.to_string();
                true
            }
            None => {
                debug!("Ignoring rename of unknown student {}", student_id);
                false
            }
        }
    }

    /// Mark every active week as paid in full for one student
    pub fn pay_all_for_student(&mut self, student_id: StudentId) -> bool {
        if !self.ensure_editable("pay_all_for_student") {
            return false;
        }
        let config = self.session.config;
        if config.required_amount == 0 {
            debug!("No fee required, pay-all for student {} skipped", student_id);
            return false;
        }
        self.session
            .ledger
            .set_weeks(student_id, config.weeks(), config.required_amount);
        true
    }

    /// Mark one week as paid in full for every student on the roster
    pub fn pay_all_for_week(&mut self, week: Week) -> bool {
        if !self.ensure_editable("pay_all_for_week") {
            return false;
        }
        let required_amount = self.session.config.required_amount;
        if required_amount == 0 {
            debug!("No fee required, pay-all for week {} skipped", week);
            return false;
        }
        let Session { roster, ledger, .. } = &mut self.session;
        for student in roster.iter() {
            ledger.set(student.id, week, required_amount);
        }
        true
    }

    /// Set the number of tracked weeks, clamped to `[1, max_weeks]`.
    /// Ledger entries past the new count are retained.
    pub fn set_week_count(&mut self, count: i64) -> bool {
        if !self.ensure_editable("set_week_count") {
            return false;
        }
        let week_count = self.settings.clamp_week_count(count);
        let changed = self.session.config.week_count != week_count;
        self.session.config.week_count = week_count;
        changed
    }

    pub fn set_required_amount(&mut self, amount: i64) -> bool {
        if !self.ensure_editable("set_required_amount") {
            return false;
        }
        let amount = clamp_amount(amount);
        let changed = self.session.config.required_amount != amount;
        self.session.config.required_amount = amount;
        changed
    }

    /// Token for the current session, built fresh on every call
    pub fn share_token(&self) -> Result<String, EncodeError> {
        share_codec::encode(&self.session.config, &self.session.roster, &self.session.ledger)
    }

    /// Read-only link for the current session at `<origin><path>`
    pub fn generate_share_link(&self, origin: &str, path: &str) -> Result<String, EncodeError> {
        let token = self.share_token()?;
        Ok(share_codec::share_link(origin, path, &self.settings.view_route, &token))
    }

    pub fn amount(&self, student_id: StudentId, week: Week) -> Amount {
        self.session.ledger.amount(student_id, week)
    }

    pub fn payment_status(&self, student_id: StudentId, week: Week) -> PaymentStatus {
        calculations::classify_payment(
            self.amount(student_id, week),
            self.session.config.required_amount,
        )
    }

    pub fn student_total(&self, student_id: StudentId) -> Amount {
        calculations::student_total(
            &self.session.ledger,
            student_id,
            self.session.config.week_count,
        )
    }

    pub fn week_total(&self, week: Week) -> Amount {
        calculations::week_total(&self.session.ledger, &self.session.roster, week)
    }

    pub fn grand_total(&self) -> Amount {
        calculations::grand_total(
            &self.session.ledger,
            &self.session.roster,
            self.session.config.week_count,
        )
    }

    pub fn summary(&self) -> Summary {
        let config = self.session.config;
        Summary {
            total_collected: self.grand_total(),
            total_expected: calculations::expected_total(
                self.session.roster.len(),
                config.week_count,
                config.required_amount,
            ),
        }
    }
}

fn clamp_amount(amount: i64) -> Amount {
    Amount::try_from(amount).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> SessionController {
        SessionController::new(DashboardConfig::default())
    }

    fn viewer() -> SessionController {
        let source = admin();
        let token = source.share_token().unwrap();
        SessionController::from_token(DashboardConfig::default(), &token).unwrap()
    }

    #[test]
    fn test_set_payment_clamps_negative_amounts() {
        let mut controller = admin();
        controller.set_payment(1, 2, -5);
        assert_eq!(controller.amount(1, 2), 0);

        controller.set_payment(1, 2, 5);
        assert_eq!(controller.amount(1, 2), 5);
        controller.set_payment(1, 2, -5);
        assert_eq!(controller.amount(1, 2), 0);
    }

    #[test]
    fn test_set_payment_out_of_range_week_is_hidden() {
        let mut controller = admin();
        assert!(controller.set_payment(1, 30, 20));
        assert_eq!(controller.amount(1, 30), 20);
        assert_eq!(controller.student_total(1), 0);
        assert_eq!(controller.summary().total_collected, 0);
    }

    #[test]
    fn test_rename_student() {
        let mut controller = admin();
        let before = controller.roster().to_vec();

        assert!(!controller.rename_student(3, ""));
        assert!(!controller.rename_student(3, "  "));
        assert_eq!(controller.roster(), before.as_slice());

        assert!(controller.rename_student(3, "Alice"));
        for (student, original) in controller.roster().iter().zip(&before) {
            if student.id == 3 {
                assert_eq!(student.name, "Alice");
            } else {
                assert_eq!(student, original);
            }
        }

        assert!(!controller.rename_student(999, "Nobody"));
    }

    #[test]
    fn test_pay_all_for_student_and_week() {
        let mut controller = admin();
        controller.set_week_count(3);
        controller.set_required_amount(20);
        controller.set_payment(5, 2, 7);

        assert!(controller.pay_all_for_student(5));
        for week in 1..=3 {
            assert_eq!(controller.amount(5, week), 20);
        }
        assert_eq!(controller.amount(5, 4), 0);

        controller.set_payment(6, 2, 3);
        assert!(controller.pay_all_for_week(2));
        for student in controller.roster() {
            assert_eq!(controller.amount(student.id, 2), 20);
        }
    }

    #[test]
    fn test_pay_all_skipped_without_requirement() {
        let mut controller = admin();
        controller.set_required_amount(0);
        assert!(!controller.pay_all_for_student(1));
        assert!(!controller.pay_all_for_week(1));
        assert_eq!(controller.ledger(), &Ledger::new());
    }

    #[test]
    fn test_week_count_clamps_and_keeps_hidden_values() {
        let mut controller = admin();
        for week in 4..=8 {
            controller.set_payment(2, week, i64::from(week) * 10);
        }

        controller.set_week_count(3);
        assert_eq!(controller.config().week_count, 3);
        assert_eq!(controller.student_total(2), 0);

        controller.set_week_count(8);
        for week in 4..=8 {
            assert_eq!(controller.amount(2, week), u64::from(week) * 10);
        }
        assert_eq!(controller.student_total(2), 300);

        controller.set_week_count(0);
        assert_eq!(controller.config().week_count, 1);
        controller.set_week_count(500);
        assert_eq!(controller.config().week_count, 52);
    }

    #[test]
    fn test_set_required_amount_clamps() {
        let mut controller = admin();
        controller.set_required_amount(-10);
        assert_eq!(controller.config().required_amount, 0);
        controller.set_required_amount(35);
        assert_eq!(controller.config().required_amount, 35);
    }

    #[test]
    fn test_viewer_mode_ignores_every_command() {
        let mut controller = viewer();
        let before = controller.session().clone();

        let commands = vec![
            SessionCommand::SetPayment { student_id: 1, week: 1, amount: 20 },
            SessionCommand::RenameStudent { student_id: 1, name: "Alice".to_string() },
            SessionCommand::PayAllForStudent(1),
            SessionCommand::PayAllForWeek(1),
            SessionCommand::SetWeekCount(3),
            SessionCommand::SetRequiredAmount(50),
        ];
        for command in commands {
            assert!(!controller.apply(command));
        }
        assert_eq!(controller.session(), &before);
    }

    #[test]
    fn test_default_session_pay_week_one() {
        let mut controller = admin();
        assert!(controller.apply(SessionCommand::PayAllForWeek(1)));

        assert_eq!(controller.week_total(1), 800);
        let summary = controller.summary();
        assert_eq!(summary.total_collected, 800);
        assert_eq!(summary.total_expected, 6400);
        assert_eq!(summary.remaining(), 5600);
        assert_eq!(summary.progress_percent(), 12.5);
    }

    #[test]
    fn test_share_link_reflects_current_session() {
        let mut controller = admin();
        controller.rename_student(2, "Alice");
        controller.set_payment(2, 3, 15);

        let link = controller.generate_share_link("https://fees.example", "/").unwrap();
        let token = link.strip_prefix("https://fees.example/#/view/").unwrap();

        let shared = SessionController::initialize(
            DashboardConfig::default(),
            Some(&format!("#/view/{}", token)),
        );
        assert_eq!(shared.mode(), Mode::ReadOnlyViewer);
        assert_eq!(shared.roster()[1], Student { id: 2, name: "Alice".to_string() });
        assert_eq!(shared.amount(2, 3), 15);
        assert_eq!(shared.roster(), controller.roster());
        assert_eq!(shared.ledger(), controller.ledger());

        controller.set_payment(4, 1, 9);
        let newer = controller.generate_share_link("https://fees.example", "/").unwrap();
        assert_ne!(newer, link);
    }

    #[test]
    fn test_huge_shared_fee_does_not_overflow_summary() {
        let roster = vec![
            Student { id: 1, name: "A".to_string() },
            Student { id: 2, name: "B".to_string() },
        ];
        let config = SessionConfig { week_count: 8, required_amount: Amount::MAX };
        let token = share_codec::encode(&config, &roster, &Ledger::new()).unwrap();

        let controller = SessionController::initialize(
            DashboardConfig::default(),
            Some(&format!("#/view/{}", token)),
        );
        assert_eq!(controller.mode(), Mode::ReadOnlyViewer);
        let summary = controller.summary();
        assert_eq!(summary.total_expected, Amount::MAX);
        assert_eq!(summary.total_collected, 0);
        assert_eq!(summary.remaining(), Amount::MAX);
    }

    #[test]
    fn test_huge_payments_saturate_totals() {
        let mut controller = admin();
        for student_id in 1..=3 {
            controller.set_payment(student_id, 1, i64::MAX);
        }
        assert_eq!(controller.amount(1, 1), i64::MAX as Amount);
        assert_eq!(controller.week_total(1), Amount::MAX);
        assert_eq!(controller.grand_total(), Amount::MAX);
        assert_eq!(controller.summary().total_collected, Amount::MAX);
    }

    #[test]
    fn test_initialize_without_token_is_default_admin() {
        for hash in [None, Some(""), Some("#/"), Some("#/view/")] {
            let controller = SessionController::initialize(DashboardConfig::default(), hash);
            assert_eq!(controller, admin());
        }
    }

    #[test]
    fn test_initialize_with_bad_token_falls_back_to_defaults() {
        let good = admin().share_token().unwrap();
        let bad_tokens = vec![
            "%%%".to_string(),
            "bm90IGpzb24=".to_string(), // "not json"
            good[..good.len() / 2].to_string(),
            format!("{}x", good),
        ];
        for token in bad_tokens {
            let controller = SessionController::initialize(
                DashboardConfig::default(),
                Some(&format!("#/view/{}", token)),
            );
            assert_eq!(controller.mode(), Mode::Admin);
            assert_eq!(controller, admin());
        }
    }
}
