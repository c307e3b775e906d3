//! Field-level validation for users and employments.
//!
//! # Responsibility
//! - Check structural and cross-field correctness of submitted records.
//! - Collect every violation instead of stopping at the first one.
//!
//! # Invariants
//! - Functions are pure: no storage access, no logging.
//! - Messages are prefixed with the record position and kept in input order.
//! - One message per violated rule.

use crate::model::employment::Employment;
use crate::model::user::{User, UserId};
use crate::model::UNSET_ID;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Outcome of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Human-readable violations in input order.
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All messages joined with `", "`.
    pub fn summary(&self) -> String {
        self.errors.join(", ")
    }

    /// Splits the report into `(is_valid, errors)`.
    pub fn into_parts(self) -> (bool, Vec<String>) {
        (self.errors.is_empty(), self.errors)
    }

    fn push(&mut self, message: String) {
        self.errors.push(message);
    }
}

/// Whose employments are being checked.
#[derive(Debug, Clone, Copy)]
enum Ownership {
    /// Standalone employment; `user_id` must be set.
    Standalone,
    /// Embedded in a user that has no id yet; `user_id` is stamped on insert.
    NewOwner,
    /// Embedded in an existing user; `user_id` must be unset or equal.
    Owner(UserId),
}

/// Validates standalone employments.
///
/// Every employment must name its user, a company and a start date, and must
/// not end before it starts. An empty slice is valid.
pub fn validate_employments(employments: &[Employment]) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_employments(employments, Ownership::Standalone, &mut report);
    report
}

/// Validates employments embedded in a user.
///
/// `owner` is `None` while the user is being created, `Some(id)` on update.
/// Employments pointing at a different user are reported.
pub fn validate_owned_employments(
    owner: Option<UserId>,
    employments: &[Employment],
) -> ValidationReport {
    let ownership = owner.map_or(Ownership::NewOwner, Ownership::Owner);
    let mut report = ValidationReport::default();
    check_employments(employments, ownership, &mut report);
    report
}

/// Validates user fields followed by its embedded employments.
pub fn validate_user(user: &User, owner: Option<UserId>) -> ValidationReport {
    let mut report = ValidationReport::default();

    if user.first_name.trim().is_empty() {
        report.push("user: first name is required".to_string());
    }
    if user.last_name.trim().is_empty() {
        report.push("user: last name is required".to_string());
    }
    if user.email.trim().is_empty() {
        report.push("user: email is required".to_string());
    } else if !EMAIL_RE.is_match(&user.email) {
        report.push(format!("user: email `{}` is not a valid address", user.email));
    }
    if let Some(address) = &user.address {
        let parts = [
            ("street", &address.street),
            ("city", &address.city),
            ("post code", &address.post_code),
        ];
        for (name, value) in parts {
            if value.trim().is_empty() {
                report.push(format!("user: address {name} is required"));
            }
        }
    }

    let employments = validate_owned_employments(owner, &user.employments);
    report.errors.extend(employments.errors);
    report
}

fn check_employments(
    employments: &[Employment],
    ownership: Ownership,
    report: &mut ValidationReport,
) {
    for (index, employment) in employments.iter().enumerate() {
        check_owner(index, employment, ownership, report);

        if employment.company.trim().is_empty() {
            report.push(format!("employment[{index}]: company is required"));
        }

        match (employment.start_date, employment.end_date) {
            (None, _) => report.push(format!("employment[{index}]: start date is required")),
            (Some(start), Some(end)) if end < start => report.push(format!(
                "employment[{index}]: end date must not be earlier than start date"
            )),
            _ => {}
        }
    }
}

fn check_owner(
    index: usize,
    employment: &Employment,
    ownership: Ownership,
    report: &mut ValidationReport,
) {
    match ownership {
        Ownership::Standalone if employment.user_id == UNSET_ID => {
            report.push(format!("employment[{index}]: user id is required"));
        }
        Ownership::Standalone if employment.user_id < UNSET_ID => {
            report.push(format!(
                "employment[{index}]: user id {} must be positive",
                employment.user_id
            ));
        }
        Ownership::Owner(owner)
            if employment.user_id != UNSET_ID && employment.user_id != owner =>
        {
            report.push(format!(
                "employment[{index}]: belongs to user {} instead of user {owner}",
                employment.user_id
            ));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_employments, validate_owned_employments, validate_user};
    use crate::model::employment::Employment;
    use crate::model::user::{Address, User};

    fn valid_employment(user_id: i64) -> Employment {
        let mut employment = Employment::new(user_id, "Acme", 1_000);
        employment.end_date = Some(2_000);
        employment
    }

    #[test]
    fn empty_input_is_valid() {
        let (is_valid, errors) = validate_employments(&[]).into_parts();
        assert!(is_valid);
        assert!(errors.is_empty());
    }

    #[test]
    fn missing_user_id_yields_exactly_one_message() {
        let report = validate_employments(&[valid_employment(0)]);
        assert!(!report.is_valid());
        assert_eq!(report.errors, vec!["employment[0]: user id is required"]);
    }

    #[test]
    fn negative_user_id_is_reported_as_not_positive() {
        let report = validate_employments(&[valid_employment(-3)]);
        assert_eq!(
            report.errors,
            vec!["employment[0]: user id -3 must be positive"]
        );
    }

    #[test]
    fn violations_are_collected_in_input_order() {
        let mut second = valid_employment(7);
        second.company = "  ".to_string();
        let report = validate_employments(&[valid_employment(0), valid_employment(7), second]);

        assert_eq!(
            report.errors,
            vec![
                "employment[0]: user id is required",
                "employment[2]: company is required",
            ]
        );
    }

    #[test]
    fn one_employment_can_report_every_rule() {
        let employment = Employment {
            company: String::new(),
            start_date: None,
            end_date: Some(10),
            ..Employment::default()
        };
        let report = validate_employments(&[employment]);
        assert_eq!(report.errors.len(), 3);
    }

    #[test]
    fn end_before_start_is_rejected_but_equal_dates_pass() {
        let mut reversed = valid_employment(1);
        reversed.start_date = Some(500);
        reversed.end_date = Some(100);
        let mut same_day = valid_employment(1);
        same_day.end_date = same_day.start_date;

        let report = validate_employments(&[reversed, same_day]);
        assert_eq!(
            report.errors,
            vec!["employment[0]: end date must not be earlier than start date"]
        );
    }

    #[test]
    fn new_owner_ignores_user_id() {
        let report = validate_owned_employments(None, &[valid_employment(0), valid_employment(9)]);
        assert!(report.is_valid());
    }

    #[test]
    fn existing_owner_rejects_foreign_employments() {
        let employments = [valid_employment(3), valid_employment(4)];
        let report = validate_owned_employments(Some(3), &employments);
        assert_eq!(
            report.errors,
            vec!["employment[1]: belongs to user 4 instead of user 3"]
        );
    }

    #[test]
    fn user_checks_fields_then_employments() {
        let mut user = User::new("", "Doe", "not-an-email").with_employment(Employment {
            company: "Acme".to_string(),
            ..Employment::default()
        });
        user.address = Some(Address {
            street: "Main 1".to_string(),
            city: String::new(),
            post_code: "1000".to_string(),
        });

        let report = validate_user(&user, None);
        assert_eq!(
            report.errors,
            vec![
                "user: first name is required",
                "user: email `not-an-email` is not a valid address",
                "user: address city is required",
                "employment[0]: start date is required",
            ]
        );
        assert_eq!(report.summary(), report.errors.join(", "));
    }

    #[test]
    fn user_update_reports_foreign_embedded_employments() {
        let user = User::new("Jane", "Doe", "jane@example.com")
            .with_employment(valid_employment(5))
            .with_employment(valid_employment(6));
        let report = validate_user(&user, Some(5));
        assert_eq!(
            report.errors,
            vec!["employment[1]: belongs to user 6 instead of user 5"]
        );
    }

    #[test]
    fn well_formed_user_passes() {
        let user =
            User::new("Jane", "Doe", "jane@example.com").with_employment(valid_employment(0));
        assert!(validate_user(&user, None).is_valid());
    }
}
