//! Intake validation rules
//!
//! Each field owns an ordered list of rules. Rules for a field are checked in
//! order and the first failure is that field's message; every field is
//! checked, so all failing fields are reported together.

use super::form_values::{FieldName, FormValues, DATE_FORMAT};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const FULL_NAME_MIN: usize = 2;
pub const FULL_NAME_MAX: usize = 80;
pub const COMPANY_NAME_MIN: usize = 2;
pub const COMPANY_NAME_MAX: usize = 100;
pub const BUDGET_MIN: u32 = 100;
pub const BUDGET_MAX: u32 = 1_000_000;

pub const MSG_FULL_NAME_MIN: &str = "Full name must be at least 2 characters";
pub const MSG_FULL_NAME_MAX: &str = "Full name must be 80 characters or less";
pub const MSG_FULL_NAME_PATTERN: &str = "Full name can only contain letters, spaces, ', -";
pub const MSG_EMAIL: &str = "Invalid email address";
pub const MSG_COMPANY_MIN: &str = "Company name must be at least 2 characters";
pub const MSG_COMPANY_MAX: &str = "Company name must be 100 characters or less";
pub const MSG_SERVICES: &str = "Please select at least one service";
pub const MSG_BUDGET: &str = "Budget must be an integer between 100 and 1,000,000";
pub const MSG_START_DATE_REQUIRED: &str = "A project start date is required";
pub const MSG_START_DATE_PAST: &str = "Must be today or a later date";
pub const MSG_ACCEPT_TERMS: &str = "You must accept the terms";

static FULL_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s'-]+$").expect("valid full name pattern"));

// No look-around in `regex`; leading dot and ".." are checked separately.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("valid email pattern")
});

type Check = fn(&FormValues, NaiveDate) -> bool;

/// A single `(field, predicate, message)` rule
struct Rule {
    field: FieldName,
    check: Check,
    message: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        field: FieldName::FullName,
        check: full_name_min,
        message: MSG_FULL_NAME_MIN,
    },
    Rule {
        field: FieldName::FullName,
        check: full_name_max,
        message: MSG_FULL_NAME_MAX,
    },
    Rule {
        field: FieldName::FullName,
        check: full_name_pattern,
        message: MSG_FULL_NAME_PATTERN,
    },
    Rule {
        field: FieldName::Email,
        check: email_format,
        message: MSG_EMAIL,
    },
    Rule {
        field: FieldName::CompanyName,
        check: company_name_min,
        message: MSG_COMPANY_MIN,
    },
    Rule {
        field: FieldName::CompanyName,
        check: company_name_max,
        message: MSG_COMPANY_MAX,
    },
    Rule {
        field: FieldName::ServicesInterestedIn,
        check: services_selected,
        message: MSG_SERVICES,
    },
    Rule {
        field: FieldName::Budget,
        check: budget_in_range,
        message: MSG_BUDGET,
    },
    Rule {
        field: FieldName::ProjectStartDate,
        check: start_date_present,
        message: MSG_START_DATE_REQUIRED,
    },
    Rule {
        field: FieldName::ProjectStartDate,
        check: start_date_not_past,
        message: MSG_START_DATE_PAST,
    },
    Rule {
        field: FieldName::AcceptTerms,
        check: terms_accepted,
        message: MSG_ACCEPT_TERMS,
    },
];

fn full_name_min(v: &FormValues, _: NaiveDate) -> bool {
    v.full_name.chars().count() >= FULL_NAME_MIN
}

fn full_name_max(v: &FormValues, _: NaiveDate) -> bool {
    v.full_name.chars().count() <= FULL_NAME_MAX
}

fn full_name_pattern(v: &FormValues, _: NaiveDate) -> bool {
    FULL_NAME_PATTERN.is_match(&v.full_name)
}

fn email_format(v: &FormValues, _: NaiveDate) -> bool {
    is_valid_email(&v.email)
}

fn company_name_min(v: &FormValues, _: NaiveDate) -> bool {
    v.company_name.chars().count() >= COMPANY_NAME_MIN
}

fn company_name_max(v: &FormValues, _: NaiveDate) -> bool {
    v.company_name.chars().count() <= COMPANY_NAME_MAX
}

fn services_selected(v: &FormValues, _: NaiveDate) -> bool {
    !v.services_interested_in.is_empty()
}

fn budget_in_range(v: &FormValues, _: NaiveDate) -> bool {
    v.budget.is_empty() || parse_budget(&v.budget).is_some()
}

fn start_date_present(v: &FormValues, _: NaiveDate) -> bool {
    !v.project_start_date.is_empty()
}

fn start_date_not_past(v: &FormValues, today: NaiveDate) -> bool {
    parse_date(&v.project_start_date).is_some_and(|date| date >= today)
}

fn terms_accepted(v: &FormValues, _: NaiveDate) -> bool {
    v.accept_terms
}

/// Check an address against the intake email grammar
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_PATTERN.is_match(email)
}

/// Parse a budget string into whole dollars within the accepted range.
///
/// Surrounding whitespace is ignored and decimal or exponent notation is
/// accepted, as long as the number is integral (`"2.5e3"` is 2500).
pub fn parse_budget(raw: &str) -> Option<u32> {
    let number: f64 = raw.trim().parse().ok()?;
    if !number.is_finite() || number.fract() != 0.0 {
        return None;
    }
    if number < f64::from(BUDGET_MIN) || number > f64::from(BUDGET_MAX) {
        return None;
    }
    Some(number as u32)
}

/// Parse an ISO calendar date (`YYYY-MM-DD`)
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Field errors keyed by field, iterated in declared field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FieldName, String>);

impl FieldErrors {
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert_first(&mut self, field: FieldName, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_string());
    }
}

/// Values after every rule passed, with types coerced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedValues {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub services_interested_in: Vec<String>,
    pub budget: Option<u32>,
    /// Parsed start date
    pub project_start_date: NaiveDate,
    /// The date exactly as entered, sent unchanged on the wire
    pub project_start_date_raw: String,
    pub accept_terms: bool,
}

/// Outcome of running the rule set over a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(NormalizedValues),
    Invalid(FieldErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Errors of an invalid result, empty for a valid one
    pub fn errors(&self) -> FieldErrors {
        match self {
            Self::Valid(_) => FieldErrors::default(),
            Self::Invalid(errors) => errors.clone(),
        }
    }
}

/// Run every rule against `values`, comparing the start date to `today`
pub fn validate(values: &FormValues, today: NaiveDate) -> ValidationResult {
    let mut errors = FieldErrors::default();

    for rule in RULES {
        if errors.contains(rule.field) {
            continue;
        }
        if !(rule.check)(values, today) {
            errors.insert_first(rule.field, rule.message);
        }
    }

    if !errors.is_empty() {
        return ValidationResult::Invalid(errors);
    }

    match normalize(values) {
        Some(normalized) => ValidationResult::Valid(normalized),
        // Unreachable while the rules above cover budget and date parsing
        None => ValidationResult::Invalid(errors),
    }
}

fn normalize(values: &FormValues) -> Option<NormalizedValues> {
    let budget = if values.budget.is_empty() {
        None
    } else {
        Some(parse_budget(&values.budget)?)
    };

    Some(NormalizedValues {
        full_name: values.full_name.clone(),
        email: values.email.clone(),
        company_name: values.company_name.clone(),
        services_interested_in: values.services_interested_in.clone(),
        budget,
        project_start_date: parse_date(&values.project_start_date)?,
        project_start_date_raw: values.project_start_date.clone(),
        accept_terms: values.accept_terms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn valid_values() -> FormValues {
        FormValues {
            full_name: "Mary-Jane O'Neil".to_string(),
            email: "mary.jane@example.com".to_string(),
            company_name: "Acme Widgets".to_string(),
            services_interested_in: vec!["web-development".to_string()],
            budget: "5000".to_string(),
            project_start_date: "2026-11-01".to_string(),
            accept_terms: true,
        }
    }

    /// Validate and return the single failing field, asserting it is the only one
    fn only_error(values: &FormValues) -> (FieldName, String) {
        let errors = validate(values, today()).errors();
        assert_eq!(errors.len(), 1, "expected exactly one error: {errors:?}");
        let (field, msg) = errors.iter().next().unwrap();
        (field, msg.to_string())
    }

    mod whole_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_values_normalize() {
            let result = validate(&valid_values(), today());
            let ValidationResult::Valid(normalized) = result else {
                panic!("expected valid result");
            };
            assert_eq!(normalized.budget, Some(5000));
            assert_eq!(
                normalized.project_start_date,
                NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()
            );
            assert_eq!(normalized.project_start_date_raw, "2026-11-01");
            assert_eq!(normalized.services_interested_in, vec!["web-development"]);
        }

        #[test]
        fn test_empty_budget_normalizes_to_none() {
            let mut values = valid_values();
            values.budget.clear();
            let ValidationResult::Valid(normalized) = validate(&values, today()) else {
                panic!("expected valid result");
            };
            assert_eq!(normalized.budget, None);
        }

        #[test]
        fn test_all_failures_reported_together() {
            let values = FormValues {
                full_name: "A".to_string(),
                email: "nope".to_string(),
                company_name: String::new(),
                services_interested_in: vec![],
                budget: "abc".to_string(),
                project_start_date: String::new(),
                accept_terms: false,
            };
            let errors = validate(&values, today()).errors();
            let fields: Vec<_> = errors.fields().collect();
            assert_eq!(fields, FieldName::ALL.to_vec());
            assert_eq!(
                errors.get(FieldName::ProjectStartDate),
                Some(MSG_START_DATE_REQUIRED)
            );
        }

        #[test]
        fn test_valid_result_has_no_errors() {
            assert!(validate(&valid_values(), today()).errors().is_empty());
        }
    }

    mod full_name {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_too_short() {
            let mut values = valid_values();
            values.full_name = "A".to_string();
            assert_eq!(
                only_error(&values),
                (FieldName::FullName, MSG_FULL_NAME_MIN.to_string())
            );
        }

        #[test]
        fn test_digits_fail_pattern() {
            let mut values = valid_values();
            values.full_name = "John123".to_string();
            assert_eq!(
                only_error(&values),
                (FieldName::FullName, MSG_FULL_NAME_PATTERN.to_string())
            );
        }

        #[test]
        fn test_length_message_wins_over_pattern() {
            let mut values = valid_values();
            values.full_name = "1".to_string();
            assert_eq!(only_error(&values).1, MSG_FULL_NAME_MIN);
        }

        #[test]
        fn test_too_long() {
            let mut values = valid_values();
            values.full_name = "a".repeat(81);
            assert_eq!(only_error(&values).1, MSG_FULL_NAME_MAX);
            values.full_name = "a".repeat(80);
            assert!(validate(&values, today()).is_valid());
        }

        #[test]
        fn test_whitespace_only_passes() {
            let mut values = valid_values();
            values.full_name = "   ".to_string();
            assert!(validate(&values, today()).is_valid());
        }
    }

    mod email {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_not_an_email() {
            let mut values = valid_values();
            values.email = "not-an-email".to_string();
            assert_eq!(
                only_error(&values),
                (FieldName::Email, MSG_EMAIL.to_string())
            );
        }

        #[test]
        fn test_accepted_addresses() {
            for email in [
                "a@b.co",
                "first.last+tag@sub.example.org",
                "o'brien@mail-host.io",
            ] {
                assert!(is_valid_email(email), "{email} should be valid");
            }
        }

        #[test]
        fn test_rejected_addresses() {
            for email in [
                "",
                "@example.com",
                ".lead@example.com",
                "double..dot@example.com",
                "trailing.@example.com",
                "user@localhost",
                "user@example.c",
                "user@-bad.com",
                "user name@example.com",
            ] {
                assert!(!is_valid_email(email), "{email} should be invalid");
            }
        }
    }

    mod company_name {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_bounds() {
            let mut values = valid_values();
            values.company_name = "X".to_string();
            assert_eq!(only_error(&values).1, MSG_COMPANY_MIN);
            values.company_name = "X".repeat(101);
            assert_eq!(only_error(&values).1, MSG_COMPANY_MAX);
            values.company_name = "X".repeat(100);
            assert!(validate(&values, today()).is_valid());
        }
    }

    mod services {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_selection_fails() {
            let mut values = valid_values();
            values.services_interested_in.clear();
            assert_eq!(
                only_error(&values),
                (FieldName::ServicesInterestedIn, MSG_SERVICES.to_string())
            );
        }
    }

    mod budget {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_below_minimum() {
            let mut values = valid_values();
            values.budget = "50".to_string();
            assert_eq!(
                only_error(&values),
                (FieldName::Budget, MSG_BUDGET.to_string())
            );
        }

        #[test]
        fn test_bounds_inclusive() {
            assert_eq!(parse_budget("100"), Some(100));
            assert_eq!(parse_budget("1000000"), Some(1_000_000));
            assert_eq!(parse_budget("99"), None);
            assert_eq!(parse_budget("1000001"), None);
        }

        #[test]
        fn test_numeric_forms() {
            assert_eq!(parse_budget(" 250 "), Some(250));
            assert_eq!(parse_budget("2.5e3"), Some(2500));
            assert_eq!(parse_budget("300.0"), Some(300));
            assert_eq!(parse_budget("300.5"), None);
            assert_eq!(parse_budget("abc"), None);
            assert_eq!(parse_budget("NaN"), None);
            assert_eq!(parse_budget("inf"), None);
            assert_eq!(parse_budget(" "), None);
        }

        #[test]
        fn test_whitespace_budget_is_not_absent() {
            let mut values = valid_values();
            values.budget = "  ".to_string();
            assert_eq!(only_error(&values).0, FieldName::Budget);
        }
    }

    mod start_date {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_yesterday_fails() {
            let mut values = valid_values();
            values.project_start_date = "2026-10-14".to_string();
            assert_eq!(
                only_error(&values),
                (FieldName::ProjectStartDate, MSG_START_DATE_PAST.to_string())
            );
        }

        #[test]
        fn test_today_passes() {
            let mut values = valid_values();
            values.project_start_date = "2026-10-15".to_string();
            assert!(validate(&values, today()).is_valid());
        }

        #[test]
        fn test_impossible_date_fails() {
            let mut values = valid_values();
            values.project_start_date = "2027-02-30".to_string();
            assert_eq!(only_error(&values).1, MSG_START_DATE_PAST);
            values.project_start_date = "next tuesday".to_string();
            assert_eq!(only_error(&values).1, MSG_START_DATE_PAST);
        }

        #[test]
        fn test_empty_is_required_message() {
            let mut values = valid_values();
            values.project_start_date.clear();
            assert_eq!(only_error(&values).1, MSG_START_DATE_REQUIRED);
        }
    }

    mod accept_terms {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_unchecked_fails() {
            let mut values = valid_values();
            values.accept_terms = false;
            assert_eq!(
                only_error(&values),
                (FieldName::AcceptTerms, MSG_ACCEPT_TERMS.to_string())
            );
        }
    }
}
