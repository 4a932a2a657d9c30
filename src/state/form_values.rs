//! Intake form values and field identifiers

use chrono::{Local, NaiveDate};

/// Date format used by the start date field and on the wire
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The seven intake fields, in declared order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    FullName,
    Email,
    CompanyName,
    ServicesInterestedIn,
    Budget,
    ProjectStartDate,
    AcceptTerms,
}

impl FieldName {
    pub const ALL: [FieldName; 7] = [
        FieldName::FullName,
        FieldName::Email,
        FieldName::CompanyName,
        FieldName::ServicesInterestedIn,
        FieldName::Budget,
        FieldName::ProjectStartDate,
        FieldName::AcceptTerms,
    ];

    /// Query-string key for this field
    pub fn key(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::CompanyName => "companyName",
            Self::ServicesInterestedIn => "servicesInterestedIn",
            Self::Budget => "budget",
            Self::ProjectStartDate => "projectStartDate",
            Self::AcceptTerms => "acceptTerms",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::CompanyName => "Company Name",
            Self::ServicesInterestedIn => "Services Interested In",
            Self::Budget => "Budget (USD) (optional)",
            Self::ProjectStartDate => "Project Start Date",
            Self::AcceptTerms => "Accept terms",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Budget)
    }

    /// Whether the field is edited by typing characters
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::FullName | Self::Email | Self::CompanyName | Self::Budget | Self::ProjectStartDate
        )
    }
}

/// Raw values of one intake form session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub services_interested_in: Vec<String>,
    /// Empty means no budget was given
    pub budget: String,
    pub project_start_date: String,
    pub accept_terms: bool,
}

impl FormValues {
    /// Form defaults with the start date set to `today`
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            company_name: String::new(),
            services_interested_in: Vec::new(),
            budget: String::new(),
            project_start_date: today.format(DATE_FORMAT).to_string(),
            accept_terms: false,
        }
    }

    /// Get the value of a text field (empty for non-text fields)
    pub fn text(&self, field: FieldName) -> &str {
        match field {
            FieldName::FullName => &self.full_name,
            FieldName::Email => &self.email,
            FieldName::CompanyName => &self.company_name,
            FieldName::Budget => &self.budget,
            FieldName::ProjectStartDate => &self.project_start_date,
            FieldName::ServicesInterestedIn | FieldName::AcceptTerms => "",
        }
    }

    /// Mutable access to a text field, `None` for non-text fields
    pub fn text_mut(&mut self, field: FieldName) -> Option<&mut String> {
        match field {
            FieldName::FullName => Some(&mut self.full_name),
            FieldName::Email => Some(&mut self.email),
            FieldName::CompanyName => Some(&mut self.company_name),
            FieldName::Budget => Some(&mut self.budget),
            FieldName::ProjectStartDate => Some(&mut self.project_start_date),
            FieldName::ServicesInterestedIn | FieldName::AcceptTerms => None,
        }
    }

    pub fn has_service(&self, service: &str) -> bool {
        self.services_interested_in.iter().any(|s| s == service)
    }

    /// Select the service if unselected, otherwise remove it
    pub fn toggle_service(&mut self, service: &str) {
        if self.has_service(service) {
            self.services_interested_in.retain(|s| s != service);
        } else {
            self.services_interested_in.push(service.to_string());
        }
    }
}

impl Default for FormValues {
    fn default() -> Self {
        Self::with_today(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults_use_given_date() {
        let values = FormValues::with_today(day(2026, 3, 9));
        assert_eq!(values.project_start_date, "2026-03-09");
        assert!(values.services_interested_in.is_empty());
        assert!(values.full_name.is_empty());
        assert!(!values.accept_terms);
    }

    #[test]
    fn test_field_keys_are_unique() {
        let mut keys: Vec<_> = FieldName::ALL.iter().map(|f| f.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 7);
    }

    #[test]
    fn test_only_budget_is_optional() {
        let optional: Vec<_> = FieldName::ALL
            .iter()
            .filter(|f| !f.is_required())
            .collect();
        assert_eq!(optional, vec![&FieldName::Budget]);
    }

    #[test]
    fn test_text_mut_rejects_non_text_fields() {
        let mut values = FormValues::with_today(day(2026, 1, 1));
        assert!(values.text_mut(FieldName::AcceptTerms).is_none());
        assert!(values.text_mut(FieldName::ServicesInterestedIn).is_none());
        values.text_mut(FieldName::Email).unwrap().push_str("a@b.io");
        assert_eq!(values.text(FieldName::Email), "a@b.io");
    }

    #[test]
    fn test_toggle_service_keeps_insertion_order() {
        let mut values = FormValues::with_today(day(2026, 1, 1));
        values.toggle_service("design");
        values.toggle_service("web");
        values.toggle_service("cloud");
        values.toggle_service("web");
        assert_eq!(values.services_interested_in, vec!["design", "cloud"]);
        assert!(!values.has_service("web"));
    }
}
