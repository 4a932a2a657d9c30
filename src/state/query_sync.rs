//! Mirrors form values into the shareable link's query string and back

use super::form_values::{FieldName, FormValues};
use super::location::Location;
use std::collections::HashMap;
use url::form_urlencoded;
use url::Url;

/// Separator used for the services list
const SERVICES_SEPARATOR: char = ',';

/// Key order used when writing a query string
const SAVE_ORDER: [FieldName; 7] = [
    FieldName::FullName,
    FieldName::Email,
    FieldName::CompanyName,
    FieldName::Budget,
    FieldName::ProjectStartDate,
    FieldName::AcceptTerms,
    FieldName::ServicesInterestedIn,
];

/// Seed `values` from the query parameters of `url`.
///
/// Only present, non-empty parameters are applied. When a key repeats, the
/// first occurrence wins.
pub fn load_from_query(url: &Url, values: &mut FormValues) {
    let mut params: HashMap<String, String> = HashMap::new();
    for (key, value) in url.query_pairs() {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }

    for field in FieldName::ALL {
        let Some(raw) = params.get(field.key()).filter(|v| !v.is_empty()) else {
            continue;
        };
        match field {
            FieldName::AcceptTerms => values.accept_terms = raw == "true",
            FieldName::ServicesInterestedIn => {
                values.services_interested_in =
                    raw.split(SERVICES_SEPARATOR).map(str::to_string).collect();
            }
            text => {
                if let Some(slot) = values.text_mut(text) {
                    *slot = raw.clone();
                }
            }
        }
    }
}

/// Serialize the non-empty fields of `values` as a query string
pub fn to_query_string(values: &FormValues) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for field in SAVE_ORDER {
        match field {
            FieldName::AcceptTerms => {
                if values.accept_terms {
                    serializer.append_pair(field.key(), "true");
                }
            }
            FieldName::ServicesInterestedIn => {
                if !values.services_interested_in.is_empty() {
                    let joined = values
                        .services_interested_in
                        .join(&SERVICES_SEPARATOR.to_string());
                    serializer.append_pair(field.key(), &joined);
                }
            }
            text => {
                let value = values.text(text);
                if !value.is_empty() {
                    serializer.append_pair(field.key(), value);
                }
            }
        }
    }
    serializer.finish()
}

/// Write `values` into the link, replacing its current query
pub fn save_to_query(values: &FormValues, location: &mut Location) {
    let query = to_query_string(values);
    location.replace_query(&query);
    tracing::debug!("Updated shareable link: {}", location);
}

/// Drop the link's query entirely
pub fn clear_query(location: &mut Location) {
    location.clear_query();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    const BASE: &str = "http://localhost:3000/onboarding";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn filled() -> FormValues {
        FormValues {
            full_name: "Ada O'Hara".to_string(),
            email: "ada+intake@example.com".to_string(),
            company_name: "Hara & Sons".to_string(),
            services_interested_in: vec!["web-development".to_string(), "ui-ux-design".to_string()],
            budget: "25000".to_string(),
            project_start_date: "2026-12-01".to_string(),
            accept_terms: true,
        }
    }

    mod load {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_seeds_every_field() {
            let url = Url::parse(&format!(
                "{BASE}?fullName=Ada+Lovelace&email=ada%40example.com&companyName=Engines\
                 &budget=500&projectStartDate=2026-11-02&acceptTerms=true\
                 &servicesInterestedIn=web-development,consulting"
            ))
            .unwrap();
            let mut values = FormValues::with_today(today());
            load_from_query(&url, &mut values);

            assert_eq!(values.full_name, "Ada Lovelace");
            assert_eq!(values.email, "ada@example.com");
            assert_eq!(values.company_name, "Engines");
            assert_eq!(values.budget, "500");
            assert_eq!(values.project_start_date, "2026-11-02");
            assert!(values.accept_terms);
            assert_eq!(
                values.services_interested_in,
                vec!["web-development", "consulting"]
            );
        }

        #[test]
        fn test_missing_and_empty_keep_defaults() {
            let url = Url::parse(&format!("{BASE}?fullName=&budget=")).unwrap();
            let mut values = FormValues::with_today(today());
            load_from_query(&url, &mut values);
            assert_eq!(values, FormValues::with_today(today()));
        }

        #[test]
        fn test_accept_terms_only_true_literal() {
            for raw in ["TRUE", "1", "yes", "false"] {
                let url = Url::parse(&format!("{BASE}?acceptTerms={raw}")).unwrap();
                let mut values = FormValues::with_today(today());
                values.accept_terms = true;
                load_from_query(&url, &mut values);
                assert!(!values.accept_terms, "{raw} should not accept terms");
            }
        }

        #[test]
        fn test_first_repeated_key_wins() {
            let url = Url::parse(&format!("{BASE}?email=a%40b.io&email=c%40d.io")).unwrap();
            let mut values = FormValues::with_today(today());
            load_from_query(&url, &mut values);
            assert_eq!(values.email, "a@b.io");
        }

        #[test]
        fn test_unknown_keys_ignored() {
            let url = Url::parse(&format!("{BASE}?utm_source=mail&companyName=Acme")).unwrap();
            let mut values = FormValues::with_today(today());
            load_from_query(&url, &mut values);
            assert_eq!(values.company_name, "Acme");
        }
    }

    mod save {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_key_order_and_encoding() {
            let query = to_query_string(&filled());
            assert_eq!(
                query,
                "fullName=Ada+O%27Hara&email=ada%2Bintake%40example.com\
                 &companyName=Hara+%26+Sons&budget=25000&projectStartDate=2026-12-01\
                 &acceptTerms=true&servicesInterestedIn=web-development%2Cui-ux-design"
            );
        }

        #[test]
        fn test_skips_empty_fields() {
            let mut values = FormValues::with_today(today());
            values.full_name = "Ada".to_string();
            assert_eq!(
                to_query_string(&values),
                "fullName=Ada&projectStartDate=2026-10-15"
            );
        }

        #[test]
        fn test_save_replaces_existing_query() {
            let mut location = Location::parse(&format!("{BASE}?stale=1")).unwrap();
            let mut values = FormValues::with_today(today());
            values.email = "x@y.io".to_string();
            save_to_query(&values, &mut location);
            assert_eq!(
                location.as_str(),
                format!("{BASE}?email=x%40y.io&projectStartDate=2026-10-15")
            );
        }

        #[test]
        fn test_clear_leaves_bare_link() {
            let mut location = Location::parse(BASE).unwrap();
            save_to_query(&filled(), &mut location);
            clear_query(&mut location);
            assert_eq!(location.as_str(), BASE);
        }
    }

    #[test]
    fn test_round_trip_preserves_values() {
        let before = filled();
        let mut location = Location::parse(BASE).unwrap();
        save_to_query(&before, &mut location);

        let mut reloaded = FormValues::with_today(today());
        load_from_query(location.url(), &mut reloaded);
        assert_eq!(reloaded, before);
    }
}
