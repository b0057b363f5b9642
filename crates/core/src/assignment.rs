//! Pre-assignment checklist.
//!
//! A project may only move from `PENDING` to `ASSIGNED` once every field in
//! [`REQUIRED_FIELDS`] is filled in across the project and its main-info
//! record. Evaluation is pure; the caller loads both rows and borrows their
//! fields into an [`AssignmentCandidate`].

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Checklist field names, in the order they are reported.
pub const REQUIRED_FIELDS: &[&str] = &[
    // projects
    "customer_name",
    "customer_phone",
    "site_address",
    "work_category",
    "work_date",
    "engineer_id",
    // main_infos
    "contractor_name",
    "contractor_contact",
    "sales_staff",
    "survey_staff",
    "survey_date",
    "delivery_method",
    "delivery_date",
    "construction_content",
    "construction_date",
];

/// Borrowed view over the project + main-info fields the checklist inspects.
#[derive(Debug, Clone, Default)]
pub struct AssignmentCandidate<'a> {
    pub customer_name: Option<&'a str>,
    pub customer_phone: Option<&'a str>,
    pub site_address: Option<&'a str>,
    pub work_category: Option<&'a str>,
    pub work_date: Option<Timestamp>,
    pub engineer_id: Option<DbId>,
    pub contractor_name: Option<&'a str>,
    pub contractor_contact: Option<&'a str>,
    pub sales_staff: Option<&'a str>,
    pub survey_staff: Option<&'a str>,
    pub survey_date: Option<NaiveDate>,
    pub delivery_method: Option<&'a str>,
    pub delivery_date: Option<NaiveDate>,
    pub construction_content: Option<&'a str>,
    pub construction_date: Option<NaiveDate>,
}

fn text_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

impl AssignmentCandidate<'_> {
    /// Every checklist field that is absent or blank, in checklist order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            text_present(self.customer_name),
            text_present(self.customer_phone),
            text_present(self.site_address),
            text_present(self.work_category),
            self.work_date.is_some(),
            self.engineer_id.is_some(),
            text_present(self.contractor_name),
            text_present(self.contractor_contact),
            text_present(self.sales_staff),
            text_present(self.survey_staff),
            self.survey_date.is_some(),
            text_present(self.delivery_method),
            self.delivery_date.is_some(),
            text_present(self.construction_content),
            self.construction_date.is_some(),
        ];

        REQUIRED_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| *name)
            .collect()
    }

    /// Pass when nothing is missing, otherwise fail with the full list.
    pub fn check(&self) -> Result<(), CoreError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::MissingFields(
                missing.into_iter().map(String::from).collect(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn complete() -> AssignmentCandidate<'static> {
        let day = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        AssignmentCandidate {
            customer_name: Some("Sato Hanako"),
            customer_phone: Some("090-0000-0000"),
            site_address: Some("1-2-3 Shibuya, Tokyo"),
            work_category: Some("air_conditioner"),
            work_date: Some(Utc.with_ymd_and_hms(2026, 10, 21, 0, 0, 0).unwrap()),
            engineer_id: Some(7),
            contractor_name: Some("Kanto Setsubi"),
            contractor_contact: Some("03-0000-0000"),
            sales_staff: Some("Tanaka"),
            survey_staff: Some("Suzuki"),
            survey_date: Some(day),
            delivery_method: Some("direct"),
            delivery_date: Some(day),
            construction_content: Some("Replace indoor unit"),
            construction_date: Some(day),
        }
    }

    #[test]
    fn complete_candidate_passes() {
        assert!(complete().missing_fields().is_empty());
        assert!(complete().check().is_ok());
    }

    #[test]
    fn checklist_has_fifteen_fields() {
        assert_eq!(REQUIRED_FIELDS.len(), 15);
    }

    #[test]
    fn empty_candidate_reports_every_field_in_order() {
        let missing = AssignmentCandidate::default().missing_fields();
        assert_eq!(missing, REQUIRED_FIELDS.to_vec());
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let mut c = complete();
        c.site_address = Some("   ");
        c.sales_staff = Some("");
        assert_eq!(c.missing_fields(), vec!["site_address", "sales_staff"]);
    }

    #[test]
    fn each_single_missing_field_is_named() {
        // Blank out one field at a time; the error must name exactly that field.
        for (idx, name) in REQUIRED_FIELDS.iter().enumerate() {
            let mut c = complete();
            match idx {
                0 => c.customer_name = None,
                1 => c.customer_phone = None,
                2 => c.site_address = None,
                3 => c.work_category = None,
                4 => c.work_date = None,
                5 => c.engineer_id = None,
                6 => c.contractor_name = None,
                7 => c.contractor_contact = None,
                8 => c.sales_staff = None,
                9 => c.survey_staff = None,
                10 => c.survey_date = None,
                11 => c.delivery_method = None,
                12 => c.delivery_date = None,
                13 => c.construction_content = None,
                14 => c.construction_date = None,
                _ => unreachable!(),
            }
            assert_matches!(
                c.check(),
                Err(CoreError::MissingFields(fields)) if fields == vec![name.to_string()]
            );
        }
    }
}
