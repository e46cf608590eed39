use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============ Database Models ============

/// A prospective customer who asked for the discount coupon.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Lead {
    /// Identifier assigned by the store on insert.
    pub id: Uuid,
    /// Email address (`correo`); the non-enforced deduplication key.
    pub email: Option<String>,
    /// Free-text name (`nombre`).
    pub name: Option<String>,
    /// Free-text phone (`telefono`), stored as submitted.
    pub phone: Option<String>,
    /// Write time, assigned by the store.
    pub created_at: DateTime<Utc>,
}

/// A lead that has not been written yet: no id, no timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

// ============ Request Models ============

/// Fields posted by the discount form. Every field is optional and unvalidated.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LeadSubmission {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "correo", default)]
    pub email: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
}

impl LeadSubmission {
    /// Reads an urlencoded form body leniently.
    ///
    /// The first value of a repeated field wins and unknown fields are
    /// ignored, so any body yields a submission.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut submission = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            let slot = match key.as_ref() {
                "nombre" => &mut submission.name,
                "correo" => &mut submission.email,
                "telefono" => &mut submission.phone,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        submission
    }
}

impl From<LeadSubmission> for NewLead {
    fn from(submission: LeadSubmission) -> Self {
        Self {
            email: submission.email,
            name: submission.name,
            phone: submission.phone,
        }
    }
}

// ============ Outcomes ============

/// Result of running a submission through the intake handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeOutcome {
    /// A new lead was committed.
    Created { lead: Lead },
    /// Enough leads already exist for this email; nothing was written.
    DuplicateDetected { email: Option<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_uses_spanish_field_names() {
        let submission: LeadSubmission = serde_json::from_value(serde_json::json!({
            "nombre": "Ana",
            "correo": "ana@example.com",
            "telefono": "555"
        }))
        .unwrap();

        assert_eq!(submission.name.as_deref(), Some("Ana"));
        assert_eq!(submission.email.as_deref(), Some("ana@example.com"));
        assert_eq!(submission.phone.as_deref(), Some("555"));
    }

    #[test]
    fn test_urlencoded_first_value_wins() {
        let submission =
            LeadSubmission::from_urlencoded(b"nombre=Ana&correo=a%40b.c&correo=x%40y.z&extra=1");

        assert_eq!(submission.name.as_deref(), Some("Ana"));
        assert_eq!(submission.email.as_deref(), Some("a@b.c"));
        assert!(submission.phone.is_none());
    }

    #[test]
    fn test_urlencoded_tolerates_garbage() {
        let submission = LeadSubmission::from_urlencoded(br#"{"nombre": "Ana"}"#);
        assert!(submission.name.is_none());
        assert!(submission.email.is_none());

        let submission = LeadSubmission::from_urlencoded(b"telefono=%ZZ+555&&=");
        assert!(submission.phone.is_some());
    }

    #[test]
    fn test_missing_fields_become_none() {
        let submission: LeadSubmission =
            serde_json::from_value(serde_json::json!({ "correo": "x@y.z" })).unwrap();
        let new_lead = NewLead::from(submission);

        assert_eq!(new_lead.email.as_deref(), Some("x@y.z"));
        assert!(new_lead.name.is_none());
        assert!(new_lead.phone.is_none());
    }
}
