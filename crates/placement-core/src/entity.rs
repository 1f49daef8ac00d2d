//! Persisted entities: colleges, companies, recruiter contacts and the links
//! that associate them.
//!
//! A [`Link`] connects one college to one company and may own a single
//! [`Person`]. Colleges and companies exist only while at least one link
//! references them.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── College ─────────────────────────────────────────────────────────────────

/// A college, identified naturally by its unique name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
  pub id:   i64,
  pub name: String,
}

/// Partial update for a [`College`]. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollegePatch {
  pub name: Option<String>,
}

impl CollegePatch {
  pub fn validate(&self) -> Result<()> {
    check_patch_text("college_name", self.name.as_deref())
  }
}

// ─── Company ─────────────────────────────────────────────────────────────────

/// A company offering a particular role at a particular CTC.
///
/// The same company name with a different role or CTC is a distinct row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
  pub id:   i64,
  pub name: String,
  pub role: String,
  pub ctc:  f64,
}

impl Company {
  pub fn key(&self) -> CompanyKey {
    CompanyKey {
      name: self.name.clone(),
      role: self.role.clone(),
      ctc:  self.ctc,
    }
  }
}

/// The natural key of a [`Company`]: `(name, role, ctc)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyKey {
  pub name: String,
  pub role: String,
  pub ctc:  f64,
}

/// Partial update for a [`Company`]. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyPatch {
  pub name: Option<String>,
  pub role: Option<String>,
  pub ctc:  Option<f64>,
}

impl CompanyPatch {
  /// Reject a patch that would blank a key field or store a negative or
  /// non-finite CTC.
  pub fn validate(&self) -> Result<()> {
    check_patch_text("company_name", self.name.as_deref())?;
    check_patch_text("role", self.role.as_deref())?;
    if let Some(ctc) = self.ctc {
      check_ctc(ctc)?;
    }
    Ok(())
  }
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A recruiter contact, owned by exactly one link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
  pub id:             i64,
  pub name:           Option<String>,
  pub linkedin_id:    Option<String>,
  pub email:          Option<String>,
  pub contact_number: Option<String>,
}

/// A person that has not been persisted yet.
///
/// Construction through [`NewPerson::new`] guarantees at least one non-blank
/// field.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPerson {
  pub name:           Option<String>,
  pub linkedin_id:    Option<String>,
  pub email:          Option<String>,
  pub contact_number: Option<String>,
}

impl NewPerson {
  pub fn new(
    name: Option<String>,
    linkedin_id: Option<String>,
    email: Option<String>,
    contact_number: Option<String>,
  ) -> Result<Self> {
    let person = Self {
      name:           non_blank(name),
      linkedin_id:    non_blank(linkedin_id),
      email:          non_blank(email),
      contact_number: non_blank(contact_number),
    };
    let any_present = person.name.is_some()
      || person.linkedin_id.is_some()
      || person.email.is_some()
      || person.contact_number.is_some();

    if !any_present {
      return Err(Error::Validation(
        "at least one of 'hr_name', 'linkedin_id', 'email' or 'contact_number' \
         must be provided"
          .into(),
      ));
    }
    Ok(person)
  }
}

// ─── Link ────────────────────────────────────────────────────────────────────

/// The association row between a college and a company.
///
/// At most one link exists per `(college_id, company_id)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
  pub college_id: i64,
  pub company_id: i64,
  pub person_id:  Option<i64>,
}

/// Trim `value`, treating an empty result as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|s| s.trim().to_owned())
    .filter(|s| !s.is_empty())
}

fn check_patch_text(field: &str, value: Option<&str>) -> Result<()> {
  match value {
    Some(v) if v.trim().is_empty() => {
      Err(Error::Validation(format!("'{field}' must not be blank")))
    }
    _ => Ok(()),
  }
}

/// Returns `ctc` if it is a finite, non-negative amount.
pub(crate) fn check_ctc(ctc: f64) -> Result<f64> {
  if !ctc.is_finite() {
    return Err(Error::Validation("ctc must be real".into()));
  }
  if ctc < 0.0 {
    return Err(Error::Validation("ctc must not be negative".into()));
  }
  Ok(ctc)
}
