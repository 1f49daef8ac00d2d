//! Composite placement records: the input field maps accepted by the record
//! façade, their validated forms, and the joined row returned by queries.
//!
//! Input types mirror the JSON bodies of the HTTP layer, so every field is
//! optional at the type level. Validation happens here, before any store is
//! touched.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  entity::{College, Company, CompanyKey, NewPerson, Person, check_ctc, non_blank},
};

// ─── CTC input ───────────────────────────────────────────────────────────────

/// A CTC as it arrives over the wire: either a JSON number or a string that
/// should parse as one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CtcValue {
  Number(f64),
  Text(String),
}

impl CtcValue {
  pub fn parse(&self) -> Result<f64> {
    let ctc = match self {
      CtcValue::Number(n) => *n,
      CtcValue::Text(s) => s
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::Validation("ctc must be real".into()))?,
    };
    check_ctc(ctc)
  }
}

impl From<f64> for CtcValue {
  fn from(n: f64) -> Self { CtcValue::Number(n) }
}

// ─── Add ─────────────────────────────────────────────────────────────────────

/// Field map accepted by `add_record`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordFields {
  pub college_name:   Option<String>,
  pub company_name:   Option<String>,
  pub role:           Option<String>,
  pub ctc:            Option<CtcValue>,
  pub hr_name:        Option<String>,
  pub linkedin_id:    Option<String>,
  pub email:          Option<String>,
  pub contact_number: Option<String>,
}

impl RecordFields {
  /// Fields for a record with no recruiter contact.
  pub fn new(
    college_name: impl Into<String>,
    company_name: impl Into<String>,
    role: impl Into<String>,
    ctc: f64,
  ) -> Self {
    Self {
      college_name: Some(college_name.into()),
      company_name: Some(company_name.into()),
      role: Some(role.into()),
      ctc: Some(ctc.into()),
      ..Default::default()
    }
  }

  pub fn with_hr_name(mut self, hr_name: impl Into<String>) -> Self {
    self.hr_name = Some(hr_name.into());
    self
  }

  pub fn validate(self) -> Result<NewRecord> {
    let college_name = required("college_name", self.college_name)?;
    let company = company_key(self.company_name, self.role, self.ctc.as_ref())?;
    let person =
      person_from(self.hr_name, self.linkedin_id, self.email, self.contact_number)?;
    Ok(NewRecord { college_name, company, person })
  }
}

/// A validated record ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
  pub college_name: String,
  pub company:      CompanyKey,
  pub person:       Option<NewPerson>,
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// Field map identifying an existing record, accepted by `delete_record`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordKeyFields {
  pub college_name: Option<String>,
  pub company_name: Option<String>,
  pub role:         Option<String>,
  pub ctc:          Option<CtcValue>,
}

impl RecordKeyFields {
  pub fn new(
    college_name: impl Into<String>,
    company_name: impl Into<String>,
    role: impl Into<String>,
    ctc: f64,
  ) -> Self {
    Self {
      college_name: Some(college_name.into()),
      company_name: Some(company_name.into()),
      role:         Some(role.into()),
      ctc:          Some(ctc.into()),
    }
  }

  pub fn validate(self) -> Result<RecordKey> {
    Ok(RecordKey {
      college_name: required("college_name", self.college_name)?,
      company:      company_key(self.company_name, self.role, self.ctc.as_ref())?,
    })
  }
}

/// A record identified by the natural keys of its two endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordKey {
  pub college_name: String,
  pub company:      CompanyKey,
}

// ─── Edit ────────────────────────────────────────────────────────────────────

/// Field map accepted by `edit_record`.
///
/// The `old_*` fields are required and locate the record. Each `new_*` field
/// defaults to its `old_*` counterpart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditFields {
  pub old_college_name:   Option<String>,
  pub old_company_name:   Option<String>,
  pub old_role:           Option<String>,
  pub old_ctc:            Option<CtcValue>,
  pub new_college_name:   Option<String>,
  pub new_company_name:   Option<String>,
  pub new_role:           Option<String>,
  pub new_ctc:            Option<CtcValue>,
  pub new_hr_name:        Option<String>,
  pub new_linkedin_id:    Option<String>,
  pub new_email:          Option<String>,
  pub new_contact_number: Option<String>,
}

impl EditFields {
  pub fn validate(self) -> Result<RecordEdit> {
    let old = RecordKey {
      college_name: required("old_college_name", self.old_college_name)?,
      company:      company_key(
        self.old_company_name,
        self.old_role,
        self.old_ctc.as_ref(),
      )?,
    };

    let new_ctc = match &self.new_ctc {
      Some(ctc) => ctc.parse()?,
      None => old.company.ctc,
    };
    let new = RecordKey {
      college_name: non_blank(self.new_college_name)
        .unwrap_or_else(|| old.college_name.clone()),
      company:      CompanyKey {
        name: non_blank(self.new_company_name)
          .unwrap_or_else(|| old.company.name.clone()),
        role: non_blank(self.new_role).unwrap_or_else(|| old.company.role.clone()),
        ctc:  new_ctc,
      },
    };

    let person = person_from(
      self.new_hr_name,
      self.new_linkedin_id,
      self.new_email,
      self.new_contact_number,
    )?;

    Ok(RecordEdit { old, new, person })
  }
}

/// A validated edit.
///
/// Editing removes the `old` link and adds `new` as if it were a fresh record,
/// so an edit whose `new` identity matches an existing record merges into it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordEdit {
  pub old:    RecordKey,
  pub new:    RecordKey,
  /// Replacement contact. `None` carries over the old link's contact.
  pub person: Option<NewPerson>,
}

// ─── Query rows ──────────────────────────────────────────────────────────────

/// One joined `college ⋈ link ⋈ company ⟕ person` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
  pub college: College,
  pub company: Company,
  pub person:  Option<Person>,
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn required(field: &str, value: Option<String>) -> Result<String> {
  non_blank(value).ok_or_else(|| {
    Error::Validation(format!("missing required field '{field}'"))
  })
}

fn company_key(
  name: Option<String>,
  role: Option<String>,
  ctc: Option<&CtcValue>,
) -> Result<CompanyKey> {
  let name = required("company_name", name)?;
  let role = required("role", role)?;
  let ctc = ctc
    .ok_or_else(|| Error::Validation("missing required field 'ctc'".into()))?
    .parse()?;
  Ok(CompanyKey { name, role, ctc })
}

/// No contact when every field is absent; otherwise the contact must carry at
/// least one non-blank field.
fn person_from(
  name: Option<String>,
  linkedin_id: Option<String>,
  email: Option<String>,
  contact_number: Option<String>,
) -> Result<Option<NewPerson>> {
  if name.is_none()
    && linkedin_id.is_none()
    && email.is_none()
    && contact_number.is_none()
  {
    return Ok(None);
  }
  NewPerson::new(name, linkedin_id, email, contact_number).map(Some)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn fields(value: serde_json::Value) -> RecordFields {
    serde_json::from_value(value).unwrap()
  }

  #[test]
  fn ctc_accepts_numbers_and_numeric_strings() {
    let rec = fields(json!({
      "college_name": "IIT Patna",
      "company_name": "Google",
      "role": "CTO",
      "ctc": 50000
    }))
    .validate()
    .unwrap();
    assert_eq!(rec.company.ctc, 50000.0);

    let rec = fields(json!({
      "college_name": "IIT Patna",
      "company_name": "Google",
      "role": "CTO",
      "ctc": " 12.5 "
    }))
    .validate()
    .unwrap();
    assert_eq!(rec.company.ctc, 12.5);
  }

  #[test]
  fn non_numeric_ctc_is_a_validation_error() {
    let err = fields(json!({
      "college_name": "IIT Patna",
      "company_name": "Google",
      "role": "CTO",
      "ctc": "lots"
    }))
    .validate()
    .unwrap_err();
    assert!(matches!(err, Error::Validation(ref m) if m.contains("real")));
  }

  #[test]
  fn negative_ctc_is_rejected() {
    let err = RecordFields::new("A", "B", "C", -5.0).validate().unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
  }

  #[test]
  fn missing_fields_are_validation_errors() {
    for missing in ["college_name", "company_name", "role", "ctc"] {
      let mut body = json!({
        "college_name": "IIT Patna",
        "company_name": "Google",
        "role": "CTO",
        "ctc": 1
      });
      body.as_object_mut().unwrap().remove(missing);
      let err = fields(body).validate().unwrap_err();
      assert!(
        matches!(err, Error::Validation(ref m) if m.contains(missing)),
        "{missing}: {err}"
      );
    }
  }

  #[test]
  fn blank_college_counts_as_missing() {
    let err = RecordFields::new("  ", "Google", "CTO", 1.0)
      .validate()
      .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
  }

  #[test]
  fn person_only_when_some_field_given() {
    let rec = RecordFields::new("A", "B", "C", 1.0).validate().unwrap();
    assert!(rec.person.is_none());

    let rec = RecordFields::new("A", "B", "C", 1.0)
      .with_hr_name("laksh")
      .validate()
      .unwrap();
    assert_eq!(rec.person.unwrap().name.as_deref(), Some("laksh"));

    let err = RecordFields::new("A", "B", "C", 1.0)
      .with_hr_name("")
      .validate()
      .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
  }

  #[test]
  fn edit_defaults_new_fields_to_old() {
    let edit: EditFields = serde_json::from_value(json!({
      "old_college_name": "IIT Patna",
      "old_company_name": "Google",
      "old_role": "CTO",
      "old_ctc": 50000,
      "new_ctc": "60000"
    }))
    .unwrap();
    let edit = edit.validate().unwrap();
    assert_eq!(edit.new.college_name, "IIT Patna");
    assert_eq!(edit.new.company.name, "Google");
    assert_eq!(edit.new.company.role, "CTO");
    assert_eq!(edit.new.company.ctc, 60000.0);
    assert!(edit.person.is_none());
  }

  #[test]
  fn edit_requires_old_identity() {
    let edit = EditFields {
      old_college_name: Some("IIT Patna".into()),
      ..Default::default()
    };
    assert!(matches!(edit.validate(), Err(Error::Validation(_))));
  }
}
