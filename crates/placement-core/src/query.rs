//! Sorting and filtering parameters for record queries.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, entity::non_blank};

/// Column a record listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
  CollegeName,
  CompanyName,
  Role,
  Ctc,
}

impl SortBy {
  pub fn as_str(self) -> &'static str {
    match self {
      SortBy::CollegeName => "college_name",
      SortBy::CompanyName => "company_name",
      SortBy::Role => "role",
      SortBy::Ctc => "ctc",
    }
  }
}

impl FromStr for SortBy {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "college_name" => Ok(SortBy::CollegeName),
      "company_name" => Ok(SortBy::CompanyName),
      "role" => Ok(SortBy::Role),
      "ctc" => Ok(SortBy::Ctc),
      other => Err(Error::InvalidArgument(format!(
        "invalid sort column {other:?}; expected one of college_name, \
         company_name, role, ctc"
      ))),
    }
  }
}

impl fmt::Display for SortBy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
  #[default]
  Asc,
  Desc,
}

impl FromStr for Order {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "asc" => Ok(Order::Asc),
      "desc" => Ok(Order::Desc),
      other => Err(Error::InvalidArgument(format!(
        "invalid order {other:?}; expected asc or desc"
      ))),
    }
  }
}

/// Parameters for `search_with_filters`. All present filters must match.
///
/// `college_name` matches any college whose name contains it; `company_name`
/// and `role` must match exactly. Every comparison ignores case, including
/// non-ASCII letters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchFilter {
  pub college_name: Option<String>,
  pub company_name: Option<String>,
  pub role:         Option<String>,
}

impl SearchFilter {
  /// Drop blank filters so they behave as absent.
  pub fn normalized(self) -> Self {
    Self {
      college_name: non_blank(self.college_name),
      company_name: non_blank(self.company_name),
      role:         non_blank(self.role),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.college_name.is_none() && self.company_name.is_none() && self.role.is_none()
  }
}
