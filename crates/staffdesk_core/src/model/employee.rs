//! Employee record model and field validation.
//!
//! # Responsibility
//! - Define the canonical employee record shape.
//! - Validate contact/reference fields before persistence.
//! - Define the post-termination visibility window.
//!
//! # Invariants
//! - Repository write paths must call `Employee::validate()` before SQL
//!   mutations.
//! - `employment_end`, once set, never changes; the termination service is
//!   the only writer.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

use crate::model::department::DepartmentId;
use crate::model::position::PositionId;

/// Stable employee identifier.
pub type EmployeeId = Uuid;

/// Days a terminated employee stays visible in default listings.
pub const VISIBILITY_WINDOW_DAYS: i64 = 30;

const MAX_PHONE_CHARS: usize = 20;
const MAX_CABINET_CHARS: usize = 10;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.+@.+\..+$").expect("valid email regex"));

/// Field-level validation failure for one employee record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    /// A required text field is blank after trim.
    MissingRequiredField(&'static str),
    /// A phone field exceeds the storage limit.
    PhoneTooLong { field: &'static str, len: usize },
    /// Cabinet label exceeds the storage limit.
    CabinetTooLong(usize),
    /// Corporate email does not look like an address.
    InvalidEmail(String),
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredField(field) => {
                write!(f, "required field `{field}` must not be blank")
            }
            Self::PhoneTooLong { field, len } => write!(
                f,
                "`{field}` must not exceed {MAX_PHONE_CHARS} characters, got {len}"
            ),
            Self::CabinetTooLong(len) => write!(
                f,
                "`cabinet` must not exceed {MAX_CABINET_CHARS} characters, got {len}"
            ),
            Self::InvalidEmail(value) => write!(f, "invalid corporate email `{value}`"),
        }
    }
}

impl Error for EmployeeValidationError {}

/// Canonical employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Stable employee id.
    pub employee_uuid: EmployeeId,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub mobile_phone: Option<String>,
    pub work_phone: String,
    pub corporate_email: String,
    /// Office/cabinet label.
    pub cabinet: String,
    pub department_uuid: DepartmentId,
    pub position_uuid: PositionId,
    pub manager_uuid: Option<EmployeeId>,
    pub assistant_uuid: Option<EmployeeId>,
    pub additional_info: Option<String>,
    /// Last working day. `None` while employed.
    pub employment_end: Option<NaiveDate>,
}

impl Employee {
    /// Creates an employee with a generated stable id and required fields.
    ///
    /// Optional fields start as `None`; callers set them before persisting.
    pub fn new(
        department_uuid: DepartmentId,
        position_uuid: PositionId,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        work_phone: impl Into<String>,
        corporate_email: impl Into<String>,
        cabinet: impl Into<String>,
    ) -> Self {
        Self {
            employee_uuid: Uuid::new_v4(),
            last_name: last_name.into(),
            first_name: first_name.into(),
            middle_name: None,
            date_of_birth: None,
            mobile_phone: None,
            work_phone: work_phone.into(),
            corporate_email: corporate_email.into(),
            cabinet: cabinet.into(),
            department_uuid,
            position_uuid,
            manager_uuid: None,
            assistant_uuid: None,
            additional_info: None,
            employment_end: None,
        }
    }

    /// Validates contact and reference fields.
    ///
    /// # Errors
    /// - Blank required field, over-long phone/cabinet, malformed email.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        for (field, value) in [
            ("last_name", self.last_name.as_str()),
            ("first_name", self.first_name.as_str()),
            ("work_phone", self.work_phone.as_str()),
            ("corporate_email", self.corporate_email.as_str()),
            ("cabinet", self.cabinet.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(EmployeeValidationError::MissingRequiredField(field));
            }
        }

        for (field, value) in [
            ("work_phone", Some(self.work_phone.as_str())),
            ("mobile_phone", self.mobile_phone.as_deref()),
        ] {
            if let Some(value) = value {
                let len = value.chars().count();
                if len > MAX_PHONE_CHARS {
                    return Err(EmployeeValidationError::PhoneTooLong { field, len });
                }
            }
        }

        let cabinet_len = self.cabinet.chars().count();
        if cabinet_len > MAX_CABINET_CHARS {
            return Err(EmployeeValidationError::CabinetTooLong(cabinet_len));
        }

        if !EMAIL_RE.is_match(&self.corporate_email) {
            return Err(EmployeeValidationError::InvalidEmail(
                self.corporate_email.clone(),
            ));
        }

        Ok(())
    }

    /// Returns whether this record appears in default listings.
    ///
    /// Employed records are always visible; terminated records stay visible
    /// for [`VISIBILITY_WINDOW_DAYS`] days after the stamped end date.
    pub fn is_visible(&self, today: NaiveDate) -> bool {
        match self.employment_end {
            None => true,
            Some(end) => (today - end).num_days() <= VISIBILITY_WINDOW_DAYS,
        }
    }
}
