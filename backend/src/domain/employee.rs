//! Employee data model.
//!
//! An [`Employee`] is the only entity in the service. Its identifier is
//! assigned by storage on first insert, so a freshly built record carries no
//! id until it has been persisted.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of names and email addresses.
///
/// Mirrors the `VARCHAR(255)` columns of the `employees` table.
pub const FIELD_MAX: usize = 255;

/// Validation errors returned when constructing employee values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    NonPositiveId,
    EmptyFirstName,
    EmptyLastName,
    NameTooLong { max: usize },
    EmptyEmail,
    EmailTooLong { max: usize },
    InvalidEmail,
}

impl fmt::Display for EmployeeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId => write!(f, "employee id must be a positive integer"),
            Self::EmptyFirstName => write!(f, "first name must not be empty"),
            Self::EmptyLastName => write!(f, "last name must not be empty"),
            Self::NameTooLong { max } => write!(f, "names must be at most {max} characters"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must look like local@domain"),
        }
    }
}

impl std::error::Error for EmployeeValidationError {}

/// Storage-assigned employee identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct EmployeeId(i64);

impl EmployeeId {
    /// Validate and construct an [`EmployeeId`].
    ///
    /// # Examples
    /// ```
    /// use employees::domain::EmployeeId;
    ///
    /// assert!(EmployeeId::new(1).is_ok());
    /// assert!(EmployeeId::new(0).is_err());
    /// ```
    pub fn new(id: i64) -> Result<Self, EmployeeValidationError> {
        if id <= 0 {
            return Err(EmployeeValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// Raw integer value as stored in the database.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EmployeeId> for i64 {
    fn from(value: EmployeeId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for EmployeeId {
    type Error = EmployeeValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Which name field a [`PersonName`] is being validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    First,
    Last,
}

/// First or last name of an employee, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a name.
    pub fn new(kind: NameKind, name: impl Into<String>) -> Result<Self, EmployeeValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(match kind {
                NameKind::First => EmployeeValidationError::EmptyFirstName,
                NameKind::Last => EmployeeValidationError::EmptyLastName,
            });
        }
        if trimmed.chars().count() > FIELD_MAX {
            return Err(EmployeeValidationError::NameTooLong { max: FIELD_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address used as the employee's business key.
///
/// Compared byte-for-byte; the storage unique constraint is case sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an email address.
    pub fn new(email: impl Into<String>) -> Result<Self, EmployeeValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(EmployeeValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > FIELD_MAX {
            return Err(EmployeeValidationError::EmailTooLong { max: FIELD_MAX });
        }
        if !email_regex().is_match(trimmed) {
            return Err(EmployeeValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// An employee record.
///
/// ## Invariants
/// - `id` is `None` until storage assigns one and never changes afterwards.
/// - Names are non-empty once trimmed.
/// - `email` is unique across persisted employees (enforced by the service
///   on create and by the storage constraint otherwise).
///
/// Serialises as `{"id", "firstName", "lastName", "email"}` with `id` emitted
/// as `null` for unsaved records.
///
/// # Examples
/// ```
/// use employees::domain::{Employee, EmployeeId};
///
/// let draft = Employee::try_from_strings("Ada", "Lovelace", "ada@example.com")
///     .expect("valid employee");
/// assert!(draft.id().is_none());
///
/// let stored = draft.with_id(EmployeeId::new(7).expect("positive id"));
/// assert_eq!(stored.id().map(EmployeeId::get), Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EmployeeDto", into = "EmployeeDto")]
pub struct Employee {
    id: Option<EmployeeId>,
    first_name: PersonName,
    last_name: PersonName,
    email: EmailAddress,
}

impl Employee {
    /// Build an unsaved employee from validated parts.
    pub fn new(first_name: PersonName, last_name: PersonName, email: EmailAddress) -> Self {
        Self {
            id: None,
            first_name,
            last_name,
            email,
        }
    }

    /// Validate raw strings and build an unsaved employee.
    pub fn try_from_strings(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, EmployeeValidationError> {
        Ok(Self::new(
            PersonName::new(NameKind::First, first_name)?,
            PersonName::new(NameKind::Last, last_name)?,
            EmailAddress::new(email)?,
        ))
    }

    /// Return the same record carrying `id`.
    #[must_use]
    pub fn with_id(mut self, id: EmployeeId) -> Self {
        self.id = Some(id);
        self
    }

    /// Storage identifier, absent before the first save.
    pub fn id(&self) -> Option<EmployeeId> {
        self.id
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeDto {
    #[serde(default)]
    id: Option<i64>,
    first_name: String,
    last_name: String,
    email: String,
}

impl From<Employee> for EmployeeDto {
    fn from(value: Employee) -> Self {
        let Employee {
            id,
            first_name,
            last_name,
            email,
        } = value;
        Self {
            id: id.map(EmployeeId::get),
            first_name: first_name.0,
            last_name: last_name.0,
            email: email.0,
        }
    }
}

impl TryFrom<EmployeeDto> for Employee {
    type Error = EmployeeValidationError;

    fn try_from(value: EmployeeDto) -> Result<Self, Self::Error> {
        let EmployeeDto {
            id,
            first_name,
            last_name,
            email,
        } = value;
        let employee = Self::try_from_strings(first_name, last_name, email)?;
        match id {
            Some(raw) => Ok(employee.with_id(EmployeeId::new(raw)?)),
            None => Ok(employee),
        }
    }
}
