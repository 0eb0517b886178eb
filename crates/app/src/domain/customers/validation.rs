//! Candidate record validation.

use std::{collections::HashSet, hash::BuildHasher};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::customers::{
    data::{CustomerCandidate, NewCustomer},
    errors::ValidationError,
};

/// Accepted phone formats: 10 to 15 digits with an optional leading `+`, or
/// `NNN-NNN-NNNN`.
pub const PHONE_PATTERN: &str = r"^(\+?\d{10,15}|\d{3}-\d{3}-\d{4})$";

#[expect(clippy::unwrap_used, reason = "pattern is a checked constant")]
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(PHONE_PATTERN).unwrap());

/// Anything that can tell whether an email is already taken.
pub trait EmailDirectory {
    fn contains_email(&self, email: &str) -> bool;
}

impl<S: BuildHasher> EmailDirectory for HashSet<String, S> {
    fn contains_email(&self, email: &str) -> bool {
        self.contains(email)
    }
}

#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(phone)
}

/// Validate a single candidate against the directory of taken emails.
///
/// Checks run in order: presence of name and email, email uniqueness, phone
/// format. An empty phone is treated as absent.
///
/// # Errors
///
/// Returns the first [`ValidationError`] the candidate trips.
pub fn validate(
    candidate: CustomerCandidate,
    directory: &impl EmailDirectory,
) -> Result<NewCustomer, ValidationError> {
    let CustomerCandidate { name, email, phone } = candidate;

    let (Some(name), Some(email)) = (
        name.filter(|name| !name.is_empty()),
        email.filter(|email| !email.is_empty()),
    ) else {
        return Err(ValidationError::MissingNameOrEmail);
    };

    if directory.contains_email(&email) {
        return Err(ValidationError::DuplicateEmail(email));
    }

    let phone = phone.filter(|phone| !phone.is_empty());

    if let Some(phone) = phone.as_deref()
        && !is_valid_phone(phone)
    {
        return Err(ValidationError::InvalidPhone(phone.to_owned()));
    }

    Ok(NewCustomer { name, email, phone })
}
