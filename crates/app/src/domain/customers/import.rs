//! Bulk customer import.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::customers::{
    data::{BulkImport, CustomerCandidate, NewCustomer},
    errors::{CustomersServiceError, ValidationError},
    records::CustomerRecord,
    validation::validate,
};

/// Persists validated customers on behalf of the importer.
#[async_trait]
pub(crate) trait CustomerWriter: Send {
    /// Insert one customer. A unique violation must surface as
    /// [`CustomersServiceError::AlreadyExists`] and leave the writer usable.
    async fn insert_customer(
        &mut self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError>;
}

/// Emails mentioned by a batch, used to preload the taken-email directory.
pub(crate) fn candidate_emails(candidates: &[CustomerCandidate]) -> Vec<String> {
    candidates
        .iter()
        .filter_map(|candidate| candidate.email.clone())
        .filter(|email| !email.is_empty())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect()
}

/// Validate and persist `candidates` in input order.
///
/// Rejected records contribute their error message to `errors` and never stop
/// the batch. Each created email joins `directory`, so later duplicates in the
/// same batch are rejected too.
pub(crate) async fn import_candidates<W>(
    writer: &mut W,
    mut directory: HashSet<String>,
    candidates: Vec<CustomerCandidate>,
) -> Result<BulkImport, CustomersServiceError>
where
    W: CustomerWriter + ?Sized,
{
    let mut outcome = BulkImport {
        created: Vec::with_capacity(candidates.len()),
        errors: Vec::new(),
    };

    for (index, candidate) in candidates.into_iter().enumerate() {
        let customer = match validate(candidate, &directory) {
            Ok(customer) => customer,
            Err(error) => {
                debug!(index, %error, "candidate record rejected");
                outcome.errors.push(error.to_string());

                continue;
            }
        };

        let email = customer.email.clone();

        match writer.insert_customer(customer).await {
            Ok(created) => {
                directory.insert(email);
                outcome.created.push(created);
            }
            Err(CustomersServiceError::AlreadyExists) => {
                debug!(index, email, "candidate email taken by a concurrent writer");
                directory.insert(email.clone());
                outcome
                    .errors
                    .push(ValidationError::DuplicateEmail(email).to_string());
            }
            Err(error) => return Err(error),
        }
    }

    Ok(outcome)
}
