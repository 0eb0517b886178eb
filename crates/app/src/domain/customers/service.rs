//! Customers service.

use std::collections::HashSet;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Connection, Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        customers::{
            data::{BulkImport, CustomerCandidate, CustomerFilter, CustomerOrder, NewCustomer},
            errors::{CustomersServiceError, ValidationError},
            import::{CustomerWriter, candidate_emails, import_candidates},
            records::{CustomerRecord, CustomerUuid},
            repository::PgCustomersRepository,
            validation::validate,
        },
        pagination::{Page, PageRequest, count_from_sql},
    },
};

/// Inserts each customer inside its own savepoint of the batch transaction.
struct SavepointWriter<'a, 'c> {
    repository: &'a PgCustomersRepository,
    tx: &'a mut Transaction<'c, Postgres>,
}

#[async_trait]
impl<'a, 'c> CustomerWriter for SavepointWriter<'a, 'c> {
    async fn insert_customer(
        &mut self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut savepoint = Connection::begin(&mut **self.tx).await?;

        match self
            .repository
            .create_customer(&mut savepoint, customer)
            .await
        {
            Ok(created) => {
                savepoint.commit().await?;

                Ok(created)
            }
            Err(error) => {
                savepoint.rollback().await?;

                Err(error.into())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }

    async fn taken_emails(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        emails: &[String],
    ) -> Result<HashSet<String>, CustomersServiceError> {
        let taken = self.repository.existing_emails(tx, emails).await?;

        Ok(taken.into_iter().collect())
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn list_customers(
        &self,
        filter: CustomerFilter,
        order: CustomerOrder,
        page: PageRequest,
    ) -> Result<Page<CustomerRecord>, CustomersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let total_count = count_from_sql(self.repository.count_customers(&mut tx, &filter).await?);
        let window = page.window(total_count);

        let items = if window.limit == 0 {
            Vec::new()
        } else {
            self.repository
                .list_customers(&mut tx, &filter, order, window)
                .await?
        };

        tx.commit().await?;

        Ok(Page {
            items,
            offset: window.offset,
            total_count,
        })
    }

    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let customer = self.repository.get_customer(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn create_customer(
        &self,
        candidate: CustomerCandidate,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let taken = self
            .taken_emails(&mut tx, &candidate_emails(std::slice::from_ref(&candidate)))
            .await?;

        let customer = validate(candidate, &taken)?;
        let email = customer.email.clone();

        let created = match self.repository.create_customer(&mut tx, customer).await {
            Ok(created) => created,
            Err(error) => {
                return Err(match CustomersServiceError::from(error) {
                    CustomersServiceError::AlreadyExists => {
                        ValidationError::DuplicateEmail(email).into()
                    }
                    other => other,
                });
            }
        };

        tx.commit().await?;

        info!(customer = %created.uuid, "customer created");

        Ok(created)
    }

    async fn bulk_create_customers(
        &self,
        candidates: Vec<CustomerCandidate>,
    ) -> Result<BulkImport, CustomersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let directory = self
            .taken_emails(&mut tx, &candidate_emails(&candidates))
            .await?;

        let outcome = {
            let mut writer = SavepointWriter {
                repository: &self.repository,
                tx: &mut tx,
            };

            import_candidates(&mut writer, directory, candidates).await?
        };

        tx.commit().await?;

        info!(
            created = outcome.created.len(),
            rejected = outcome.errors.len(),
            "bulk customer import finished"
        );

        Ok(outcome)
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Retrieve one page of customers matching `filter`.
    async fn list_customers(
        &self,
        filter: CustomerFilter,
        order: CustomerOrder,
        page: PageRequest,
    ) -> Result<Page<CustomerRecord>, CustomersServiceError>;

    /// Retrieve a single customer.
    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Validate and create one customer.
    async fn create_customer(
        &self,
        candidate: CustomerCandidate,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Import a batch of candidate records, reporting per-record failures.
    ///
    /// Storage failures abort the whole batch and nothing is kept.
    async fn bulk_create_customers(
        &self,
        candidates: Vec<CustomerCandidate>,
    ) -> Result<BulkImport, CustomersServiceError>;
}
