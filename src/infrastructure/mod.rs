use async_trait::async_trait;

use crate::domain::{errors::DomainError, patient::PatientRecord};

pub mod in_memory_patient_store;
pub mod postgres_patient_store;

/// Gateway to the `paciente` table.
///
/// `Ok(false)` / `Ok(None)` mean no row matched; a failing store call is
/// always `Err(DomainError::Storage(..))`, and a primary key collision on
/// insert is `Err(DomainError::Conflict)`.
#[async_trait]
pub trait PatientStore: Send + Sync {
    async fn init(&self) -> Result<(), DomainError>;
    async fn find_all(&self) -> Result<Vec<PatientRecord>, DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<PatientRecord>, DomainError>;
    async fn exists(&self, id: &str) -> Result<bool, DomainError>;
    /// Inserts with `active` forced to true, whatever the record carries.
    async fn insert(&self, record: &PatientRecord) -> Result<bool, DomainError>;
    /// Overwrites name, email, age, address and active for `record.id`.
    async fn replace(&self, record: &PatientRecord) -> Result<bool, DomainError>;
    async fn set_active(&self, id: &str, active: bool) -> Result<bool, DomainError>;
    async fn remove(&self, id: &str) -> Result<bool, DomainError>;
}
