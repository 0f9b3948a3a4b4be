use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    domain::{
        errors::DomainError,
        patient::{PatientPayload, PatientRecord},
        validation::validate_new_patient,
    },
    infrastructure::PatientStore,
};

/// What "deactivate" does to a patient.
///
/// `Delete` removes the row, which is what existing clients of the
/// `desactivar` endpoint rely on. `Flag` only clears `active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeactivationPolicy {
    #[default]
    Delete,
    Flag,
}

#[derive(Clone)]
pub struct PatientService {
    store: Arc<dyn PatientStore>,
    deactivation: DeactivationPolicy,
}

impl PatientService {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self {
            store,
            deactivation: DeactivationPolicy::default(),
        }
    }

    pub fn with_deactivation_policy(mut self, policy: DeactivationPolicy) -> Self {
        self.deactivation = policy;
        self
    }

    pub fn deactivation_policy(&self) -> DeactivationPolicy {
        self.deactivation
    }

    pub async fn list_patients(&self) -> Result<Vec<PatientRecord>, DomainError> {
        self.store.find_all().await
    }

    pub async fn get_patient(&self, id: &str) -> Result<PatientRecord, DomainError> {
        self.store.find_by_id(id).await?.ok_or(DomainError::NotFound)
    }

    pub async fn create_patient(
        &self,
        candidate: PatientPayload,
    ) -> Result<PatientRecord, DomainError> {
        validate_new_patient(&candidate)?;

        if self.store.exists(candidate.id()).await? {
            return Err(DomainError::Conflict);
        }

        let mut record = candidate.into_record();
        let inserted = self.store.insert(&record).await.map_err(|err| match err {
            DomainError::Conflict => DomainError::Conflict,
            other => {
                warn!(cedula = %record.id, error = %other, "patient insert failed");
                DomainError::internal("Error al crear paciente en la base de datos")
            }
        })?;

        if !inserted {
            return Err(DomainError::internal(
                "Error al crear paciente en la base de datos",
            ));
        }

        info!(cedula = %record.id, "patient created");

        match self.store.find_by_id(&record.id).await? {
            Some(stored) => Ok(stored),
            None => {
                warn!(cedula = %record.id, "created patient could not be read back");
                record.active = true;
                Ok(record)
            }
        }
    }

    /// Replaces the mutable fields of `path_id` with `body`.
    ///
    /// Only the id match is checked; the checksum and age rules apply to creation.
    pub async fn update_patient(
        &self,
        path_id: &str,
        body: PatientPayload,
    ) -> Result<PatientRecord, DomainError> {
        if body.id.as_deref() != Some(path_id) {
            return Err(DomainError::IdMismatch);
        }

        if !self.store.exists(path_id).await? {
            return Err(DomainError::NotFound);
        }

        let record = body.into_record();
        if !self.store.replace(&record).await? {
            warn!(cedula = %path_id, "patient vanished between existence check and update");
            return Err(DomainError::internal("Error al actualizar paciente"));
        }

        info!(cedula = %path_id, "patient updated");
        Ok(record)
    }

    pub async fn activate_patient(&self, id: &str) -> Result<(), DomainError> {
        if !self.store.set_active(id, true).await? {
            return Err(DomainError::NotFound);
        }

        info!(cedula = %id, "patient activated");
        Ok(())
    }

    pub async fn deactivate_patient(&self, id: &str) -> Result<(), DomainError> {
        let matched = match self.deactivation {
            DeactivationPolicy::Delete => self.store.remove(id).await?,
            DeactivationPolicy::Flag => self.store.set_active(id, false).await?,
        };

        if !matched {
            return Err(DomainError::NotFound);
        }

        info!(cedula = %id, policy = ?self.deactivation, "patient deactivated");
        Ok(())
    }

    pub async fn delete_patient(&self, id: &str) -> Result<(), DomainError> {
        if !self.store.remove(id).await? {
            return Err(DomainError::NotFound);
        }

        info!(cedula = %id, "patient deleted");
        Ok(())
    }
}
