use thiserror::Error;

/// Outcome classification for every patient operation.
///
/// Validation variants are reported one at a time, in the order
/// id format, mandatory fields, age range, uniqueness.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Cédula ecuatoriana inválida")]
    InvalidId,
    #[error("Nombre, cédula y correo son obligatorios")]
    InvalidFields,
    #[error("Edad debe estar entre 1 y 120 años")]
    AgeOutOfRange,
    #[error("La cédula ya está registrada")]
    Conflict,
    #[error("La cédula no coincide")]
    IdMismatch,
    #[error("Paciente no encontrado")]
    NotFound,
    #[error("{0}")]
    Internal(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// True for the variants produced by input validation, before any store access.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidId | Self::InvalidFields | Self::AgeOutOfRange | Self::IdMismatch
        )
    }
}
