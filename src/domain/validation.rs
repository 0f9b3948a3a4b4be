use std::ops::RangeInclusive;

use crate::domain::{cedula::checksum_valid, errors::DomainError, patient::PatientPayload};

pub const AGE_RANGE: RangeInclusive<i32> = 1..=120;

/// First rule a candidate breaks, independent of its identifier checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldViolation {
    MissingMandatory,
    AgeOutOfRange,
}

impl From<FieldViolation> for DomainError {
    fn from(value: FieldViolation) -> Self {
        match value {
            FieldViolation::MissingMandatory => Self::InvalidFields,
            FieldViolation::AgeOutOfRange => Self::AgeOutOfRange,
        }
    }
}

pub fn fields_valid(candidate: &PatientPayload) -> Result<(), FieldViolation> {
    let blank = |value: &str| value.trim().is_empty();

    if blank(candidate.name()) || blank(candidate.email()) || blank(candidate.id()) {
        return Err(FieldViolation::MissingMandatory);
    }

    if !AGE_RANGE.contains(&candidate.age) {
        return Err(FieldViolation::AgeOutOfRange);
    }

    Ok(())
}

/// Creation rules in their fixed order: id checksum, mandatory fields, age.
pub fn validate_new_patient(candidate: &PatientPayload) -> Result<(), DomainError> {
    if !checksum_valid(candidate.id()) {
        return Err(DomainError::InvalidId);
    }

    fields_valid(candidate)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, name: &str, email: &str, age: i32) -> PatientPayload {
        PatientPayload {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            age,
            ..PatientPayload::default()
        }
    }

    #[test]
    fn accepts_complete_candidate() {
        assert!(validate_new_patient(&candidate("1710034065", "Ana", "a@x.com", 30)).is_ok());
    }

    #[test]
    fn blank_mandatory_fields_are_rejected() {
        assert_eq!(
            fields_valid(&candidate("1710034065", "   ", "a@x.com", 30)),
            Err(FieldViolation::MissingMandatory)
        );
        assert_eq!(
            fields_valid(&candidate("1710034065", "Ana", "", 30)),
            Err(FieldViolation::MissingMandatory)
        );
        assert_eq!(
            fields_valid(&PatientPayload {
                email: None,
                ..candidate("1710034065", "Ana", "a@x.com", 30)
            }),
            Err(FieldViolation::MissingMandatory)
        );
    }

    #[test]
    fn age_bounds_are_inclusive() {
        for age in [1, 120] {
            assert!(fields_valid(&candidate("1710034065", "Ana", "a@x.com", age)).is_ok());
        }
        for age in [0, 121, -5] {
            assert_eq!(
                fields_valid(&candidate("1710034065", "Ana", "a@x.com", age)),
                Err(FieldViolation::AgeOutOfRange)
            );
        }
    }

    #[test]
    fn only_first_violation_is_reported() {
        // Bad id, blank name and bad age at once: the id wins.
        let err = validate_new_patient(&candidate("1710034066", "", "a@x.com", 0))
            .expect_err("candidate should be rejected");
        assert!(matches!(err, DomainError::InvalidId));

        // Valid id, blank name and bad age: mandatory fields win over age.
        let err = validate_new_patient(&candidate("1710034065", "", "a@x.com", 0))
            .expect_err("candidate should be rejected");
        assert!(matches!(err, DomainError::InvalidFields));

        let err = validate_new_patient(&candidate("1710034065", "Ana", "a@x.com", 121))
            .expect_err("candidate should be rejected");
        assert!(matches!(err, DomainError::AgeOutOfRange));
    }
}
