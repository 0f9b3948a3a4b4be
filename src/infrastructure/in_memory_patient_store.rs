use std::collections::{HashMap, hash_map::Entry};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    domain::{errors::DomainError, patient::PatientRecord},
    infrastructure::PatientStore,
};

#[derive(Debug, Default)]
pub struct InMemoryPatientStore {
    patients_by_id: RwLock<HashMap<String, PatientRecord>>,
}

impl InMemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PatientStore for InMemoryPatientStore {
    async fn init(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<PatientRecord>, DomainError> {
        Ok(self
            .patients_by_id
            .read()
            .await
            .values()
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<PatientRecord>, DomainError> {
        Ok(self.patients_by_id.read().await.get(id).cloned())
    }

    async fn exists(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.patients_by_id.read().await.contains_key(id))
    }

    async fn insert(&self, record: &PatientRecord) -> Result<bool, DomainError> {
        let mut patients_by_id = self.patients_by_id.write().await;
        let Entry::Vacant(slot) = patients_by_id.entry(record.id.clone()) else {
            return Err(DomainError::Conflict);
        };

        let now = Utc::now();
        slot.insert(PatientRecord {
            active: true,
            created_at: Some(now),
            updated_at: Some(now),
            ..record.clone()
        });
        Ok(true)
    }

    async fn replace(&self, record: &PatientRecord) -> Result<bool, DomainError> {
        let mut patients_by_id = self.patients_by_id.write().await;
        let Some(stored) = patients_by_id.get_mut(&record.id) else {
            return Ok(false);
        };

        stored.name = record.name.clone();
        stored.email = record.email.clone();
        stored.age = record.age;
        stored.address = record.address.clone();
        stored.active = record.active;
        stored.updated_at = Some(Utc::now());
        Ok(true)
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<bool, DomainError> {
        let mut patients_by_id = self.patients_by_id.write().await;
        let Some(stored) = patients_by_id.get_mut(id) else {
            return Ok(false);
        };

        stored.active = active;
        stored.updated_at = Some(Utc::now());
        Ok(true)
    }

    async fn remove(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.patients_by_id.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, active: bool) -> PatientRecord {
        PatientRecord {
            id: id.to_string(),
            name: "Ana".to_string(),
            email: "a@x.com".to_string(),
            age: 30,
            address: Some("Quito".to_string()),
            active,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn insert_forces_active_and_stamps_timestamps() {
        let store = InMemoryPatientStore::new();

        assert!(store.insert(&record("1710034065", false)).await.unwrap());

        let stored = store
            .find_by_id("1710034065")
            .await
            .unwrap()
            .expect("patient should exist");
        assert!(stored.active);
        assert!(stored.created_at.is_some());
        assert_eq!(stored.created_at, stored.updated_at);
    }

    #[tokio::test]
    async fn duplicate_insert_is_a_conflict() {
        let store = InMemoryPatientStore::new();
        store.insert(&record("1710034065", true)).await.unwrap();

        let err = store
            .insert(&record("1710034065", true))
            .await
            .expect_err("second insert should fail");
        assert!(matches!(err, DomainError::Conflict));
    }

    #[tokio::test]
    async fn exists_agrees_with_find_by_id() {
        let store = InMemoryPatientStore::new();
        store.insert(&record("1710034065", true)).await.unwrap();

        for id in ["1710034065", "0102030400"] {
            let found = store.find_by_id(id).await.unwrap().is_some();
            assert_eq!(store.exists(id).await.unwrap(), found);
        }
    }

    #[tokio::test]
    async fn mutations_report_whether_a_row_matched() {
        let store = InMemoryPatientStore::new();

        assert!(!store.replace(&record("1710034065", true)).await.unwrap());
        assert!(!store.set_active("1710034065", false).await.unwrap());
        assert!(!store.remove("1710034065").await.unwrap());

        store.insert(&record("1710034065", true)).await.unwrap();

        let mut changed = record("1710034065", false);
        changed.name = "Ana María".to_string();
        changed.address = None;
        assert!(store.replace(&changed).await.unwrap());

        let stored = store.find_by_id("1710034065").await.unwrap().unwrap();
        assert_eq!(stored.name, "Ana María");
        assert_eq!(stored.address, None);
        assert!(!stored.active);

        assert!(store.set_active("1710034065", true).await.unwrap());
        assert!(store.find_by_id("1710034065").await.unwrap().unwrap().active);

        assert!(store.remove("1710034065").await.unwrap());
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn id_can_be_reused_after_removal() {
        let store = InMemoryPatientStore::new();
        store.insert(&record("1710034065", true)).await.unwrap();
        store.remove("1710034065").await.unwrap();

        assert!(store.insert(&record("1710034065", true)).await.unwrap());
    }
}
