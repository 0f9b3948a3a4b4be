use pacientes_api::{
    domain::{errors::DomainError, patient::PatientRecord},
    infrastructure::{PatientStore, postgres_patient_store::PostgresPatientStore},
};
use sqlx::{PgPool, postgres::PgPoolOptions};

async fn maybe_pool() -> Option<PgPool> {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()?;

    PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .ok()
}

fn record(id: &str, active: bool) -> PatientRecord {
    PatientRecord {
        id: id.to_string(),
        name: "Ana".to_string(),
        email: "a@x.com".to_string(),
        age: 30,
        address: None,
        active,
        created_at: None,
        updated_at: None,
    }
}

#[tokio::test]
async fn postgres_store_crud_flow() {
    let Some(pool) = maybe_pool().await else {
        eprintln!(
            "Skipping postgres_store_crud_flow: TEST_DATABASE_URL/DATABASE_URL is not set or database is unreachable."
        );
        return;
    };

    let store = PostgresPatientStore::new(pool.clone());
    store.init().await.expect("migrations should run");

    sqlx::query("TRUNCATE TABLE paciente")
        .execute(&pool)
        .await
        .expect("truncate should succeed");

    assert!(store.find_all().await.expect("list").is_empty());
    assert!(!store.exists("1710034065").await.expect("exists"));

    assert!(
        store
            .insert(&record("1710034065", false))
            .await
            .expect("insert should succeed")
    );

    let stored = store
        .find_by_id("1710034065")
        .await
        .expect("get should succeed")
        .expect("patient should exist");
    assert!(stored.active, "insert forces activo = TRUE");
    assert!(stored.created_at.is_some());
    assert!(store.exists("1710034065").await.expect("exists"));

    let err = store
        .insert(&record("1710034065", true))
        .await
        .expect_err("primary key should reject the duplicate");
    assert!(matches!(err, DomainError::Conflict));

    let mut changed = record("1710034065", false);
    changed.name = "Ana María".to_string();
    changed.address = Some("Quito".to_string());
    assert!(store.replace(&changed).await.expect("replace"));

    let stored = store
        .find_by_id("1710034065")
        .await
        .expect("get should succeed")
        .expect("patient should exist");
    assert_eq!(stored.name, "Ana María");
    assert_eq!(stored.address.as_deref(), Some("Quito"));
    assert!(!stored.active);

    assert!(store.set_active("1710034065", true).await.expect("set_active"));
    assert!(!store.set_active("0912345675", true).await.expect("set_active"));
    assert!(!store.replace(&record("0912345675", true)).await.expect("replace"));

    assert!(store.remove("1710034065").await.expect("remove"));
    assert!(!store.remove("1710034065").await.expect("remove"));
    assert!(
        store
            .find_by_id("1710034065")
            .await
            .expect("get should succeed")
            .is_none()
    );
}
