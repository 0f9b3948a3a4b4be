use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::debug;

use crate::{
    domain::{errors::DomainError, patient::PatientRecord},
    infrastructure::PatientStore,
};

const UNIQUE_VIOLATION: &str = "23505";

/// `PatientStore` over a PostgreSQL pool; each call checks out one pooled connection.
#[derive(Clone)]
pub struct PostgresPatientStore {
    pool: PgPool,
}

impl PostgresPatientStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PatientStore for PostgresPatientStore {
    async fn init(&self) -> Result<(), DomainError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|err| DomainError::storage(format!("migration failed: {err}")))
    }

    async fn find_all(&self) -> Result<Vec<PatientRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT cedula, nombre, correo, edad, direccion, activo, fecha_creacion, fecha_actualizacion
            FROM paciente
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_patient).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<PatientRecord>, DomainError> {
        let maybe_row = sqlx::query(
            r#"
            SELECT cedula, nombre, correo, edad, direccion, activo, fecha_creacion, fecha_actualizacion
            FROM paciente
            WHERE cedula = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        maybe_row.as_ref().map(row_to_patient).transpose()
    }

    async fn exists(&self, id: &str) -> Result<bool, DomainError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM paciente WHERE cedula = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(exists)
    }

    async fn insert(&self, record: &PatientRecord) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO paciente (cedula, nombre, correo, edad, direccion, activo)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(record.age)
        .bind(record.address.as_deref())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn replace(&self, record: &PatientRecord) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE paciente
            SET
                nombre = $1,
                correo = $2,
                edad = $3,
                direccion = $4,
                activo = $5,
                fecha_actualizacion = NOW()
            WHERE cedula = $6
            "#,
        )
        .bind(&record.name)
        .bind(&record.email)
        .bind(record.age)
        .bind(record.address.as_deref())
        .bind(record.active)
        .bind(&record.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE paciente SET activo = $1, fecha_actualizacion = NOW() WHERE cedula = $2",
        )
        .bind(active)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn remove(&self, id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM paciente WHERE cedula = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }
}

fn row_to_patient(row: &PgRow) -> Result<PatientRecord, DomainError> {
    Ok(PatientRecord {
        id: row.try_get::<String, _>("cedula").map_err(map_sqlx_error)?,
        name: row.try_get::<String, _>("nombre").map_err(map_sqlx_error)?,
        email: row.try_get::<String, _>("correo").map_err(map_sqlx_error)?,
        age: row.try_get::<i32, _>("edad").map_err(map_sqlx_error)?,
        address: row
            .try_get::<Option<String>, _>("direccion")
            .map_err(map_sqlx_error)?,
        active: row.try_get::<bool, _>("activo").map_err(map_sqlx_error)?,
        created_at: row
            .try_get::<Option<DateTime<Utc>>, _>("fecha_creacion")
            .map_err(map_sqlx_error)?,
        updated_at: row
            .try_get::<Option<DateTime<Utc>>, _>("fecha_actualizacion")
            .map_err(map_sqlx_error)?,
    })
}

fn map_sqlx_error(error: sqlx::Error) -> DomainError {
    match error {
        sqlx::Error::Database(db_error) if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            DomainError::Conflict
        }
        other => {
            debug!(error = %other, "paciente store call failed");
            DomainError::storage(other.to_string())
        }
    }
}
