use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A stored patient, keyed by cédula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientRecord {
    #[serde(rename = "cedula")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "edad")]
    pub age: i32,
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "fechaCreacion")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "fechaActualizacion")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Inbound patient body as clients send it.
///
/// Every member is optional: absent text counts as blank, absent `edad` as 0
/// and absent `activo` as false, so a missing field fails validation exactly
/// like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PatientPayload {
    #[serde(rename = "cedula", default)]
    pub id: Option<String>,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "correo", default)]
    pub email: Option<String>,
    #[serde(rename = "edad", default)]
    pub age: i32,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "activo", default)]
    pub active: bool,
    #[serde(rename = "fechaCreacion", default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "fechaActualizacion", default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Timestamps are server-assigned, so a client value never fails the request.
/// RFC 3339 and offset-less local date-times (read as UTC) are kept; anything else is dropped.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::String(raw) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(stamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(stamp.with_timezone(&Utc)));
    }

    Ok(raw
        .parse::<NaiveDateTime>()
        .ok()
        .map(|local| local.and_utc()))
}

impl PatientPayload {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn into_record(self) -> PatientRecord {
        PatientRecord {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            age: self.age,
            address: self.address,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
