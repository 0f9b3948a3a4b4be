use std::sync::Arc;

use crate::application::patient_service::PatientService;

#[derive(Clone)]
pub struct AppState {
    pub patient_service: Arc<PatientService>,
}

impl AppState {
    pub fn new(patient_service: Arc<PatientService>) -> Self {
        Self { patient_service }
    }
}
