pub mod cedula;
pub mod errors;
pub mod patient;
pub mod validation;
