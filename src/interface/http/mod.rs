pub mod api_error;
pub mod patients_handler;
