use axum::{
    Router,
    http::{HeaderName, HeaderValue, header},
    routing::{get, put},
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{
    interface::http::patients_handler::{
        activate_patient, create_patient, deactivate_patient, delete_patient, get_patient,
        healthcheck, list_patients, preflight, update_patient,
    },
    state::AppState,
};

pub const API_BASE_PATH: &str = "/api";

/// Cross-origin headers stamped on every response, preflight or not.
pub const CORS_HEADERS: [(HeaderName, &str); 5] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (
        header::ACCESS_CONTROL_ALLOW_METHODS,
        "GET, POST, PUT, DELETE, OPTIONS, HEAD",
    ),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        "Origin, X-Requested-With, Content-Type, Accept, Authorization",
    ),
    (header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"),
    (header::ACCESS_CONTROL_MAX_AGE, "86400"),
];

pub fn build_router(state: AppState) -> Router {
    let patients = Router::new()
        .route(
            "/pacientes",
            get(list_patients).post(create_patient).options(preflight),
        )
        .route(
            "/pacientes/{cedula}",
            get(get_patient)
                .put(update_patient)
                .delete(delete_patient)
                .options(preflight),
        )
        .route(
            "/pacientes/{cedula}/activar",
            put(activate_patient).options(preflight),
        )
        .route(
            "/pacientes/{cedula}/desactivar",
            put(deactivate_patient).options(preflight),
        );

    let mut router = Router::new()
        .route("/health", get(healthcheck))
        .nest(API_BASE_PATH, patients)
        .layer(TraceLayer::new_for_http());

    // tower-http's CorsLayer rejects a wildcard origin combined with credentials,
    // so the headers are set directly.
    for (name, value) in CORS_HEADERS {
        router = router.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ));
    }

    router.with_state(state)
}
