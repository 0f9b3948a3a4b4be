use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pacientes_api::{
    application::patient_service::PatientService,
    build_router,
    config::{AppConfig, StoreBackend},
    domain::{errors::DomainError, patient::PatientPayload},
    infrastructure::{
        PatientStore, in_memory_patient_store::InMemoryPatientStore,
        postgres_patient_store::PostgresPatientStore,
    },
    state::AppState,
};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pacientes-api")]
#[command(about = "Patient record service keyed by cédula")]
struct Cli {
    /// Overrides APP_HOST.
    #[arg(long, global = true)]
    host: Option<String>,
    /// Overrides APP_PORT.
    #[arg(long, global = true)]
    port: Option<u16>,
    /// Overrides STORE_BACKEND (postgres or memory).
    #[arg(long, global = true)]
    backend: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,
    /// Create the paciente table and exit.
    Migrate,
    /// Insert a few sample patients, skipping ones that already exist.
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("failed to load application configuration")?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(backend) = cli.backend.as_deref() {
        config.store_backend = StoreBackend::parse(backend)?;
    }

    let store = connect_store(&config).await?;
    store
        .init()
        .await
        .context("failed to initialize paciente schema")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, store).await,
        Command::Migrate => {
            info!("paciente schema is up to date");
            Ok(())
        }
        Command::Seed => seed(&config, store).await,
    }
}

async fn connect_store(config: &AppConfig) -> Result<Arc<dyn PatientStore>> {
    let store: Arc<dyn PatientStore> = match config.store_backend {
        StoreBackend::Postgres => {
            info!("store backend: postgres");
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(config.db_acquire_timeout)
                .connect(&config.database_url)
                .await
                .context("failed to connect to PostgreSQL")?;
            Arc::new(PostgresPatientStore::new(pool))
        }
        StoreBackend::Memory => {
            info!("store backend: memory");
            Arc::new(InMemoryPatientStore::new())
        }
    };

    Ok(store)
}

async fn serve(config: AppConfig, store: Arc<dyn PatientStore>) -> Result<()> {
    let service =
        PatientService::new(store).with_deactivation_policy(config.deactivation_policy);
    let app = build_router(AppState::new(Arc::new(service)));

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, policy = ?config.deactivation_policy, "patient service started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn seed(config: &AppConfig, store: Arc<dyn PatientStore>) -> Result<()> {
    if config.store_backend == StoreBackend::Memory {
        warn!("seeding the memory backend has no effect once this process exits");
    }

    let service = PatientService::new(store);
    let samples = [
        ("1710034065", "Ana Torres", "ana.torres@example.com", 34, Some("Av. Amazonas, Quito")),
        ("0912345675", "Luis Mera", "luis.mera@example.com", 58, Some("Malecón 2000, Guayaquil")),
        ("0102030400", "Rosa Quishpe", "rosa.quishpe@example.com", 7, None),
    ];

    for (cedula, name, email, age, address) in samples {
        let payload = PatientPayload {
            id: Some(cedula.to_string()),
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            age,
            address: address.map(str::to_string),
            ..PatientPayload::default()
        };

        match service.create_patient(payload).await {
            Ok(created) => info!(cedula = %created.id, "seeded patient"),
            Err(DomainError::Conflict) => info!(cedula, "patient already present"),
            Err(err) => return Err(err).context("failed to insert seed patient"),
        }
    }

    info!("seed data inserted");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pacientes_api=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
