use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::ai::gateway_service::AiGatewayService;
use crate::infra::messaging::whatsapp_service::WhatsAppService;
use crate::infra::repositories::{
    postgres_appointment_repo::PostgresAppointmentRepo, postgres_crm_repo::PostgresCrmRepo,
    postgres_holiday_repo::PostgresHolidayRepo, postgres_lead_repo::PostgresLeadRepo,
    postgres_professional_repo::PostgresProfessionalRepo, postgres_schedule_repo::PostgresScheduleRepo,
    postgres_service_repo::PostgresServiceRepo,
    sqlite_appointment_repo::SqliteAppointmentRepo, sqlite_crm_repo::SqliteCrmRepo,
    sqlite_holiday_repo::SqliteHolidayRepo, sqlite_lead_repo::SqliteLeadRepo,
    sqlite_professional_repo::SqliteProfessionalRepo, sqlite_schedule_repo::SqliteScheduleRepo,
    sqlite_service_repo::SqliteServiceRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let assistant = Arc::new(AiGatewayService::new(
        config.ai_gateway_url.clone(),
        config.ai_api_key.clone(),
        config.ai_model.clone(),
    ));
    let messenger = Arc::new(WhatsAppService::new(
        config.whatsapp_api_token.clone(),
        config.whatsapp_phone_number_id.clone(),
    ));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            professional_repo: Arc::new(PostgresProfessionalRepo::new(pool.clone())),
            service_repo: Arc::new(PostgresServiceRepo::new(pool.clone())),
            appointment_repo: Arc::new(PostgresAppointmentRepo::new(pool.clone())),
            schedule_repo: Arc::new(PostgresScheduleRepo::new(pool.clone())),
            holiday_repo: Arc::new(PostgresHolidayRepo::new(pool.clone())),
            lead_repo: Arc::new(PostgresLeadRepo::new(pool.clone())),
            crm_repo: Arc::new(PostgresCrmRepo::new(pool.clone())),
            assistant,
            messenger,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            professional_repo: Arc::new(SqliteProfessionalRepo::new(pool.clone())),
            service_repo: Arc::new(SqliteServiceRepo::new(pool.clone())),
            appointment_repo: Arc::new(SqliteAppointmentRepo::new(pool.clone())),
            schedule_repo: Arc::new(SqliteScheduleRepo::new(pool.clone())),
            holiday_repo: Arc::new(SqliteHolidayRepo::new(pool.clone())),
            lead_repo: Arc::new(SqliteLeadRepo::new(pool.clone())),
            crm_repo: Arc::new(SqliteCrmRepo::new(pool.clone())),
            assistant,
            messenger,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
