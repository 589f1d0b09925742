use barbershop_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_appointment_repo::SqliteAppointmentRepo,
        sqlite_crm_repo::SqliteCrmRepo,
        sqlite_holiday_repo::SqliteHolidayRepo,
        sqlite_lead_repo::SqliteLeadRepo,
        sqlite_professional_repo::SqliteProfessionalRepo,
        sqlite_schedule_repo::SqliteScheduleRepo,
        sqlite_service_repo::SqliteServiceRepo,
    },
    domain::ports::{AssistantGateway, ChatTurn, MessageGateway},
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

pub struct MockAssistant {
    pub reply: String,
}

#[async_trait]
impl AssistantGateway for MockAssistant {
    async fn complete(&self, _turns: &[ChatTurn]) -> Result<String, AppError> {
        Ok(self.reply.clone())
    }
}

pub struct MockMessenger;

#[async_trait]
impl MessageGateway for MockMessenger {
    async fn send_text(&self, _to: &str, _body: &str) -> Result<(), AppError> {
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::build("UTC", default_assistant_reply()).await
    }

    pub async fn with_timezone(tz: &str) -> Self {
        Self::build(tz, default_assistant_reply()).await
    }

    pub async fn with_assistant_reply(reply: &str) -> Self {
        Self::build("UTC", reply.to_string()).await
    }

    async fn build(timezone: &str, assistant_reply: String) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            shop_timezone: timezone.to_string(),
            ai_gateway_url: "http://localhost".to_string(),
            ai_api_key: "test".to_string(),
            ai_model: "test-model".to_string(),
            whatsapp_api_token: "test".to_string(),
            whatsapp_phone_number_id: "0".to_string(),
        };

        let state = Arc::new(AppState {
            config: config.clone(),
            professional_repo: Arc::new(SqliteProfessionalRepo::new(pool.clone())),
            service_repo: Arc::new(SqliteServiceRepo::new(pool.clone())),
            appointment_repo: Arc::new(SqliteAppointmentRepo::new(pool.clone())),
            schedule_repo: Arc::new(SqliteScheduleRepo::new(pool.clone())),
            holiday_repo: Arc::new(SqliteHolidayRepo::new(pool.clone())),
            lead_repo: Arc::new(SqliteLeadRepo::new(pool.clone())),
            crm_repo: Arc::new(SqliteCrmRepo::new(pool.clone())),
            assistant: Arc::new(MockAssistant { reply: assistant_reply }),
            messenger: Arc::new(MockMessenger),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn post(&self, uri: &str, payload: Value) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap()
    }

    pub async fn put(&self, uri: &str, payload: Value) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    /// Seeds a professional working the given weekday 09:00-18:00.
    pub async fn seed_professional(&self, name: &str, day_of_week: i32) -> String {
        let res = self.post("/api/v1/professionals", json!({ "name": name })).await;
        assert!(res.status().is_success(), "seed_professional failed: {}", res.status());
        let body = parse_body(res).await;
        let id = body["id"].as_str().unwrap().to_string();

        let res = self.put(
            &format!("/api/v1/professionals/{}/schedule", id),
            json!({ "days": [{ "day_of_week": day_of_week, "start_time": "09:00", "end_time": "18:00" }] }),
        ).await;
        assert!(res.status().is_success(), "seed schedule failed: {}", res.status());

        id
    }

    pub async fn seed_service(&self, name: &str, duration_minutes: i32) -> String {
        let res = self.post("/api/v1/services", json!({
            "name": name,
            "duration_minutes": duration_minutes,
            "price_cents": 3500
        })).await;
        assert!(res.status().is_success(), "seed_service failed: {}", res.status());
        parse_body(res).await["id"].as_str().unwrap().to_string()
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn default_assistant_reply() -> String {
    json!({ "response": "Olá! Como posso ajudar?" }).to_string()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
