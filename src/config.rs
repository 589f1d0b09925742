use std::env;
use chrono_tz::Tz;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub shop_timezone: String,
    pub ai_gateway_url: String,
    pub ai_api_key: String,
    pub ai_model: String,
    pub whatsapp_api_token: String,
    pub whatsapp_phone_number_id: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            shop_timezone: env::var("SHOP_TIMEZONE").unwrap_or_else(|_| "America/Sao_Paulo".to_string()),
            ai_gateway_url: env::var("AI_GATEWAY_URL").unwrap_or_else(|_| "https://ai.gateway.lovable.dev/v1/chat/completions".to_string()),
            ai_api_key: env::var("AI_API_KEY").unwrap_or_default(),
            ai_model: env::var("AI_MODEL").unwrap_or_else(|_| "google/gemini-2.5-flash".to_string()),
            whatsapp_api_token: env::var("WHATSAPP_API_TOKEN").unwrap_or_default(),
            whatsapp_phone_number_id: env::var("WHATSAPP_PHONE_NUMBER_ID").unwrap_or_default(),
        }
    }

    /// All naive timestamps entering the system are interpreted in this zone.
    pub fn shop_tz(&self) -> Tz {
        self.shop_timezone.parse().unwrap_or(chrono_tz::America::Sao_Paulo)
    }
}
