use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_run_migrations: bool,
    pub model_path: String,
    pub model_features: Vec<String>,
    pub cors_allowed_origins: Vec<String>,
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
        let bind_addr = format!("{}:{}", host, port);

        let db_host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let db_port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let db_name = env::var("DB_DATABASE").unwrap_or_else(|_| "ttccr".to_string());
        let db_user = env::var("DB_USER").unwrap_or_else(|_| "ttccr".to_string());
        let db_pwd = env::var("DB_PWD").unwrap_or_else(|_| "ttccr".to_string());

        let database_url = format!(
            "postgres://{}:{}@{}:{}/{}",
            db_user, db_pwd, db_host, db_port, db_name
        );

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);
        let db_run_migrations = env::var("DB_RUN_MIGRATIONS")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let model_path = env::var("MODEL_PATH")
            .unwrap_or_else(|_| "model/modelo_tempo_atraso.json".to_string());
        let model_features = split_list(&env::var("MODEL_FEATURES").unwrap_or_default());

        let cors_allowed_origins =
            split_list(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            bind_addr,
            database_url,
            db_max_connections,
            db_run_migrations,
            model_path,
            model_features,
            cors_allowed_origins,
            log_level,
        })
    }
}

/// Comma separated list, blanks dropped.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_drops_blanks() {
        assert_eq!(
            split_list(" hora_pico, chuva ,,lotacao "),
            vec!["hora_pico", "chuva", "lotacao"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("nope"));
    }
}
