use std::env;

/// Configuração do processo, montada uma vez no startup.
///
/// Nenhuma variável é obrigatória: os defaults apontam para um MongoDB
/// local e a porta 8000, então o serviço sobe sem .env nenhum.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "mongodb://localhost:27017/trips".to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "./build".to_string()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
