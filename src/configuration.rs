use serde::Deserialize;

pub const DEFAULT_JWT_SECRET: &str = "This is default secret jwt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Gateway,
    Auth,
    Book,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Service::Gateway => "gateway",
            Service::Auth => "auth-service",
            Service::Book => "book-service",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Service::Gateway => 3001,
            Service::Auth => 3002,
            Service::Book => 3003,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app_host: String,
    pub app_port: u16,
    pub database: Option<DatabaseSettings>,
    pub jwt: JwtSettings,
    pub services: ServiceUrls,
    #[serde(default)]
    pub internal_claims: InternalClaimsSettings,
}

impl Settings {
    /// Database section for the services that own one; `DB_CONN_STRING` is mandatory there.
    pub fn database(&self) -> Result<&DatabaseSettings, config::ConfigError> {
        self.database
            .as_ref()
            .filter(|database| !database.connection_string.trim().is_empty())
            .ok_or_else(|| config::ConfigError::NotFound("DB_CONN_STRING".to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    // postgres://<username>:<password>@<host>:<port>/<database_name>
    #[serde(default)]
    pub connection_string: String,
    pub timezone: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: String,
    /// Bearer-token lifetime. `None` issues tokens without `exp`.
    pub ttl_secs: Option<u64>,
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceUrls {
    pub auth_url: String,
    pub book_url: String,
}

impl ServiceUrls {
    pub fn auth(&self) -> String {
        normalize_url(&self.auth_url)
    }

    pub fn book(&self) -> String {
        normalize_url(&self.book_url)
    }
}

#[derive(Clone, Default, Deserialize)]
pub struct InternalClaimsSettings {
    /// Shared HMAC secret; when present internal claims must be signed.
    pub secret: Option<String>,
}

impl InternalClaimsSettings {
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref().filter(|secret| !secret.is_empty())
    }
}

impl std::fmt::Debug for InternalClaimsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InternalClaimsSettings")
            .field("signed", &self.secret().is_some())
            .finish()
    }
}

/// `URL_AUTH=auth:3002` style values get an `http://` scheme.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

pub fn get_configuration(service: Service) -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        .set_default("app_host", "0.0.0.0")?
        .set_default("app_port", i64::from(service.default_port()))?
        .set_default("jwt.secret", DEFAULT_JWT_SECRET)?
        .set_default("services.auth_url", "localhost:3002")?
        .set_default("services.book_url", "localhost:3003")?
        .add_source(config::File::with_name("configuration").required(false))
        .set_override_option("app_host", env("APP_HOST"))?
        .set_override_option("app_port", env("PORT"))?
        .set_override_option("services.auth_url", env("URL_AUTH"))?
        .set_override_option("services.book_url", env("URL_BOOK"))?
        .set_override_option("database.connection_string", env("DB_CONN_STRING"))?
        .set_override_option("database.timezone", env("DB_TIMEZONE"))?
        .set_override_option("jwt.secret", env("JWT_SECRET"))?
        .set_override_option("jwt.ttl_secs", env("JWT_TTL_SECS"))?
        .set_override_option("internal_claims.secret", env("INTERNAL_CLAIMS_SECRET"))?
        .build()?;

    let settings: Settings = settings.try_deserialize()?;

    if settings.jwt.secret == DEFAULT_JWT_SECRET {
        tracing::warn!("JWT_SECRET is not set, falling back to the default secret");
    }
    if settings.jwt.ttl_secs.is_none() {
        tracing::info!("JWT_TTL_SECS is not set, bearer tokens never expire");
    }

    Ok(settings)
}
