use validator::Validate;

#[derive(Deserialize, Debug, Validate)]
pub struct Config {
    /// required by the api server and the seed loader, not by the frontend
    database_url: Option<String>,
    #[validate(range(min = 1, max = 100))]
    database_max_connections: Option<u32>,
    api_host: Option<String>,
    api_port: Option<u16>,
    frontend_host: Option<String>,
    frontend_port: Option<u16>,
    /// where the frontend proxy forwards `/api/*` calls to
    #[validate(url)]
    api_url: Option<String>,
}

lazy_static! {
    static ref CONFIG: Config = match envy::from_env::<Config>() {
        Ok(config) => {
            match config.validate() {
                Ok(()) => config,
                Err(e) => panic!("invalid environment variable: {}", e),
            }
        }
        Err(error) => panic!("Missing or incorrect environment variable: {}", error),
    };
}

impl Config {
    /// load and validate the config eagerly, so a bad environment fails at startup
    pub fn init() {
        lazy_static::initialize(&CONFIG);
    }

    pub fn database_url() -> Option<&'static str> {
        CONFIG.database_url.as_deref()
    }

    pub fn database_max_connections() -> u32 {
        CONFIG.database_max_connections.unwrap_or(5)
    }

    pub fn api_host() -> &'static str {
        CONFIG.api_host.as_deref().unwrap_or("localhost")
    }

    pub fn api_port() -> u16 {
        CONFIG.api_port.unwrap_or(8080)
    }

    pub fn frontend_host() -> &'static str {
        CONFIG.frontend_host.as_deref().unwrap_or("localhost")
    }

    pub fn frontend_port() -> u16 {
        CONFIG.frontend_port.unwrap_or(3000)
    }

    pub fn api_url() -> &'static str {
        CONFIG
            .api_url
            .as_deref()
            .unwrap_or("http://localhost:8080/api")
    }
}
