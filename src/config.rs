use crate::errors::{ServiceError, ServiceResult};

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base route the demo resource is mounted under
    pub base_route: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 1219,
            base_route: "/dummy".to_string(),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT` and `BASE_ROUTE`, falling back to defaults
    pub fn from_env() -> ServiceResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ServiceResult<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| {
                ServiceError::ConfigurationError(format!("PORT '{}' is not a valid port: {}", raw, e))
            })?,
            None => defaults.port,
        };

        let base_route = lookup("BASE_ROUTE").unwrap_or(defaults.base_route);
        if !base_route.is_empty() && !base_route.starts_with('/') {
            return Err(ServiceError::ConfigurationError(format!(
                "BASE_ROUTE '{}' must start with '/'",
                base_route
            )));
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            base_route,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
