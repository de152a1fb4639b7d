use std::env;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3002;
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Qual provedor de LLM atende as gerações
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    OpenAi,
    Fake,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    /// `None` quando OPENAI_API_KEY não está definido; a falha acontece na chamada
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    Supabase { url: String, api_key: String },
    MongoDb { uri: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub llm: LlmConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Lê a configuração do ambiente do processo (após `dotenv`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Variáveis vazias contam como ausentes
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let provider = match get("LLM_PROVIDER").as_deref() {
            None | Some("openai") => LlmProviderKind::OpenAi,
            Some("fake") => LlmProviderKind::Fake,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "LLM_PROVIDER",
                    value: other.to_string(),
                })
            }
        };

        let temperature = match get("OPENAI_TEMPERATURE") {
            Some(raw) => match raw.parse::<f32>() {
                // Amostragem precisa ser não-determinística
                Ok(t) if t > 0.0 && t <= 2.0 => t,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "OPENAI_TEMPERATURE",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_TEMPERATURE,
        };

        let llm = LlmConfig {
            provider,
            api_key: get("OPENAI_API_KEY"),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            base_url: get("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            temperature,
        };

        let store = match get("RECIPE_STORE").as_deref() {
            None | Some("supabase") => StoreConfig::Supabase {
                url: get("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?,
                api_key: get("SUPABASE_ANON_KEY")
                    .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?,
            },
            Some("mongodb") => StoreConfig::MongoDb {
                uri: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            Some("memory") => StoreConfig::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "RECIPE_STORE",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self { host, port, llm, store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_supabase_store() {
        let config = config_from(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ])
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3002);
        assert_eq!(config.llm.provider, LlmProviderKind::OpenAi);
        assert_eq!(config.llm.api_key, None);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert!((config.llm.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(
            config.store,
            StoreConfig::Supabase {
                url: "https://abc.supabase.co".into(),
                api_key: "anon".into()
            }
        );
    }

    #[test]
    fn test_missing_supabase_url_is_an_error() {
        let err = config_from(&[("SUPABASE_ANON_KEY", "anon")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SUPABASE_URL"));
    }

    #[test]
    fn test_blank_api_key_counts_as_absent() {
        let config = config_from(&[("RECIPE_STORE", "memory"), ("OPENAI_API_KEY", "  ")]).unwrap();
        assert_eq!(config.llm.api_key, None);
        assert_eq!(config.store, StoreConfig::Memory);
    }

    #[test]
    fn test_mongodb_store_and_overrides() {
        let config = config_from(&[
            ("RECIPE_STORE", "mongodb"),
            ("DATABASE_URL", "mongodb://localhost:27017/pantry"),
            ("PORT", "9000"),
            ("LLM_PROVIDER", "fake"),
            ("OPENAI_BASE_URL", "http://localhost:1234/v1/"),
            ("OPENAI_TEMPERATURE", "0.2"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.llm.provider, LlmProviderKind::Fake);
        assert_eq!(config.llm.base_url, "http://localhost:1234/v1");
        assert!((config.llm.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(
            config.store,
            StoreConfig::MongoDb {
                uri: "mongodb://localhost:27017/pantry".into()
            }
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[("RECIPE_STORE", "memory"), ("PORT", "abc")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert!(matches!(
            config_from(&[("RECIPE_STORE", "redis")]),
            Err(ConfigError::Invalid { key: "RECIPE_STORE", .. })
        ));
        assert!(matches!(
            config_from(&[("RECIPE_STORE", "memory"), ("OPENAI_TEMPERATURE", "5")]),
            Err(ConfigError::Invalid { key: "OPENAI_TEMPERATURE", .. })
        ));
        for zero in ["0", "0.0", "-0.5"] {
            assert!(matches!(
                config_from(&[("RECIPE_STORE", "memory"), ("OPENAI_TEMPERATURE", zero)]),
                Err(ConfigError::Invalid { key: "OPENAI_TEMPERATURE", .. })
            ));
        }
    }
}
