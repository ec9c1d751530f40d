//! Olho Vivo API failure types
//!
//! Expected upstream failures never propagate as hard errors: every
//! variant converts into a diagnostic record via [`ApiFailure::into_record`],
//! so callers can substitute it for a normal result and keep processing.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::record::Record;

/// Failures the Olho Vivo API can produce during an authenticated call
#[derive(Debug, Clone, Error)]
pub enum ApiFailure {
    /// The login endpoint rejected the token or could not be reached
    #[error("Falha na autenticação: {message}")]
    Auth {
        /// Human-readable description of the failure
        message: String,
        /// Redacted token fragment (first and last 3 characters only)
        token_hint: String,
    },

    /// Authentication succeeded but no session cookie was returned
    #[error("Não foi possível obter cookies de autenticação da API.")]
    Session {
        /// Redacted token fragment (first and last 3 characters only)
        token_hint: String,
    },

    /// The data-fetch request itself failed
    #[error("Erro na requisição de dados: {message}")]
    Request {
        /// Human-readable description of the failure
        message: String,
        /// Endpoint path that was requested
        endpoint: String,
        /// Query parameters that were attached to the request
        parameters: Vec<(String, String)>,
    },

    /// The client could not be constructed from the given configuration
    #[error("Configuração inválida: {0}")]
    Configuration(String),
}

impl ApiFailure {
    /// Convert this failure into a diagnostic record.
    ///
    /// The record substitutes for a normal result, carrying error context
    /// instead of domain data.
    #[must_use]
    pub fn into_record(self) -> Record {
        let mut record = Record::new();
        match self {
            Self::Auth {
                message,
                token_hint,
            } => {
                record.insert("erro".into(), Value::from("Erro na autenticação"));
                record.insert("mensagem".into(), Value::from(message));
                record.insert("token".into(), Value::from(token_hint));
            }
            Self::Session { token_hint } => {
                record.insert("erro".into(), Value::from("Erro na autenticação"));
                record.insert(
                    "mensagem".into(),
                    Value::from("Não foi possível obter cookies de autenticação da API."),
                );
                record.insert("token".into(), Value::from(token_hint));
            }
            Self::Request {
                message,
                endpoint,
                parameters,
            } => {
                let query: Map<String, Value> = parameters
                    .into_iter()
                    .map(|(name, value)| (name, Value::from(value)))
                    .collect();
                record.insert("erro".into(), Value::from("Erro na requisição de dados"));
                record.insert("mensagem".into(), Value::from(message));
                record.insert("endpoint".into(), Value::from(endpoint));
                record.insert("parametros".into(), Value::Object(query));
            }
            Self::Configuration(message) => {
                record.insert("erro".into(), Value::from("Configuração inválida"));
                record.insert("mensagem".into(), Value::from(message));
            }
        }
        record
    }
}

/// Redact an access token down to its first and last 3 characters.
///
/// Tokens too short to redact meaningfully are fully masked.
#[must_use]
pub fn redact_token(token: &str) -> String {
    if token.chars().count() <= 6 {
        return "***".to_string();
    }
    let head: String = token.chars().take(3).collect();
    let tail: String = token
        .chars()
        .rev()
        .take(3)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_token() {
        assert_eq!(redact_token("abcdef123456"), "abc...456");
    }

    #[test]
    fn test_redact_short_token() {
        assert_eq!(redact_token("abc"), "***");
        assert_eq!(redact_token("abcdef"), "***");
        assert_eq!(redact_token(""), "***");
    }

    #[test]
    fn test_auth_failure_record() {
        let failure = ApiFailure::Auth {
            message: "Falha na autenticação. Verifique o token fornecido.".to_string(),
            token_hint: "abc...456".to_string(),
        };
        let record = failure.into_record();
        assert_eq!(record["erro"], "Erro na autenticação");
        assert_eq!(record["token"], "abc...456");
        assert!(
            record["mensagem"]
                .as_str()
                .unwrap()
                .contains("Verifique o token")
        );
    }

    #[test]
    fn test_session_failure_record() {
        let failure = ApiFailure::Session {
            token_hint: "abc...456".to_string(),
        };
        let record = failure.into_record();
        assert_eq!(record["erro"], "Erro na autenticação");
        assert!(record["mensagem"].as_str().unwrap().contains("cookies"));
    }

    #[test]
    fn test_request_failure_record() {
        let failure = ApiFailure::Request {
            message: "HTTP 500 Internal Server Error".to_string(),
            endpoint: "/Linha/Buscar".to_string(),
            parameters: vec![("termosBusca".to_string(), "8000".to_string())],
        };
        let record = failure.into_record();
        assert_eq!(record["erro"], "Erro na requisição de dados");
        assert_eq!(record["endpoint"], "/Linha/Buscar");
        assert_eq!(record["parametros"]["termosBusca"], "8000");
    }

    #[test]
    fn test_failure_display() {
        let failure = ApiFailure::Request {
            message: "HTTP 404".to_string(),
            endpoint: "/Parada/Buscar".to_string(),
            parameters: vec![],
        };
        assert!(failure.to_string().contains("HTTP 404"));

        let failure = ApiFailure::Session {
            token_hint: "***".to_string(),
        };
        assert!(failure.to_string().contains("cookies"));
    }
}
