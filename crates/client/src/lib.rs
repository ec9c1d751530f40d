//! Client for the SPTrans Olho Vivo API
//!
//! Authenticated access to São Paulo's public bus-tracking API
//! (<https://api.olhovivo.sptrans.com.br/v2.1>), plus the pure mappers
//! that reshape its abbreviated JSON fields into flat, descriptively
//! named output records.
//!
//! # Architecture
//!
//! [`OlhoVivoApi`] defines the transport interface, implemented by
//! [`OlhoVivoClient`]: each call authenticates with the access token,
//! captures the single-use session cookie, and issues one `GET` with it.
//! Expected failures (rejected token, missing cookie, downstream errors)
//! are modeled as [`ApiFailure`] values that convert into diagnostic
//! records rather than aborting the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use olhovivo_client::{OlhoVivoClient, OlhoVivoConfig, OlhoVivoApi};
//!
//! let config = OlhoVivoConfig {
//!     token: std::env::var("SPTRANS_TOKEN")?,
//!     ..OlhoVivoConfig::default()
//! };
//! let client = OlhoVivoClient::new(&config)?;
//!
//! let body = client
//!     .get("/Linha/Buscar", vec![("termosBusca".into(), "8000".into())])
//!     .await?;
//! ```

mod config;
mod error;
pub mod mappers;
mod record;
mod transport;

pub use config::OlhoVivoConfig;
pub use error::{ApiFailure, redact_token};
pub use record::{Record, field};
pub use transport::{OlhoVivoApi, OlhoVivoClient};
