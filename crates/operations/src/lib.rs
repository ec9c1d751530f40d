//! Operation handlers and batch dispatcher for the Olho Vivo adapter
//!
//! The host runtime hands over an ordered batch of keyed input records
//! plus a constant (resource, action) pair; this crate normalizes
//! parameter spellings, routes every record to the matching operation
//! handler, and aggregates the flat output records. Failures are isolated
//! per item: with continue-on-failure enabled a diagnostic record takes
//! the failing item's place, otherwise the batch aborts there.
//!
//! # Example
//!
//! ```rust,ignore
//! use olhovivo_client::{OlhoVivoClient, OlhoVivoConfig};
//! use olhovivo_operations::run_batch;
//!
//! let client = OlhoVivoClient::new(&OlhoVivoConfig::default())?;
//! let records = run_batch(&client, "previsao", "parada", &items, true).await?;
//! ```

pub mod actions;
mod dispatch;
mod error;
pub mod params;

pub use dispatch::{Operation, run_batch};
pub use error::{DispatchError, OperationError};
