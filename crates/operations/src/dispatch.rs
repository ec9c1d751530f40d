//! Batch dispatcher
//!
//! Routes each input record to the handler for the batch's (resource,
//! action) pair. Items are processed strictly in input order, one at a
//! time; each item's authenticate-then-fetch round trip completes before
//! the next item begins. Handler output is appended in order, and the
//! continue-on-failure switch decides whether a failing item becomes a
//! diagnostic record or aborts the batch.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use olhovivo_client::{OlhoVivoApi, Record};

use crate::actions::{linha, parada, previsao};
use crate::error::{DispatchError, OperationError};
use crate::params;

/// A (resource, action) pair the adapter knows how to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `linha.buscar`
    LinhaBuscar,
    /// `linha.buscarSentido`
    LinhaBuscarSentido,
    /// `parada.buscar`
    ParadaBuscar,
    /// `parada.buscarPorLinha`
    ParadaBuscarPorLinha,
    /// `parada.buscarPorCorredor`
    ParadaBuscarPorCorredor,
    /// `previsao.parada`
    PrevisaoParada,
    /// `previsao.linha`
    PrevisaoLinha,
    /// `previsao.linhaParada`
    PrevisaoLinhaParada,
}

impl Operation {
    /// Parse a (resource, action) pair as supplied by the host.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownOperation`] for pairs the adapter
    /// does not implement.
    pub fn parse(resource: &str, action: &str) -> Result<Self, DispatchError> {
        match (resource, action) {
            ("linha", "buscar") => Ok(Self::LinhaBuscar),
            ("linha", "buscarSentido") => Ok(Self::LinhaBuscarSentido),
            ("parada", "buscar") => Ok(Self::ParadaBuscar),
            ("parada", "buscarPorLinha") => Ok(Self::ParadaBuscarPorLinha),
            ("parada", "buscarPorCorredor") => Ok(Self::ParadaBuscarPorCorredor),
            ("previsao", "parada") => Ok(Self::PrevisaoParada),
            ("previsao", "linha") => Ok(Self::PrevisaoLinha),
            ("previsao", "linhaParada") => Ok(Self::PrevisaoLinhaParada),
            _ => Err(DispatchError::UnknownOperation {
                resource: resource.to_string(),
                action: action.to_string(),
            }),
        }
    }

    /// The resource half of the pair.
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::LinhaBuscar | Self::LinhaBuscarSentido => "linha",
            Self::ParadaBuscar | Self::ParadaBuscarPorLinha | Self::ParadaBuscarPorCorredor => {
                "parada"
            }
            Self::PrevisaoParada | Self::PrevisaoLinha | Self::PrevisaoLinhaParada => "previsao",
        }
    }

    /// The action half of the pair.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::LinhaBuscar | Self::ParadaBuscar => "buscar",
            Self::LinhaBuscarSentido => "buscarSentido",
            Self::ParadaBuscarPorLinha => "buscarPorLinha",
            Self::ParadaBuscarPorCorredor => "buscarPorCorredor",
            Self::PrevisaoParada => "parada",
            Self::PrevisaoLinha => "linha",
            Self::PrevisaoLinhaParada => "linhaParada",
        }
    }

    async fn execute(
        self,
        api: &dyn OlhoVivoApi,
        item: &Record,
    ) -> Result<Vec<Record>, OperationError> {
        match self {
            Self::LinhaBuscar => linha::buscar(api, item).await,
            Self::LinhaBuscarSentido => linha::buscar_sentido(api, item).await,
            Self::ParadaBuscar => parada::buscar(api, item).await,
            Self::ParadaBuscarPorLinha => parada::buscar_por_linha(api, item).await,
            Self::ParadaBuscarPorCorredor => parada::buscar_por_corredor(api, item).await,
            Self::PrevisaoParada => previsao::parada(api, item).await,
            Self::PrevisaoLinha => previsao::linha(api, item).await,
            Self::PrevisaoLinhaParada => previsao::linha_parada(api, item).await,
        }
    }
}

/// Run a batch of input records through one operation.
///
/// The resource and action are constant for the whole batch. Output
/// records accumulate in input order; a failing item either becomes one
/// diagnostic record (continue-on-failure) or aborts the batch with
/// every later item untouched.
///
/// # Errors
///
/// Returns [`DispatchError::UnknownOperation`] for an unrecognized
/// (resource, action) pair, or [`DispatchError::ItemFailed`] when an item
/// fails and `continue_on_fail` is disabled.
#[instrument(skip(api, items), fields(total = items.len()))]
pub async fn run_batch(
    api: &dyn OlhoVivoApi,
    resource: &str,
    action: &str,
    items: &[Record],
    continue_on_fail: bool,
) -> Result<Vec<Record>, DispatchError> {
    let operation = Operation::parse(resource, action)?;

    let mut output = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let mut normalized = item.clone();
        params::normalize_aliases(&mut normalized);

        match operation.execute(api, &normalized).await {
            Ok(records) => {
                debug!(index, count = records.len(), "item processed");
                output.extend(records);
            }
            Err(error) => {
                if !continue_on_fail {
                    return Err(DispatchError::ItemFailed {
                        index,
                        source: error,
                    });
                }
                warn!(index, %error, "item failed, continuing batch");
                output.push(failure_record(operation, index, item, &error));
            }
        }
    }

    debug!(total = output.len(), "batch finished");
    Ok(output)
}

/// Diagnostic record substituted for a failing item's output.
fn failure_record(
    operation: Operation,
    index: usize,
    item: &Record,
    error: &OperationError,
) -> Record {
    let mut record = Record::new();
    record.insert("erro".into(), Value::from(error.to_string()));
    record.insert("detalhes".into(), Value::from(format!("{error:?}")));
    record.insert("recurso".into(), Value::from(operation.resource()));
    record.insert("operacao".into(), Value::from(operation.action()));
    record.insert("indice_item".into(), Value::from(index));
    record.insert("dados_item".into(), Value::Object(item.clone()));
    record
}
