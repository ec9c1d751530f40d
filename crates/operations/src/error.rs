//! Operation and dispatch error types

use thiserror::Error;

/// Errors an operation handler can raise to the dispatcher.
///
/// Expected upstream failures never reach this enum; they become
/// diagnostic records inside the handler. Only problems with the input
/// item itself propagate, so the batch's continue-on-failure switch can
/// decide what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// A required input parameter was not resolved, even after the
    /// alternate-spelling fallback
    #[error("parâmetro obrigatório ausente: {name}")]
    MissingParameter {
        /// Canonical name of the missing parameter
        name: String,
    },
}

/// Errors that abort a whole batch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The (resource, action) pair does not name a known operation
    #[error("operação desconhecida: {resource}.{action}")]
    UnknownOperation {
        /// Resource name as supplied by the host
        resource: String,
        /// Action name as supplied by the host
        action: String,
    },

    /// An item failed and continue-on-failure was disabled
    #[error("item {index} falhou: {source}")]
    ItemFailed {
        /// Index of the failing input item
        index: usize,
        /// The handler error that aborted the batch
        #[source]
        source: OperationError,
    },
}
