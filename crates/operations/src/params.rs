//! Input-parameter resolution
//!
//! Parameters arrive as keyed fields on the input record. Some hosts
//! corrupt the canonical camelCase field names into underscore variants
//! (`Código da Parada` → `C_digo_da_Parada`), so a normalization pass maps
//! the known alternate spellings back onto their canonical names before
//! dispatch. The canonical name always wins when both are present.

use serde_json::Value;
use tracing::debug;

use olhovivo_client::Record;

use crate::error::OperationError;

/// Known alternate spellings and their canonical parameter names
const ALIASES: [(&str, &str); 4] = [
    ("Termos_Busca", "termosBusca"),
    ("C_digo_da_Linha", "codigoLinha"),
    ("C_digo_da_Parada", "codigoParada"),
    ("C_digo_do_Corredor", "codigoCorredor"),
];

/// Copy alternate-spelled fields onto their canonical names.
///
/// Applied once per input record, before the operation handler runs.
/// Fields already present under the canonical name are left untouched.
pub fn normalize_aliases(item: &mut Record) {
    for (alias, canonical) in ALIASES {
        if !item.contains_key(canonical)
            && let Some(value) = item.get(alias).cloned()
        {
            debug!(alias, canonical, "mapping alternate parameter spelling");
            item.insert(canonical.to_string(), value);
        }
    }
}

/// The alternate spelling for a canonical parameter name, if one exists.
#[must_use]
pub fn alias_of(canonical: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(_, name)| *name == canonical)
        .map(|(alias, _)| *alias)
}

/// Resolve a parameter value from the input record.
///
/// String values must be non-empty; numeric values are stringified, since
/// line/stop/corridor identifiers travel as numeric strings.
#[must_use]
pub fn resolve(item: &Record, name: &str) -> Option<String> {
    match item.get(name)? {
        Value::String(value) if !value.is_empty() => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

/// Resolve a parameter, falling back to its alternate spelling.
#[must_use]
pub fn resolve_with_fallback(item: &Record, canonical: &str) -> Option<String> {
    resolve(item, canonical).or_else(|| alias_of(canonical).and_then(|alias| resolve(item, alias)))
}

/// Resolve a required parameter or fail the item.
///
/// # Errors
///
/// Returns [`OperationError::MissingParameter`] naming the parameter.
pub fn required(item: &Record, name: &str) -> Result<String, OperationError> {
    resolve(item, name).ok_or_else(|| OperationError::MissingParameter {
        name: name.to_string(),
    })
}
