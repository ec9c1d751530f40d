//! Operation handlers, one module per resource
//!
//! Each handler reads its declared parameters from the (already
//! normalized) input record, builds one endpoint, delegates to the
//! transport, and maps the response into flat output records. Transport
//! failures and shape mismatches come back as diagnostic records, not
//! errors; only unresolvable input parameters fail the item.

pub mod linha;
pub mod parada;
pub mod previsao;

use serde_json::Value;

use olhovivo_client::Record;

/// Guard for endpoints whose body must be a JSON array.
///
/// A null body means the API answered with nothing; any other non-array
/// body is returned raw for inspection. Both cases yield exactly one
/// diagnostic record echoing the query parameter that was used.
pub(crate) fn expect_array<'a>(
    body: &'a Value,
    param_key: &str,
    param_value: &str,
) -> Result<&'a [Value], Vec<Record>> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Null => {
            let mut record = Record::new();
            record.insert("erro".into(), Value::from("Resposta vazia da API"));
            record.insert(param_key.into(), Value::from(param_value));
            Err(vec![record])
        }
        other => {
            let mut record = Record::new();
            record.insert("resposta_api".into(), other.clone());
            record.insert(format!("{param_key}_usado"), Value::from(param_value));
            Err(vec![record])
        }
    }
}
