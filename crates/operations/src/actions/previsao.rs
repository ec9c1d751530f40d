//! Arrival forecast operations (`previsao.parada`, `previsao.linha`,
//! `previsao.linhaParada`)

use serde_json::Value;

use olhovivo_client::{OlhoVivoApi, Record, mappers};

use crate::error::OperationError;
use crate::params;

/// Marker value for a parameter that could not be resolved
const NAO_FORNECIDO: &str = "Não fornecido";

fn empty_response_record(echo: &[(&str, &str)]) -> Record {
    let mut record = Record::new();
    record.insert("erro".into(), Value::from("Resposta vazia da API"));
    for (key, value) in echo {
        record.insert((*key).to_string(), Value::from(*value));
    }
    record
}

fn raw_response_record(body: Value, echo: &[(&str, &str)]) -> Record {
    let mut record = Record::new();
    record.insert("resposta_api".into(), body);
    for (key, value) in echo {
        record.insert(format!("{key}_usado"), Value::from(*value));
    }
    record
}

/// Arrival forecast for every line serving a stop (`GET /Previsao/Parada`).
pub async fn parada(api: &dyn OlhoVivoApi, item: &Record) -> Result<Vec<Record>, OperationError> {
    let codigo_parada = params::required(item, "codigoParada")?;

    let body = match api
        .get(
            "/Previsao/Parada",
            vec![("codigoParada".to_string(), codigo_parada.clone())],
        )
        .await
    {
        Ok(body) => body,
        Err(failure) => return Ok(vec![failure.into_record()]),
    };

    let echo = [("codigo_parada", codigo_parada.as_str())];
    if body.is_null() {
        return Ok(vec![empty_response_record(&echo)]);
    }

    match body.get("p") {
        Some(p) if !p.is_null() => Ok(mappers::flatten_previsao_parada(&body, true)),
        _ => Ok(vec![raw_response_record(body, &echo)]),
    }
}

/// Arrival forecast for a line at every stop it serves
/// (`GET /Previsao/Linha`).
pub async fn linha(api: &dyn OlhoVivoApi, item: &Record) -> Result<Vec<Record>, OperationError> {
    let codigo_linha = params::required(item, "codigoLinha")?;

    let body = match api
        .get(
            "/Previsao/Linha",
            vec![("codigoLinha".to_string(), codigo_linha.clone())],
        )
        .await
    {
        Ok(body) => body,
        Err(failure) => return Ok(vec![failure.into_record()]),
    };

    let echo = [("codigo_linha", codigo_linha.as_str())];
    if body.is_null() {
        return Ok(vec![empty_response_record(&echo)]);
    }

    match body.get("ps") {
        Some(Value::Array(paradas)) => Ok(mappers::flatten_previsao_linha(
            paradas,
            body.get("hr").unwrap_or(&Value::Null),
        )),
        _ => Ok(vec![raw_response_record(body, &echo)]),
    }
}

/// Arrival forecast for one line at one stop (`GET /Previsao`).
///
/// Tolerates the alternate parameter spellings directly: when the
/// canonical field is absent, the corrupted variant is consulted before
/// the parameter is declared missing. With neither present for either
/// parameter, a single diagnostic record names what was not supplied
/// instead of failing the batch item.
pub async fn linha_parada(
    api: &dyn OlhoVivoApi,
    item: &Record,
) -> Result<Vec<Record>, OperationError> {
    let codigo_parada = params::resolve_with_fallback(item, "codigoParada");
    let codigo_linha = params::resolve_with_fallback(item, "codigoLinha");

    let (Some(codigo_parada), Some(codigo_linha)) = (&codigo_parada, &codigo_linha) else {
        let mut record = Record::new();
        record.insert(
            "erro".into(),
            Value::from("Parâmetros obrigatórios ausentes"),
        );
        record.insert(
            "codigo_parada".into(),
            Value::from(codigo_parada.as_deref().unwrap_or(NAO_FORNECIDO)),
        );
        record.insert(
            "codigo_linha".into(),
            Value::from(codigo_linha.as_deref().unwrap_or(NAO_FORNECIDO)),
        );
        return Ok(vec![record]);
    };

    let body = match api
        .get(
            "/Previsao",
            vec![
                ("codigoParada".to_string(), codigo_parada.clone()),
                ("codigoLinha".to_string(), codigo_linha.clone()),
            ],
        )
        .await
    {
        Ok(body) => body,
        Err(failure) => return Ok(vec![failure.into_record()]),
    };

    let echo = [
        ("codigo_parada", codigo_parada.as_str()),
        ("codigo_linha", codigo_linha.as_str()),
    ];
    if body.is_null() {
        return Ok(vec![empty_response_record(&echo)]);
    }

    match body.get("p") {
        Some(p) if !p.is_null() => Ok(mappers::flatten_previsao_parada(&body, false)),
        _ => Ok(vec![raw_response_record(body, &echo)]),
    }
}
