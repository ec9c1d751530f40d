//! Response mappers
//!
//! Pure translations from the API's abbreviated-key shapes into flat
//! records with descriptive field names. No I/O happens here; shape
//! mismatches become diagnostic records instead of errors, so a partially
//! malformed response still yields inspectable output.

use serde_json::Value;

use crate::record::{Record, field};

/// Map one bus line (`/Linha/Buscar`, `/Linha/BuscarLinhaSentido` element).
///
/// Total over any JSON object: all seven descriptive keys are always
/// present, with missing inputs mapped to null.
#[must_use]
pub fn map_linha(linha: &Value) -> Record {
    let mut record = Record::new();
    record.insert("codigo_linha".into(), field(linha, "cl"));
    record.insert("circular".into(), field(linha, "lc"));
    record.insert("letreiro".into(), field(linha, "lt"));
    record.insert("tipo_linha".into(), field(linha, "tl"));
    record.insert("sentido".into(), field(linha, "sl"));
    record.insert("terminal_principal".into(), field(linha, "tp"));
    record.insert("terminal_secundario".into(), field(linha, "ts"));
    record
}

/// Map one bus stop (`/Parada/Buscar*` element).
#[must_use]
pub fn map_parada(parada: &Value) -> Record {
    let mut record = Record::new();
    record.insert("codigo_parada".into(), field(parada, "cp"));
    record.insert("nome_parada".into(), field(parada, "np"));
    record.insert("endereco".into(), field(parada, "ed"));
    record.insert("latitude".into(), field(parada, "py"));
    record.insert("longitude".into(), field(parada, "px"));
    record
}

/// Flatten a stop-centric forecast (`/Previsao/Parada` and `/Previsao`).
///
/// The caller has already verified that `response.p` is present. Emits one
/// record per forecast vehicle; line branches without vehicles collapse to
/// a single `sem_previsao` marker, and unrecognized nested shapes become
/// diagnostic records carrying the raw branch payload.
///
/// `include_endereco` matches the upstream difference between the two
/// endpoints: only `/Previsao/Parada` returns the stop address.
#[must_use]
pub fn flatten_previsao_parada(response: &Value, include_endereco: bool) -> Vec<Record> {
    let parada = &response["p"];

    let mut stop_info = Record::new();
    stop_info.insert("codigo_parada".into(), field(parada, "cp"));
    stop_info.insert("nome_parada".into(), field(parada, "np"));
    if include_endereco {
        stop_info.insert("endereco".into(), field(parada, "ed"));
    }
    stop_info.insert("latitude".into(), field(parada, "py"));
    stop_info.insert("longitude".into(), field(parada, "px"));
    stop_info.insert("hora_atualizacao".into(), field(response, "hr"));

    let mut records = Vec::new();
    match parada.get("l") {
        Some(Value::Array(linhas)) => {
            for linha in linhas {
                let mut line_info = stop_info.clone();
                line_info.insert("codigo_linha".into(), field(linha, "cl"));
                line_info.insert("letreiro_codigo".into(), field(linha, "c"));
                line_info.insert("sentido".into(), field(linha, "sl"));
                line_info.insert("letreiro_origem".into(), field(linha, "lt0"));
                line_info.insert("letreiro_destino".into(), field(linha, "lt1"));
                line_info.insert("qtd_veiculos".into(), field(linha, "qv"));
                push_vehicle_records(linha, &line_info, &mut records);
            }
        }
        Some(Value::Null) | None => {
            let mut record = stop_info;
            record.insert("sem_linhas".into(), Value::Bool(true));
            records.push(record);
        }
        Some(other) => {
            let mut record = stop_info;
            record.insert("dados_linha".into(), other.clone());
            record.insert(
                "observacao".into(),
                Value::from("Estrutura de linha não reconhecida"),
            );
            records.push(record);
        }
    }
    records
}

/// Flatten a line-centric forecast (`/Previsao/Linha`).
///
/// The caller has already verified that `response.ps` is an array; one
/// entry per stop served by the line, each with its own vehicle list.
#[must_use]
pub fn flatten_previsao_linha(paradas: &[Value], hora_atualizacao: &Value) -> Vec<Record> {
    let mut records = Vec::new();
    for parada in paradas {
        let mut stop_info = Record::new();
        stop_info.insert("codigo_parada".into(), field(parada, "cp"));
        stop_info.insert("nome_parada".into(), field(parada, "np"));
        stop_info.insert("latitude".into(), field(parada, "py"));
        stop_info.insert("longitude".into(), field(parada, "px"));
        stop_info.insert("hora_atualizacao".into(), hora_atualizacao.clone());
        push_vehicle_records(parada, &stop_info, &mut records);
    }
    records
}

/// Emit the vehicle records for one forecast branch (a line at a stop, or
/// a stop along a line).
///
/// An empty `vs` array means the branch is tracked but has nothing due
/// (one `sem_previsao` marker); a missing or non-array `vs` is a shape
/// mismatch (one diagnostic record wrapping the raw branch).
fn push_vehicle_records(branch: &Value, shared: &Record, records: &mut Vec<Record>) {
    match branch.get("vs") {
        Some(Value::Array(veiculos)) if !veiculos.is_empty() => {
            for veiculo in veiculos {
                let mut record = shared.clone();
                record.insert("prefixo_veiculo".into(), field(veiculo, "p"));
                record.insert(
                    "acessivel".into(),
                    Value::Bool(veiculo.get("a") == Some(&Value::Bool(true))),
                );
                record.insert("previsao_chegada".into(), field(veiculo, "t"));
                record.insert("latitude_veiculo".into(), field(veiculo, "py"));
                record.insert("longitude_veiculo".into(), field(veiculo, "px"));
                records.push(record);
            }
        }
        Some(Value::Array(_)) => {
            let mut record = shared.clone();
            record.insert("sem_previsao".into(), Value::Bool(true));
            records.push(record);
        }
        _ => {
            let mut record = shared.clone();
            record.insert("dados_previsao".into(), branch.clone());
            record.insert(
                "observacao".into(),
                Value::from("Estrutura de previsão não reconhecida"),
            );
            records.push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const LINHA_KEYS: [&str; 7] = [
        "codigo_linha",
        "circular",
        "letreiro",
        "tipo_linha",
        "sentido",
        "terminal_principal",
        "terminal_secundario",
    ];

    #[test]
    fn test_map_linha_full() {
        let linha = json!({
            "cl": 1273,
            "lc": false,
            "lt": "8000",
            "tl": 10,
            "sl": 1,
            "tp": "PCA.RAMOS DE AZEVEDO",
            "ts": "TERMINAL LAPA"
        });
        let record = map_linha(&linha);
        assert_eq!(record["codigo_linha"], 1273);
        assert_eq!(record["circular"], false);
        assert_eq!(record["letreiro"], "8000");
        assert_eq!(record["tipo_linha"], 10);
        assert_eq!(record["sentido"], 1);
        assert_eq!(record["terminal_principal"], "PCA.RAMOS DE AZEVEDO");
        assert_eq!(record["terminal_secundario"], "TERMINAL LAPA");
    }

    #[test]
    fn test_map_linha_is_total() {
        // Missing input keys become null, never omitted.
        let record = map_linha(&json!({}));
        assert_eq!(record.len(), LINHA_KEYS.len());
        for key in LINHA_KEYS {
            assert_eq!(record[key], Value::Null, "missing key {key}");
        }

        let record = map_linha(&json!({ "cl": 1273 }));
        assert_eq!(record.len(), LINHA_KEYS.len());
        assert_eq!(record["codigo_linha"], 1273);
        assert_eq!(record["letreiro"], Value::Null);
    }

    #[test]
    fn test_map_parada() {
        let parada = json!({
            "cp": 340015329,
            "np": "PAULISTA B/C1",
            "ed": "AV PAULISTA",
            "py": -23.567,
            "px": -46.648
        });
        let record = map_parada(&parada);
        assert_eq!(record["codigo_parada"], 340015329);
        assert_eq!(record["nome_parada"], "PAULISTA B/C1");
        assert_eq!(record["endereco"], "AV PAULISTA");
        assert_eq!(record["latitude"], -23.567);
        assert_eq!(record["longitude"], -46.648);
    }

    #[test]
    fn test_map_parada_missing_address() {
        let record = map_parada(&json!({ "cp": 1, "np": "X" }));
        assert_eq!(record["endereco"], Value::Null);
    }

    fn forecast_response() -> Value {
        json!({
            "hr": "23:09",
            "p": {
                "cp": 4200953,
                "np": "PARADA ROBERTO SELMI DEI B/C",
                "ed": "R ARARAQUARA",
                "py": -23.675901,
                "px": -46.752812,
                "l": [
                    {
                        "c": "675K-10",
                        "cl": 198,
                        "sl": 1,
                        "lt0": "METRO STA CRUZ",
                        "lt1": "TERM. JD. ANGELA",
                        "qv": 2,
                        "vs": [
                            { "p": "74558", "a": true, "t": "23:11", "py": -23.676, "px": -46.754 },
                            { "p": "74559", "a": false, "t": "23:18", "py": -23.680, "px": -46.760 }
                        ]
                    },
                    {
                        "c": "737A-10",
                        "cl": 2085,
                        "sl": 2,
                        "lt0": "TERM. SANTO AMARO",
                        "lt1": "JD. MARACA",
                        "qv": 0,
                        "vs": []
                    }
                ]
            }
        })
    }

    #[test]
    fn test_forecast_two_vehicles_plus_marker() {
        // One line with two vehicles, one line with none: 2 + 1 records.
        let records = flatten_previsao_parada(&forecast_response(), true);
        assert_eq!(records.len(), 3);

        for record in &records {
            assert_eq!(record["nome_parada"], "PARADA ROBERTO SELMI DEI B/C");
            assert_eq!(record["latitude"], -23.675901);
            assert_eq!(record["longitude"], -46.752812);
            assert_eq!(record["hora_atualizacao"], "23:09");
        }

        assert_eq!(records[0]["prefixo_veiculo"], "74558");
        assert_eq!(records[0]["acessivel"], true);
        assert_eq!(records[0]["previsao_chegada"], "23:11");
        assert_eq!(records[1]["prefixo_veiculo"], "74559");
        assert_eq!(records[1]["acessivel"], false);

        assert_eq!(records[2]["sem_previsao"], true);
        assert_eq!(records[2]["codigo_linha"], 2085);
        assert!(!records[2].contains_key("prefixo_veiculo"));
    }

    #[test]
    fn test_forecast_without_address() {
        let records = flatten_previsao_parada(&forecast_response(), false);
        assert!(!records[0].contains_key("endereco"));
    }

    #[test]
    fn test_forecast_missing_vehicle_list_is_diagnostic() {
        // Absent `vs` is a shape mismatch, distinct from an empty list.
        let response = json!({
            "hr": "10:00",
            "p": {
                "cp": 1, "np": "X", "py": 0.0, "px": 0.0,
                "l": [{ "cl": 198, "c": "675K-10", "sl": 1, "qv": 0 }]
            }
        });
        let records = flatten_previsao_parada(&response, false);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0]["observacao"],
            "Estrutura de previsão não reconhecida"
        );
        assert_eq!(records[0]["dados_previsao"]["cl"], 198);
        assert!(!records[0].contains_key("sem_previsao"));
    }

    #[test]
    fn test_forecast_lines_not_an_array() {
        let response = json!({
            "hr": "10:00",
            "p": { "cp": 1, "np": "X", "py": 0.0, "px": 0.0, "l": { "cl": 198 } }
        });
        let records = flatten_previsao_parada(&response, false);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0]["observacao"],
            "Estrutura de linha não reconhecida"
        );
        assert_eq!(records[0]["dados_linha"]["cl"], 198);
    }

    #[test]
    fn test_forecast_no_lines() {
        let response = json!({
            "hr": "10:00",
            "p": { "cp": 1, "np": "X", "py": 0.0, "px": 0.0 }
        });
        let records = flatten_previsao_parada(&response, false);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["sem_linhas"], true);
    }

    #[test]
    fn test_forecast_empty_line_array() {
        let response = json!({
            "hr": "10:00",
            "p": { "cp": 1, "np": "X", "py": 0.0, "px": 0.0, "l": [] }
        });
        assert!(flatten_previsao_parada(&response, false).is_empty());
    }

    #[test]
    fn test_flatten_previsao_linha() {
        let response = json!({
            "hr": "23:09",
            "ps": [
                {
                    "cp": 700016623,
                    "np": "ANGELA B/C",
                    "py": -23.67,
                    "px": -46.75,
                    "vs": [{ "p": "74558", "a": true, "t": "23:11", "py": -23.676, "px": -46.754 }]
                },
                {
                    "cp": 700016624,
                    "np": "ANGELA C/B",
                    "py": -23.68,
                    "px": -46.76,
                    "vs": []
                }
            ]
        });
        let paradas = response["ps"].as_array().unwrap();
        let records = flatten_previsao_linha(paradas, &response["hr"]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["codigo_parada"], 700016623);
        assert_eq!(records[0]["prefixo_veiculo"], "74558");
        assert_eq!(records[0]["hora_atualizacao"], "23:09");
        assert_eq!(records[1]["codigo_parada"], 700016624);
        assert_eq!(records[1]["sem_previsao"], true);
    }

    #[test]
    fn test_accessibility_requires_strict_true() {
        let response = json!({
            "hr": "10:00",
            "p": {
                "cp": 1, "np": "X", "py": 0.0, "px": 0.0,
                "l": [{
                    "cl": 198,
                    "vs": [{ "p": "1", "a": 1, "t": "10:05", "py": 0.0, "px": 0.0 }]
                }]
            }
        });
        let records = flatten_previsao_parada(&response, false);
        assert_eq!(records[0]["acessivel"], false);
    }
}
