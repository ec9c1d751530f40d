//! Bus stop operations (`parada.buscar`, `parada.buscarPorLinha`,
//! `parada.buscarPorCorredor`)

use olhovivo_client::{OlhoVivoApi, Record, mappers};

use crate::actions::expect_array;
use crate::error::OperationError;
use crate::params;

/// Search stops by name or address (`GET /Parada/Buscar`).
pub async fn buscar(api: &dyn OlhoVivoApi, item: &Record) -> Result<Vec<Record>, OperationError> {
    let termos_busca = params::required(item, "termosBusca")?;

    let body = match api
        .get(
            "/Parada/Buscar",
            vec![("termosBusca".to_string(), termos_busca.clone())],
        )
        .await
    {
        Ok(body) => body,
        Err(failure) => return Ok(vec![failure.into_record()]),
    };

    let paradas = match expect_array(&body, "termos_busca", &termos_busca) {
        Ok(paradas) => paradas,
        Err(records) => return Ok(records),
    };

    Ok(paradas.iter().map(mappers::map_parada).collect())
}

/// List the stops served by a line (`GET /Parada/BuscarParadasPorLinha`).
pub async fn buscar_por_linha(
    api: &dyn OlhoVivoApi,
    item: &Record,
) -> Result<Vec<Record>, OperationError> {
    let codigo_linha = params::required(item, "codigoLinha")?;

    let body = match api
        .get(
            "/Parada/BuscarParadasPorLinha",
            vec![("codigoLinha".to_string(), codigo_linha.clone())],
        )
        .await
    {
        Ok(body) => body,
        Err(failure) => return Ok(vec![failure.into_record()]),
    };

    let paradas = match expect_array(&body, "codigo_linha", &codigo_linha) {
        Ok(paradas) => paradas,
        Err(records) => return Ok(records),
    };

    Ok(paradas.iter().map(mappers::map_parada).collect())
}

/// List the stops of a corridor (`GET /Parada/BuscarParadasPorCorredor`).
pub async fn buscar_por_corredor(
    api: &dyn OlhoVivoApi,
    item: &Record,
) -> Result<Vec<Record>, OperationError> {
    let codigo_corredor = params::required(item, "codigoCorredor")?;

    let body = match api
        .get(
            "/Parada/BuscarParadasPorCorredor",
            vec![("codigoCorredor".to_string(), codigo_corredor.clone())],
        )
        .await
    {
        Ok(body) => body,
        Err(failure) => return Ok(vec![failure.into_record()]),
    };

    let paradas = match expect_array(&body, "codigo_corredor", &codigo_corredor) {
        Ok(paradas) => paradas,
        Err(records) => return Ok(records),
    };

    Ok(paradas.iter().map(mappers::map_parada).collect())
}
