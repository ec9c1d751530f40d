//! Bus line operations (`linha.buscar`, `linha.buscarSentido`)

use olhovivo_client::{OlhoVivoApi, Record, mappers};

use crate::actions::expect_array;
use crate::error::OperationError;
use crate::params;

/// Search bus lines by number or name (`GET /Linha/Buscar`).
pub async fn buscar(api: &dyn OlhoVivoApi, item: &Record) -> Result<Vec<Record>, OperationError> {
    let termos_busca = params::required(item, "termosBusca")?;

    let body = match api
        .get(
            "/Linha/Buscar",
            vec![("termosBusca".to_string(), termos_busca.clone())],
        )
        .await
    {
        Ok(body) => body,
        Err(failure) => return Ok(vec![failure.into_record()]),
    };

    let linhas = match expect_array(&body, "termos_busca", &termos_busca) {
        Ok(linhas) => linhas,
        Err(records) => return Ok(records),
    };

    Ok(linhas.iter().map(mappers::map_linha).collect())
}

/// Fetch all direction variants of a line by its numeric code
/// (`GET /Linha/BuscarLinhaSentido`).
pub async fn buscar_sentido(
    api: &dyn OlhoVivoApi,
    item: &Record,
) -> Result<Vec<Record>, OperationError> {
    let codigo_linha = params::required(item, "codigoLinha")?;

    let body = match api
        .get(
            "/Linha/BuscarLinhaSentido",
            vec![("codigoLinha".to_string(), codigo_linha.clone())],
        )
        .await
    {
        Ok(body) => body,
        Err(failure) => return Ok(vec![failure.into_record()]),
    };

    let linhas = match expect_array(&body, "codigo_linha", &codigo_linha) {
        Ok(linhas) => linhas,
        Err(records) => return Ok(records),
    };

    Ok(linhas.iter().map(mappers::map_linha).collect())
}
