//! HttpRegistryClient — reqwest client for the judicial registry API
//!
//! Models the Rama Judicial unified lookup: a docket query resolving the
//! provider's internal process id and forum ("despacho"), then a fetch of
//! the case's actuations. Provider payloads are validated here, at the
//! boundary; nothing dynamically shaped crosses into the engine.

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use shared::registry::{ProcessSnapshot, SnapshotActuation};

use super::{FetchError, FetchResult, RegistryClient};
use crate::config::EngineConfig;

/// HTTP client for the judicial registry lookup API
pub struct HttpRegistryClient {
    client: Client,
    base_url: String,
}

impl HttpRegistryClient {
    pub fn new(config: &EngineConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(config.fetch_timeout())
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.registry_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET a JSON payload; `None` means the resource does not exist (404)
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> FetchResult<Option<T>> {
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::TOO_MANY_REQUESTS => Err(FetchError::Throttled),
            status if !status.is_success() => Err(FetchError::Status(status.as_u16())),
            _ => {
                let parsed = response.json::<T>().await.map_err(|e| {
                    if e.is_decode() {
                        FetchError::MalformedPayload(e.to_string())
                    } else {
                        FetchError::Transport(e.to_string())
                    }
                })?;
                Ok(Some(parsed))
            }
        }
    }
}

#[async_trait::async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn fetch_by_docket(&self, docket: &str) -> FetchResult<ProcessSnapshot> {
        let numero = normalize_docket(docket);
        let url = format!(
            "{}/Procesos/Consulta/NumeroRadicacion?numero={}&SoloActivos=false&pagina=1",
            self.base_url, numero
        );

        // Unknown docket: valid absence, not a failure
        let Some(query) = self.get_json::<DocketQueryResponse>(&url).await? else {
            return Ok(ProcessSnapshot::empty());
        };
        let Some(proceso) = query.procesos.into_iter().next() else {
            return Ok(ProcessSnapshot::empty());
        };

        let url = format!(
            "{}/Proceso/Actuaciones/{}?pagina=1",
            self.base_url, proceso.id_proceso
        );
        let actuaciones = match self.get_json::<ActuationsResponse>(&url).await? {
            Some(page) => page.actuaciones,
            None => Vec::new(),
        };

        snapshot_from_wire(proceso, actuaciones)
    }
}

/// Docket as the provider expects it: digits only, separators stripped
fn normalize_docket(docket: &str) -> String {
    docket.chars().filter(char::is_ascii_digit).collect()
}

// ========== Provider wire format ==========

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocketQueryResponse {
    #[serde(default)]
    procesos: Vec<WireProcess>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireProcess {
    id_proceso: i64,
    #[serde(default)]
    despacho: Option<String>,
    #[serde(default)]
    fecha_ultima_actuacion: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActuationsResponse {
    #[serde(default)]
    actuaciones: Vec<WireActuation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireActuation {
    fecha_actuacion: String,
    actuacion: String,
    #[serde(default)]
    anotacion: Option<String>,
    #[serde(default)]
    fecha_inicial: Option<String>,
    #[serde(default)]
    fecha_final: Option<String>,
}

/// Normalize the raw provider rows into a validated snapshot
fn snapshot_from_wire(
    proceso: WireProcess,
    actuaciones: Vec<WireActuation>,
) -> FetchResult<ProcessSnapshot> {
    let mut rows = Vec::with_capacity(actuaciones.len());
    for wire in actuaciones {
        rows.push(SnapshotActuation {
            date: parse_provider_date(&wire.fecha_actuacion)?,
            kind: wire.actuacion,
            annotation: wire.anotacion.unwrap_or_default(),
            start_date: parse_optional_date(wire.fecha_inicial.as_deref())?,
            end_date: parse_optional_date(wire.fecha_final.as_deref())?,
        });
    }

    let forum = proceso
        .despacho
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    let most_recent_kind = rows.iter().max_by_key(|a| a.date).map(|a| a.kind.clone());
    let most_recent_date = match proceso.fecha_ultima_actuacion.as_deref() {
        Some(raw) => Some(parse_provider_date(raw)?),
        None => rows.iter().map(|a| a.date).max(),
    };

    Ok(ProcessSnapshot {
        forum,
        actuations: rows,
        most_recent_date,
        most_recent_kind,
    })
}

/// Provider dates arrive as `2020-01-15T00:00:00`; only the day matters
fn parse_provider_date(raw: &str) -> FetchResult<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    day.parse::<NaiveDate>()
        .map_err(|_| FetchError::MalformedPayload(format!("unparseable date: {raw}")))
}

fn parse_optional_date(raw: Option<&str>) -> FetchResult<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_provider_date(s).map(Some),
    }
}
