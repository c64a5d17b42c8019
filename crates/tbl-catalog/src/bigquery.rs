//! BigQuery v2 REST catalog.
//!
//! Uses three endpoints:
//! - `GET projects/{p}/datasets` (paged)
//! - `GET projects/{p}/datasets/{d}/tables` (paged)
//! - `GET projects/{p}/datasets/{d}/tables/{t}` (404 → not found)

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tbl_config::BigQueryConfig;

use crate::error::CatalogError;
use crate::http::check_response;
use crate::token::resolve_access_token;
use crate::{Catalog, CatalogSession, TableMetadata};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetList {
    #[serde(default)]
    datasets: Vec<DatasetEntry>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetEntry {
    dataset_reference: DatasetReference,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetReference {
    dataset_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableList {
    #[serde(default)]
    tables: Vec<TableEntry>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableEntry {
    table_reference: TableReference,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableReference {
    table_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableResource {
    id: String,
    /// Milliseconds since the epoch, encoded as a string.
    last_modified_time: String,
}

impl TableResource {
    fn into_metadata(self) -> Result<TableMetadata, CatalogError> {
        let millis: i64 = self.last_modified_time.parse().map_err(|_| {
            CatalogError::Parse(format!(
                "invalid lastModifiedTime '{}' for {}",
                self.last_modified_time, self.id
            ))
        })?;
        let last_modified = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            CatalogError::Parse(format!("lastModifiedTime out of range for {}", self.id))
        })?;
        Ok(TableMetadata {
            full_id: self.id,
            last_modified,
        })
    }
}

/// Catalog backed by the BigQuery REST API.
#[derive(Debug, Clone)]
pub struct BigQueryCatalog {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
    page_size: u32,
}

impl BigQueryCatalog {
    /// Build a catalog client from settings, resolving the access token
    /// through [`resolve_access_token`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotConfigured`] if no token source is set,
    /// [`CatalogError::TokenCommand`] if the token command fails, or
    /// [`CatalogError::Http`] if the HTTP client cannot be built.
    pub async fn from_config(config: &BigQueryConfig) -> Result<Self, CatalogError> {
        let access_token = resolve_access_token(config).await?;
        Self::new(config, access_token)
    }

    /// Build a catalog client with an already resolved bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotConfigured`] if `access_token` is empty, or
    /// [`CatalogError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &BigQueryConfig, access_token: String) -> Result<Self, CatalogError> {
        if access_token.is_empty() {
            return Err(CatalogError::NotConfigured(String::from(
                "empty BigQuery access token",
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent("tblmonit/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_token,
            page_size: config.page_size.max(1),
        })
    }
}

impl Catalog for BigQueryCatalog {
    type Session = BigQuerySession;

    async fn connect(&self, project_id: &str) -> Result<Self::Session, CatalogError> {
        if project_id.trim().is_empty() {
            return Err(CatalogError::NotConfigured(String::from(
                "project ID is empty",
            )));
        }
        tracing::debug!(project = project_id, "opening bigquery session");
        Ok(BigQuerySession {
            catalog: self.clone(),
            project_id: project_id.to_string(),
        })
    }
}

/// Requests scoped to one BigQuery project.
#[derive(Debug)]
pub struct BigQuerySession {
    catalog: BigQueryCatalog,
    project_id: String,
}

impl BigQuerySession {
    fn project_url(&self) -> String {
        format!(
            "{}/projects/{}",
            self.catalog.endpoint,
            urlencoding::encode(&self.project_id)
        )
    }

    fn datasets_url(&self) -> String {
        format!("{}/datasets", self.project_url())
    }

    fn tables_url(&self, dataset_id: &str) -> String {
        format!(
            "{}/datasets/{}/tables",
            self.project_url(),
            urlencoding::encode(dataset_id)
        )
    }

    fn table_url(&self, dataset_id: &str, table_id: &str) -> String {
        format!(
            "{}/{}",
            self.tables_url(dataset_id),
            urlencoding::encode(table_id)
        )
    }

    fn page_url(&self, base: &str, page_token: Option<&str>) -> String {
        let mut url = format!("{base}?maxResults={}", self.catalog.page_size);
        if let Some(token) = page_token {
            url.push_str("&pageToken=");
            url.push_str(&urlencoding::encode(token));
        }
        url
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, CatalogError> {
        Ok(self
            .catalog
            .http
            .get(url)
            .bearer_auth(&self.catalog.access_token)
            .send()
            .await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let resp = check_response(self.get(url).await?).await?;
        Ok(resp.json().await?)
    }
}

impl CatalogSession for BigQuerySession {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    async fn list_datasets(&self) -> Result<Vec<String>, CatalogError> {
        let base = self.datasets_url();
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page: DatasetList = self
                .get_json(&self.page_url(&base, page_token.as_deref()))
                .await?;
            ids.extend(
                page.datasets
                    .into_iter()
                    .map(|entry| entry.dataset_reference.dataset_id),
            );
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        tracing::debug!(project = %self.project_id, count = ids.len(), "listed datasets");
        Ok(ids)
    }

    async fn list_tables(&self, dataset_id: &str) -> Result<Vec<String>, CatalogError> {
        let base = self.tables_url(dataset_id);
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page: TableList = self
                .get_json(&self.page_url(&base, page_token.as_deref()))
                .await?;
            ids.extend(
                page.tables
                    .into_iter()
                    .map(|entry| entry.table_reference.table_id),
            );
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        tracing::debug!(
            project = %self.project_id,
            dataset = dataset_id,
            count = ids.len(),
            "listed tables"
        );
        Ok(ids)
    }

    async fn table_metadata(
        &self,
        dataset_id: &str,
        table_id: &str,
    ) -> Result<Option<TableMetadata>, CatalogError> {
        let resp = self.get(&self.table_url(dataset_id, table_id)).await?;
        if resp.status() == 404 {
            return Ok(None);
        }
        let resource: TableResource = check_response(resp).await?.json().await?;
        resource.into_metadata().map(Some)
    }
}
