// src/api_client.rs
//! HTTP client for the sourcing backend - all collaborator calls go through here

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, trace};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::types::{
    AdvertData, AllCompaniesResponse, CompanyRecord, CompanyRow, CreateBoxRequest,
    EmployeeCountRange, LoadedSearchResponse, Location, SavedSearchRequest, SavedSearchSummary,
    SearchFilters,
};

const BUSINESS_MODELS_ENDPOINT: &str = "/api/business-models";
const ALL_COMPANIES_ENDPOINT: &str = "/api/all-companies-linkedin-ids";
const SEARCH_COMPANIES_ENDPOINT: &str = "/api/search-linkedin-ids";
const SAVED_SEARCHES_ENDPOINT: &str = "/api/saved-searches";
const EMPLOYEE_COUNT_RANGE_ENDPOINT: &str = "/api/employee-count-range";
const LOCATIONS_ENDPOINT: &str = "/api/locations";
const PROCESS_ADVERT_ENDPOINT: &str = "/api/process-advert";
const PIPELINES_ENDPOINT: &str = "/api/pipelines";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BusinessModelsResponse {
    business_models: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            token,
        })
    }

    /// List business-model category names.
    pub async fn business_models(&self) -> Result<Vec<String>> {
        let response: BusinessModelsResponse = self.get(BUSINESS_MODELS_ENDPOINT).await?;
        Ok(response.business_models)
    }

    /// Full company directory used for manual selection.
    pub async fn all_companies(&self) -> Result<Vec<CompanyRecord>> {
        let response: AllCompaniesResponse = self.get(ALL_COMPANIES_ENDPOINT).await?;
        Ok(response
            .companies
            .into_iter()
            .map(|row| row.into_record())
            .collect())
    }

    pub async fn employee_count_range(&self) -> Result<EmployeeCountRange> {
        self.get(EMPLOYEE_COUNT_RANGE_ENDPOINT).await
    }

    pub async fn locations(&self) -> Result<Vec<Location>> {
        self.get(LOCATIONS_ENDPOINT).await
    }

    /// Run a filtered company search. Unset filter fields are left out of
    /// the query string entirely.
    pub async fn search_companies(&self, filters: &SearchFilters) -> Result<Vec<CompanyRecord>> {
        let url = format!("{}{}", self.base_url, SEARCH_COMPANIES_ENDPOINT);
        info!("Searching companies: {}", url);

        let response = self
            .authorized(self.client.get(&url).query(filters))
            .send()
            .await?;
        let rows: Vec<CompanyRow> = Self::handle(response).await?;
        Ok(rows.into_iter().map(|row| row.into_record()).collect())
    }

    pub async fn save_search(&self, request: &SavedSearchRequest) -> Result<String> {
        let url = format!("{}{}", self.base_url, SAVED_SEARCHES_ENDPOINT);
        info!("Saving search '{}': {}", request.search_name, url);

        let response = self
            .authorized(self.client.put(&url).json(request))
            .send()
            .await?;
        let ack: MessageResponse = Self::handle(response).await?;
        Ok(ack.message)
    }

    pub async fn saved_searches(&self) -> Result<Vec<SavedSearchSummary>> {
        self.get(SAVED_SEARCHES_ENDPOINT).await
    }

    pub async fn saved_search(&self, id: i64) -> Result<LoadedSearchResponse> {
        let endpoint = format!("{}/{}", SAVED_SEARCHES_ENDPOINT, id);
        self.get(&endpoint).await
    }

    pub async fn delete_saved_search(&self, id: i64) -> Result<String> {
        let url = format!("{}{}/{}", self.base_url, SAVED_SEARCHES_ENDPOINT, id);
        info!("Deleting saved search {}", id);

        let response = self.authorized(self.client.delete(&url)).send().await?;
        let ack: MessageResponse = Self::handle(response).await?;
        Ok(ack.message)
    }

    /// Upload a job-advert PDF for summarization.
    pub async fn process_advert(
        &self,
        pdf_path: &Path,
        briefing_notes: Option<&str>,
    ) -> Result<AdvertData> {
        let file_name = pdf_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Validation("Advert file has no usable name".to_string()))?;
        if !file_name.to_lowercase().ends_with(".pdf") {
            return Err(Error::Validation(format!(
                "Unsupported file format: {}. Upload a PDF.",
                file_name
            )));
        }

        let file_content = tokio::fs::read(pdf_path)
            .await
            .map_err(|e| Error::Validation(format!("Failed to read {}: {}", pdf_path.display(), e)))?;

        let mut form = Form::new().part(
            "pdf",
            Part::bytes(file_content)
                .file_name(file_name.to_string())
                .mime_str("application/pdf")
                .map_err(|e| Error::Network(format!("Failed to build multipart body: {}", e)))?,
        );
        if let Some(notes) = briefing_notes {
            form = form.text("briefingNotes", notes.to_string());
        }

        let url = format!("{}{}", self.base_url, PROCESS_ADVERT_ENDPOINT);
        info!("Uploading advert PDF: {}", url);

        let response = self
            .authorized(self.client.post(&url).multipart(form))
            .send()
            .await?;
        Self::handle(response).await
    }

    /// Create a CRM box in the given pipeline from extracted advert fields.
    pub async fn create_box(
        &self,
        pipeline_key: &str,
        request: &CreateBoxRequest,
    ) -> Result<String> {
        let url = format!("{}{}/{}/boxes", self.base_url, PIPELINES_ENDPOINT, pipeline_key);
        info!("Creating CRM box '{}'", request.name);

        let response = self
            .authorized(self.client.post(&url).json(request))
            .send()
            .await?;
        let ack: MessageResponse = Self::handle(response).await?;
        Ok(ack.message)
    }

    async fn get<R>(&self, endpoint: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        trace!("GET {}", url);

        let response = self.authorized(self.client.get(&url)).send().await?;
        Self::handle(response).await
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn handle<R>(response: reqwest::Response) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            serde_json::from_str(&text).map_err(|e| Error::Api {
                status: status.as_u16(),
                message: format!("Invalid response body: {}", e),
            })
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(Error::from_status(status.as_u16(), message))
        }
    }
}
