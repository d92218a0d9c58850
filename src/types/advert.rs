// src/types/advert.rs
use serde::{Deserialize, Serialize};

/// Fields extracted from a job-advert PDF by the summarization service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertData {
    pub job_title: String,
    pub company_descriptor: String,
    pub blurb: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    pub location: String,
}

/// Body of the CRM box-creation request. Field keys inside `fields` are the
/// pipeline's numeric field identifiers and differ per environment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoxRequest {
    pub name: String,
    pub notes: String,
    pub stage_key: String,
    pub fields: serde_json::Map<String, serde_json::Value>,
}
