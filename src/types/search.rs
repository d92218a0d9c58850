// src/types/search.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::company::id_from_number_or_string;

/// Filter dimensions accepted by the company search endpoint.
///
/// Every field is optional and omitted from the serialized query when unset;
/// the endpoint must never see an empty string. Keywords are carried
/// alongside the filters, not inside them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_models: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_from: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_to: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_codes: Option<String>,
}

/// A business-model category as presented to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Body of the save-search PUT request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedSearchRequest {
    pub search_name: String,
    pub keywords: String,
    pub company_ids: Vec<i64>,
}

/// One row of the saved-search listing.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedSearchSummary {
    pub id: i64,
    pub search_name: String,
    #[serde(default)]
    pub company_ids: Vec<i64>,
    #[serde(default)]
    pub keywords: String,
    pub created_at: DateTime<Utc>,
}

/// Company row inside a loaded saved search. The id field is named
/// `company_id` on this endpoint, unlike the directory and search rows.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedCompanyRow {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub company_id: String,
    pub company_name: String,
    pub linkedin_id: String,
    #[serde(default)]
    pub linkedin_page: Option<String>,
}

/// Response of loading one saved search by id.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadedSearchResponse {
    pub companies: Vec<SavedCompanyRow>,
    #[serde(default)]
    pub keywords: String,
}
