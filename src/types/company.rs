// src/types/company.rs
use serde::{Deserialize, Deserializer, Serialize};

/// One company in the working list, with provenance.
///
/// `added_manually` is true when the user picked the company from the full
/// directory rather than receiving it from a filtered search. A record keeps
/// its id as the server-assigned opaque string; `linkedin_id` is the separate
/// identifier LinkedIn's people search expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    pub linkedin_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_page: Option<String>,
    pub added_manually: bool,
}

/// Row shape shared by the company directory and the filtered search.
///
/// Ids arrive as either a JSON number or a string depending on the endpoint,
/// and the display name comes in as `company_name` or `name`. Both are
/// normalized here, once, at the collaborator edge.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyRow {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,
    #[serde(alias = "company_name")]
    pub name: String,
    pub linkedin_id: String,
    #[serde(default)]
    pub linkedin_page: Option<String>,
}

impl CompanyRow {
    /// Server rows always enter the working list as search results.
    pub fn into_record(self) -> CompanyRecord {
        CompanyRecord {
            id: self.id,
            name: self.name,
            linkedin_id: self.linkedin_id,
            linkedin_page: self.linkedin_page,
            added_manually: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AllCompaniesResponse {
    pub companies: Vec<CompanyRow>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EmployeeCountRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub id: i64,
    pub location_name: String,
    pub location_code: String,
}

pub(crate) fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}
