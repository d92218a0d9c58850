// src/saved_search.rs
//! Converts working lists to persistable saved searches and back

use crate::error::{Error, Result};
use crate::types::{CompanyRecord, LoadedSearchResponse, SavedSearchRequest};

/// Build the save-search request from the current working list.
///
/// The server keys saved companies by integer id, so every id in the list
/// must parse; a non-numeric id is rejected up front rather than persisted
/// as garbage.
pub fn encode(
    companies: &[CompanyRecord],
    name: &str,
    keywords: &str,
) -> Result<SavedSearchRequest> {
    let search_name = name.trim();
    if search_name.is_empty() {
        return Err(Error::Validation("Please enter a search name.".to_string()));
    }
    if companies.is_empty() {
        return Err(Error::Validation(
            "No companies to save. Please run a search first.".to_string(),
        ));
    }

    let mut company_ids = Vec::with_capacity(companies.len());
    for company in companies {
        let id: i64 = company.id.parse().map_err(|_| {
            Error::Validation(format!(
                "Company '{}' has a non-numeric id '{}' and cannot be saved",
                company.name, company.id
            ))
        })?;
        company_ids.push(id);
    }

    Ok(SavedSearchRequest {
        search_name: search_name.to_string(),
        keywords: keywords.to_string(),
        company_ids,
    })
}

/// Rebuild a working list from a loaded saved search.
///
/// Every company comes back as a plain search hit; the manual flag never
/// survives persistence. Missing keywords decode as the empty string.
pub fn decode(response: LoadedSearchResponse) -> (Vec<CompanyRecord>, String) {
    let companies = response
        .companies
        .into_iter()
        .map(|row| CompanyRecord {
            id: row.company_id,
            name: row.company_name,
            linkedin_id: row.linkedin_id,
            linkedin_page: row.linkedin_page,
            added_manually: false,
        })
        .collect();

    (companies, response.keywords)
}
