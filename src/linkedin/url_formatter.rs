// src/linkedin/url_formatter.rs
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{Error, Result};

const BASE_URL: &str = "https://www.linkedin.com/search/results/people/";

// Matches JavaScript's encodeURIComponent: everything except alphanumerics
// and - _ . ! ~ * ' ( ) is percent-encoded. LinkedIn expects exactly this
// encoding for the JSON array literals in its query string.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Inputs for one people-search deep link.
///
/// A `location_codes` entry may pre-combine several geo codes joined by the
/// literal `%2C`; such entries are split into individual codes before the
/// `geoUrn` array is built.
#[derive(Debug, Clone, Default)]
pub struct PeopleSearchParams {
    pub company_ids: Vec<String>,
    pub keywords: String,
    pub location_codes: Option<Vec<String>>,
}

/// Build the LinkedIn people-search URL.
///
/// Parameter order is fixed (`currentCompany`, `keywords`, `origin`, then
/// `geoUrn` when present) so the output is byte-for-byte deterministic.
pub fn format_people_search_url(params: &PeopleSearchParams) -> Result<String> {
    if params.company_ids.is_empty() {
        return Err(Error::InvalidInput(
            "At least one company ID is required".to_string(),
        ));
    }

    let company_ids_json = serde_json::to_string(&params.company_ids)
        .map_err(|e| Error::InvalidInput(format!("Unencodable company ids: {}", e)))?;
    let encoded_company_ids = utf8_percent_encode(&company_ids_json, COMPONENT).to_string();

    let encoded_keywords =
        utf8_percent_encode(params.keywords.trim(), COMPONENT).to_string();

    let mut url = format!(
        "{}?currentCompany={}&keywords={}&origin=FACETED_SEARCH",
        BASE_URL, encoded_company_ids, encoded_keywords
    );

    if let Some(codes) = params.location_codes.as_ref().filter(|c| !c.is_empty()) {
        let individual_codes: Vec<&str> = codes
            .iter()
            .flat_map(|code| code.split("%2C"))
            .collect();
        let codes_json = serde_json::to_string(&individual_codes)
            .map_err(|e| Error::InvalidInput(format!("Unencodable location codes: {}", e)))?;
        let encoded_codes = utf8_percent_encode(&codes_json, COMPONENT).to_string();
        url.push_str("&geoUrn=");
        url.push_str(&encoded_codes);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(ids: &[&str], keywords: &str) -> PeopleSearchParams {
        PeopleSearchParams {
            company_ids: ids.iter().map(|s| s.to_string()).collect(),
            keywords: keywords.to_string(),
            location_codes: None,
        }
    }

    #[test]
    fn test_rejects_empty_company_ids() {
        let err = format_people_search_url(&params(&[], "cfo")).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_basic_url_shape_and_parameter_order() {
        let url = format_people_search_url(&params(&["a", "b"], "cfo")).unwrap();
        assert_eq!(
            url,
            "https://www.linkedin.com/search/results/people/?currentCompany=%5B%22a%22%2C%22b%22%5D&keywords=cfo&origin=FACETED_SEARCH"
        );
    }

    #[test]
    fn test_empty_keywords_produce_empty_value_and_no_geo_urn() {
        let url = format_people_search_url(&params(&["a"], "")).unwrap();
        assert_eq!(
            url,
            "https://www.linkedin.com/search/results/people/?currentCompany=%5B%22a%22%5D&keywords=&origin=FACETED_SEARCH"
        );
        assert!(!url.contains("geoUrn"));
    }

    #[test]
    fn test_keywords_are_trimmed_and_component_encoded() {
        let url = format_people_search_url(&params(&["a"], "  chief financial officer ")).unwrap();
        assert!(url.contains("&keywords=chief%20financial%20officer&"));
    }

    #[test]
    fn test_combined_location_codes_are_split() {
        let mut p = params(&["a", "b"], "cfo");
        p.location_codes = Some(vec!["103%2C104".to_string()]);
        let url = format_people_search_url(&p).unwrap();
        // geoUrn decodes to the JSON array ["103","104"].
        assert!(url.ends_with("&geoUrn=%5B%22103%22%2C%22104%22%5D"));
    }

    #[test]
    fn test_single_location_codes_pass_through() {
        let mut p = params(&["a"], "");
        p.location_codes = Some(vec!["90000084".to_string(), "101165590".to_string()]);
        let url = format_people_search_url(&p).unwrap();
        assert!(url.ends_with("&geoUrn=%5B%2290000084%22%2C%22101165590%22%5D"));
    }

    #[test]
    fn test_empty_location_list_omits_geo_urn() {
        let mut p = params(&["a"], "cfo");
        p.location_codes = Some(vec![]);
        let url = format_people_search_url(&p).unwrap();
        assert!(!url.contains("geoUrn"));
    }

    #[test]
    fn test_company_ids_survive_a_decode_round_trip() {
        let url = format_people_search_url(&params(&["11", "22"], "")).unwrap();
        let encoded = url
            .split("currentCompany=")
            .nth(1)
            .unwrap()
            .split('&')
            .next()
            .unwrap();
        let decoded = encoded
            .replace("%5B", "[")
            .replace("%5D", "]")
            .replace("%22", "\"")
            .replace("%2C", ",");
        let ids: Vec<String> = serde_json::from_str(&decoded).unwrap();
        assert_eq!(ids, vec!["11", "22"]);
    }
}
