// src/filters.rs
//! Turns UI-level filter selections into the search endpoint's query shape

use crate::types::{Category, SearchFilters};

/// Build the filter object for a company search.
///
/// Selected ids are resolved to display names through the catalog; ids with
/// no catalog entry are dropped. The joined name list uses a bare comma with
/// no whitespace, and `business_models` is left unset when nothing resolves
/// so the query never carries an empty string. The size bounds are passed
/// through as given; defaulting happens when the range is first loaded.
pub fn build_filters(
    selected_category_ids: &[String],
    catalog: &[Category],
    size_range: (u32, u32),
) -> SearchFilters {
    let names: Vec<&str> = selected_category_ids
        .iter()
        .filter_map(|id| {
            catalog
                .iter()
                .find(|category| &category.id == id)
                .map(|category| category.name.as_str())
        })
        .collect();

    let business_models = if names.is_empty() {
        None
    } else {
        Some(names.join(","))
    };

    SearchFilters {
        business_models,
        size_from: Some(size_range.0),
        size_to: Some(size_range.1),
        location_codes: None,
    }
}

/// Variant used when the user also narrowed by location.
pub fn build_filters_with_locations(
    selected_category_ids: &[String],
    catalog: &[Category],
    size_range: (u32, u32),
    location_codes: &[String],
) -> SearchFilters {
    let mut filters = build_filters(selected_category_ids, catalog, size_range);
    if !location_codes.is_empty() {
        filters.location_codes = Some(location_codes.join(","));
    }
    filters
}
