// src/advert.rs
//! Maps extracted advert fields onto the CRM pipeline's box shape

use crate::types::{AdvertData, CreateBoxRequest};

pub const DEFAULT_STAGE_KEY: &str = "5001";

/// Numeric field keys of the CRM pipeline. The production pipeline and the
/// development sandbox use different key sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub role_title: &'static str,
    pub description: &'static str,
    pub requirements: &'static str,
    pub responsibilities: &'static str,
    pub salary: &'static str,
    pub location: &'static str,
}

impl FieldMapping {
    pub const fn production() -> Self {
        Self {
            role_title: "1004",
            description: "1005",
            requirements: "1006",
            responsibilities: "1008",
            salary: "1011",
            location: "1012",
        }
    }

    pub const fn development() -> Self {
        Self {
            role_title: "1001",
            description: "1002",
            requirements: "1003",
            responsibilities: "1005",
            salary: "1008",
            location: "1009",
        }
    }

    /// Staging posts into the production pipeline.
    pub fn for_environment(environment: &str) -> Self {
        match environment {
            "production" | "staging" => Self::production(),
            _ => Self::development(),
        }
    }
}

/// Render a list field as the `<p>Title:</p><ul>...</ul>` block the CRM
/// expects. Blank lines are dropped and entries trimmed.
pub fn format_list_as_html(items: &[String], title: &str) -> String {
    let list_items: String = items
        .iter()
        .filter(|item| !item.trim().is_empty())
        .map(|item| format!("<li>{}</li>", item.trim()))
        .collect();
    format!("<p>{}:</p><ul>{}</ul>", title, list_items)
}

/// Build the box-creation request for one processed advert.
///
/// The role-title field combines the job title and the company descriptor;
/// salary is the fixed placeholder the team posts for every advert.
pub fn build_box_request(
    advert: &AdvertData,
    stage_key: &str,
    mapping: &FieldMapping,
) -> CreateBoxRequest {
    let mut fields = serde_json::Map::new();
    fields.insert(
        mapping.role_title.to_string(),
        serde_json::Value::String(format!(
            "{},{}",
            advert.job_title, advert.company_descriptor
        )),
    );
    fields.insert(
        mapping.description.to_string(),
        serde_json::Value::String(advert.blurb.clone()),
    );
    fields.insert(
        mapping.requirements.to_string(),
        serde_json::Value::String(format_list_as_html(&advert.requirements, "Requirements")),
    );
    fields.insert(
        mapping.responsibilities.to_string(),
        serde_json::Value::String(format_list_as_html(
            &advert.responsibilities,
            "Responsibilities",
        )),
    );
    fields.insert(
        mapping.salary.to_string(),
        serde_json::Value::String("Competitive".to_string()),
    );
    fields.insert(
        mapping.location.to_string(),
        serde_json::Value::String(advert.location.clone()),
    );

    CreateBoxRequest {
        name: advert.job_title.clone(),
        notes: advert.blurb.clone(),
        stage_key: stage_key.to_string(),
        fields,
    }
}
