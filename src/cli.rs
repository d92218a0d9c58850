// src/cli.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

use crate::advert::{build_box_request, FieldMapping, DEFAULT_STAGE_KEY};
use crate::api_client::ApiClient;
use crate::auth::TokenStore;
use crate::config::AppConfig;
use crate::error::Error;
use crate::filters::build_filters_with_locations;
use crate::linkedin::{format_people_search_url, LinkedInLinkOpener, PeopleSearchParams, SystemBrowser};
use crate::roster::{CompanyRoster, SearchOutcome};
use crate::saved_search;
use crate::session::{SessionState, SessionStore};
use crate::types::{AdvertData, Category};

#[derive(Parser)]
#[command(name = "linkscout")]
#[command(about = "Build company lists and open LinkedIn people searches")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store the API bearer token for subsequent calls
    Login { token: String },
    /// Forget the stored token
    Logout,
    /// List business-model categories
    Categories,
    /// List the full company directory
    Companies,
    /// List known locations and their codes
    Locations,
    /// Show the employee-count bounds
    Range,
    /// Run a filtered search and merge it into the working list
    Search {
        /// Category names, comma-separated
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,
        #[arg(long)]
        size_from: Option<u32>,
        #[arg(long)]
        size_to: Option<u32>,
        /// Location codes, comma-separated
        #[arg(long, value_delimiter = ',')]
        locations: Vec<String>,
        /// Keywords to carry into saved searches and LinkedIn links
        #[arg(long)]
        keywords: Option<String>,
    },
    /// List companies still available for manual selection
    Available,
    /// Add a company to the working list by id
    Add { company_id: String },
    /// Remove a company from the working list by id
    Remove { company_id: String },
    /// Show the working list
    List,
    /// Empty the working list
    Clear,
    /// Save the working list as a named search
    Save { name: String },
    /// List saved searches
    Searches,
    /// Load a saved search into the working list
    Load { id: i64 },
    /// Delete a saved search
    Delete { id: i64 },
    /// Open a LinkedIn people search for the working list
    Open {
        /// Geo codes for the geoUrn parameter; repeatable
        #[arg(long = "location-code")]
        location_codes: Vec<String>,
        /// Print the URL instead of opening the browser
        #[arg(long)]
        print_only: bool,
    },
    /// Advert processing commands
    #[command(subcommand)]
    Advert(AdvertCommand),
}

#[derive(Subcommand)]
pub enum AdvertCommand {
    /// Upload an advert PDF and show the extracted fields
    Process {
        pdf: PathBuf,
        #[arg(long)]
        briefing_notes: Option<String>,
        /// Write the extracted fields as JSON for a later `advert post`
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Post extracted advert fields to a CRM pipeline
    Post {
        /// Pipeline key of the target CRM workflow
        #[arg(long)]
        pipeline: String,
        #[arg(long, default_value = DEFAULT_STAGE_KEY)]
        stage: String,
        /// JSON file produced by `advert process --out`
        #[arg(long)]
        advert: PathBuf,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load()?;
    config.ensure_data_dir().await?;

    let tokens = TokenStore::new(config.token_path());
    let sessions = SessionStore::new(config.session_path());

    match cli.command {
        Command::Login { token } => {
            tokens.store(&token).await?;
            println!("✅ Token stored. You are ready to search.");
        }

        Command::Logout => {
            tokens.clear().await?;
            println!("✅ Token cleared.");
        }

        Command::Categories => {
            let client = client(&config, &tokens).await?;
            match client.business_models().await {
                Ok(models) => {
                    if models.is_empty() {
                        println!("No business models available.");
                    } else {
                        for model in models {
                            println!("{}", model);
                        }
                    }
                }
                Err(e) => report_failure(e, &tokens).await?,
            }
        }

        Command::Companies => {
            let client = client(&config, &tokens).await?;
            match client.all_companies().await {
                Ok(companies) => {
                    println!("{:<10} {:<40} {:<20}", "ID", "Name", "LinkedIn ID");
                    for company in companies {
                        println!(
                            "{:<10} {:<40} {:<20}",
                            company.id, company.name, company.linkedin_id
                        );
                    }
                }
                Err(e) => report_failure(e, &tokens).await?,
            }
        }

        Command::Locations => {
            let client = client(&config, &tokens).await?;
            match client.locations().await {
                Ok(locations) => {
                    println!("{:<6} {:<30} {:<15}", "ID", "Location", "Code");
                    for location in locations {
                        println!(
                            "{:<6} {:<30} {:<15}",
                            location.id, location.location_name, location.location_code
                        );
                    }
                }
                Err(e) => report_failure(e, &tokens).await?,
            }
        }

        Command::Range => {
            let client = client(&config, &tokens).await?;
            match client.employee_count_range().await {
                Ok(range) => println!("Employee count: {} - {}", range.min, range.max),
                Err(e) => report_failure(e, &tokens).await?,
            }
        }

        Command::Search {
            categories,
            size_from,
            size_to,
            locations,
            keywords,
        } => {
            let client = client(&config, &tokens).await?;
            let mut state = sessions.load().await?;

            // The category catalog keys filters by display name.
            let catalog: Vec<Category> = match client.business_models().await {
                Ok(models) => models
                    .into_iter()
                    .map(|name| Category {
                        id: name.clone(),
                        name,
                    })
                    .collect(),
                Err(e) => return report_failure(e, &tokens).await,
            };

            // Bounds not given explicitly default to the server's full range.
            let (from, to) = match (size_from, size_to) {
                (Some(from), Some(to)) => (from, to),
                _ => match client.employee_count_range().await {
                    Ok(range) => (
                        size_from.unwrap_or(range.min),
                        size_to.unwrap_or(range.max),
                    ),
                    Err(e) => return report_failure(e, &tokens).await,
                },
            };

            let filters = build_filters_with_locations(&categories, &catalog, (from, to), &locations);

            let mut roster = CompanyRoster::from_companies(state.companies);
            let ticket = roster.begin_search();
            match client.search_companies(&filters).await {
                Ok(fresh) => {
                    let found = fresh.len();
                    if roster.apply_search(ticket, fresh) == SearchOutcome::Applied {
                        if let Some(kw) = keywords {
                            state.keywords = kw.trim().to_string();
                        }
                        state.companies = roster.into_companies();
                        sessions.save(&state).await?;
                        println!(
                            "✅ Search returned {} companies; working list now has {}.",
                            found,
                            state.companies.len()
                        );
                    }
                }
                Err(e) => {
                    // Working list stays last-known-good on failure.
                    report_failure(e, &tokens).await?;
                }
            }
        }

        Command::Available => {
            let client = client(&config, &tokens).await?;
            let state = sessions.load().await?;
            match client.all_companies().await {
                Ok(directory) => {
                    let roster = CompanyRoster::from_companies(state.companies);
                    let available = roster.available_for_manual_selection(&directory);
                    println!("{:<10} {:<40} {:<20}", "ID", "Name", "LinkedIn ID");
                    for company in available {
                        println!(
                            "{:<10} {:<40} {:<20}",
                            company.id, company.name, company.linkedin_id
                        );
                    }
                }
                Err(e) => report_failure(e, &tokens).await?,
            }
        }

        Command::Add { company_id } => {
            let client = client(&config, &tokens).await?;
            let mut state = sessions.load().await?;
            match client.all_companies().await {
                Ok(directory) => {
                    let mut roster = CompanyRoster::from_companies(state.companies);
                    if roster.add_manual(&company_id, &directory) {
                        state.companies = roster.into_companies();
                        sessions.save(&state).await?;
                        println!("✅ Added company {} to the working list.", company_id);
                    } else {
                        println!(
                            "Company {} is unknown or already in the working list.",
                            company_id
                        );
                    }
                }
                Err(e) => report_failure(e, &tokens).await?,
            }
        }

        Command::Remove { company_id } => {
            let mut state = sessions.load().await?;
            let mut roster = CompanyRoster::from_companies(state.companies);
            if roster.remove(&company_id) {
                state.companies = roster.into_companies();
                sessions.save(&state).await?;
                println!("✅ Removed company {} from the working list.", company_id);
            } else {
                println!("Company {} is not in the working list.", company_id);
            }
        }

        Command::List => {
            let state = sessions.load().await?;
            if state.companies.is_empty() {
                println!("Working list is empty. Run `linkscout search` first.");
            } else {
                println!("{:<10} {:<40} {:<20} {:<8}", "ID", "Name", "LinkedIn ID", "Manual");
                for company in &state.companies {
                    println!(
                        "{:<10} {:<40} {:<20} {:<8}",
                        company.id,
                        company.name,
                        company.linkedin_id,
                        if company.added_manually { "yes" } else { "no" }
                    );
                }
                if !state.keywords.is_empty() {
                    println!("Keywords: {}", state.keywords);
                }
            }
        }

        Command::Clear => {
            sessions.clear().await?;
            println!("✅ Working list cleared.");
        }

        Command::Save { name } => {
            let state = sessions.load().await?;
            let request = match saved_search::encode(&state.companies, &name, &state.keywords) {
                Ok(request) => request,
                Err(e) => {
                    println!("❌ {}", e);
                    return Ok(());
                }
            };

            let client = client(&config, &tokens).await?;
            match client.save_search(&request).await {
                Ok(message) => println!("✅ {}", message),
                Err(e) => report_failure(e, &tokens).await?,
            }
        }

        Command::Searches => {
            let client = client(&config, &tokens).await?;
            match client.saved_searches().await {
                Ok(searches) => {
                    if searches.is_empty() {
                        println!("No saved searches yet.");
                    } else {
                        println!("{:<6} {:<30} {:<10} {:<20}", "ID", "Name", "Companies", "Created");
                        for search in searches {
                            println!(
                                "{:<6} {:<30} {:<10} {:<20}",
                                search.id,
                                search.search_name,
                                search.company_ids.len(),
                                search.created_at.format("%Y-%m-%d %H:%M")
                            );
                        }
                    }
                }
                Err(e) => report_failure(e, &tokens).await?,
            }
        }

        Command::Load { id } => {
            let client = client(&config, &tokens).await?;
            match client.saved_search(id).await {
                Ok(response) => {
                    let (companies, keywords) = saved_search::decode(response);
                    let count = companies.len();
                    sessions
                        .save(&SessionState {
                            companies,
                            keywords,
                        })
                        .await?;
                    println!("✅ Loaded saved search {} with {} companies.", id, count);
                }
                Err(e) => report_failure(e, &tokens).await?,
            }
        }

        Command::Delete { id } => {
            let client = client(&config, &tokens).await?;
            match client.delete_saved_search(id).await {
                Ok(message) => println!("✅ {}", message),
                Err(e) => report_failure(e, &tokens).await?,
            }
        }

        Command::Open {
            location_codes,
            print_only,
        } => {
            let state = sessions.load().await?;
            let params = PeopleSearchParams {
                company_ids: state
                    .companies
                    .iter()
                    .map(|c| c.linkedin_id.clone())
                    .collect(),
                keywords: state.keywords.clone(),
                location_codes: if location_codes.is_empty() {
                    None
                } else {
                    Some(location_codes)
                },
            };

            let url = match format_people_search_url(&params) {
                Ok(url) => url,
                Err(e) => {
                    println!("❌ {}", e);
                    return Ok(());
                }
            };

            if print_only {
                println!("{}", url);
            } else {
                let mut opener = LinkedInLinkOpener::new(SystemBrowser);
                opener.open_or_reuse(&url)?;
                println!("✅ Opened LinkedIn people search for {} companies.", params.company_ids.len());
            }
        }

        Command::Advert(advert_command) => match advert_command {
            AdvertCommand::Process {
                pdf,
                briefing_notes,
                out,
            } => {
                let client = client(&config, &tokens).await?;
                match client.process_advert(&pdf, briefing_notes.as_deref()).await {
                    Ok(advert) => {
                        print_advert(&advert);
                        if let Some(out_path) = out {
                            let json = serde_json::to_string_pretty(&advert)?;
                            tokio::fs::write(&out_path, json).await?;
                            println!("✅ Extracted fields written to {}", out_path.display());
                        }
                    }
                    Err(e) => report_failure(e, &tokens).await?,
                }
            }

            AdvertCommand::Post {
                pipeline,
                stage,
                advert,
            } => {
                let content = tokio::fs::read_to_string(&advert).await?;
                let advert_data: AdvertData = serde_json::from_str(&content)?;
                let mapping = FieldMapping::for_environment(&config.environment);
                let request = build_box_request(&advert_data, &stage, &mapping);

                let client = client(&config, &tokens).await?;
                match client.create_box(&pipeline, &request).await {
                    Ok(message) => println!("✅ Box created: {}", message),
                    Err(e) => report_failure(e, &tokens).await?,
                }
            }
        },
    }

    Ok(())
}

async fn client(config: &AppConfig, tokens: &TokenStore) -> Result<ApiClient> {
    let token = tokens.load().await?;
    if token.is_none() {
        warn!("No API token stored; requests go out unauthenticated");
    }
    Ok(ApiClient::new(config, token)?)
}

/// Operation-boundary error handling: a 401 clears the stored credentials,
/// everything else becomes a plain user-visible message.
async fn report_failure(err: Error, tokens: &TokenStore) -> Result<()> {
    match err {
        Error::Auth => {
            tokens.clear().await?;
            println!("❌ Session expired. Run `linkscout login <token>` to authenticate again.");
        }
        other => println!("❌ {}", other),
    }
    Ok(())
}

fn print_advert(advert: &AdvertData) {
    println!("Job title:    {}", advert.job_title);
    println!("Company:      {}", advert.company_descriptor);
    println!("Location:     {}", advert.location);
    println!("Blurb:        {}", advert.blurb);
    println!("Requirements:");
    for item in &advert.requirements {
        println!("  - {}", item);
    }
    println!("Responsibilities:");
    for item in &advert.responsibilities {
        println!("  - {}", item);
    }
}
