// src/linkedin/mod.rs
//! LinkedIn people-search deep links and the managed browser tab

pub mod link_opener;
pub mod url_formatter;

pub use link_opener::{Browser, BrowserTab, LinkedInLinkOpener, SystemBrowser};
pub use url_formatter::{format_people_search_url, PeopleSearchParams};
