// src/roster.rs
//! Working list of selected companies, merged from searches and manual picks

use tracing::debug;

use crate::types::CompanyRecord;

/// Token for one issued search. A response is only applied when its ticket
/// is still the latest one handed out, so an overlapping search that
/// completes late cannot clobber a newer result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// What happened when a search response was handed to the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Applied,
    Stale,
}

/// The working list of companies currently selected for the session.
///
/// Search results replace all prior non-manual entries; manually added
/// companies survive a new search unless the search itself returns them,
/// in which case the fresh copy wins and the manual flag is cleared.
/// Ids are unique within the list at all times.
#[derive(Debug, Default)]
pub struct CompanyRoster {
    companies: Vec<CompanyRecord>,
    latest_ticket: u64,
}

impl CompanyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a roster from persisted session state.
    pub fn from_companies(companies: Vec<CompanyRecord>) -> Self {
        Self {
            companies,
            latest_ticket: 0,
        }
    }

    pub fn companies(&self) -> &[CompanyRecord] {
        &self.companies
    }

    pub fn into_companies(self) -> Vec<CompanyRecord> {
        self.companies
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    /// Issue a ticket for a search that is about to run.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.latest_ticket += 1;
        SearchTicket(self.latest_ticket)
    }

    /// Merge a completed search into the working list.
    ///
    /// Fresh results come first, all flagged as search hits, followed by the
    /// prior manual records whose ids the search did not return, in their
    /// prior relative order. A stale ticket leaves the list untouched.
    pub fn apply_search(
        &mut self,
        ticket: SearchTicket,
        fresh: Vec<CompanyRecord>,
    ) -> SearchOutcome {
        if ticket.0 != self.latest_ticket {
            debug!(
                "Discarding stale search response (ticket {} < {})",
                ticket.0, self.latest_ticket
            );
            return SearchOutcome::Stale;
        }

        let mut merged: Vec<CompanyRecord> = Vec::with_capacity(fresh.len());
        for mut record in fresh {
            // The server only ever returns search hits; enforce it anyway so
            // a manual record re-found by the search loses its flag.
            record.added_manually = false;
            if !merged.iter().any(|existing| existing.id == record.id) {
                merged.push(record);
            }
        }

        for prior in self.companies.drain(..) {
            if prior.added_manually && !merged.iter().any(|r| r.id == prior.id) {
                merged.push(prior);
            }
        }

        self.companies = merged;
        SearchOutcome::Applied
    }

    /// Add a company from the full directory by id.
    ///
    /// Unknown ids and ids already present in the list are no-ops; an
    /// existing search hit is not promoted to manual. Returns whether the
    /// list changed.
    pub fn add_manual(&mut self, company_id: &str, directory: &[CompanyRecord]) -> bool {
        if self.companies.iter().any(|c| c.id == company_id) {
            return false;
        }
        let Some(entry) = directory.iter().find(|c| c.id == company_id) else {
            return false;
        };
        let mut record = entry.clone();
        record.added_manually = true;
        self.companies.push(record);
        true
    }

    /// Remove a company by id, whatever its provenance. This is how the user
    /// deselects both manual picks and search hits.
    pub fn remove(&mut self, company_id: &str) -> bool {
        let before = self.companies.len();
        self.companies.retain(|c| c.id != company_id);
        self.companies.len() != before
    }

    /// Directory entries the user can still toggle from the manual picker:
    /// everything not in the working list, plus entries that are in the list
    /// but were added manually (so they can be deselected again).
    pub fn available_for_manual_selection(
        &self,
        directory: &[CompanyRecord],
    ) -> Vec<CompanyRecord> {
        directory
            .iter()
            .filter(|entry| {
                match self.companies.iter().find(|c| c.id == entry.id) {
                    None => true,
                    Some(existing) => existing.added_manually,
                }
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, manual: bool) -> CompanyRecord {
        CompanyRecord {
            id: id.to_string(),
            name: format!("Company {}", id),
            linkedin_id: format!("li-{}", id),
            linkedin_page: None,
            added_manually: manual,
        }
    }

    fn ids(roster: &CompanyRoster) -> Vec<&str> {
        roster.companies().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_search_replaces_prior_search_hits() {
        let mut roster = CompanyRoster::from_companies(vec![record("1", false), record("2", true)]);
        let ticket = roster.begin_search();
        let outcome = roster.apply_search(ticket, vec![record("3", false)]);

        assert_eq!(outcome, SearchOutcome::Applied);
        assert_eq!(ids(&roster), vec!["3", "2"]);
        assert!(!roster.companies()[0].added_manually);
        assert!(roster.companies()[1].added_manually);
    }

    #[test]
    fn test_fresh_result_clears_manual_flag() {
        let mut roster = CompanyRoster::from_companies(vec![record("5", true)]);
        let ticket = roster.begin_search();
        roster.apply_search(ticket, vec![record("5", false)]);

        assert_eq!(roster.len(), 1);
        assert!(!roster.companies()[0].added_manually);
    }

    #[test]
    fn test_manual_records_keep_prior_relative_order() {
        let mut roster = CompanyRoster::from_companies(vec![
            record("a", true),
            record("b", false),
            record("c", true),
        ]);
        let ticket = roster.begin_search();
        roster.apply_search(ticket, vec![record("x", false)]);

        assert_eq!(ids(&roster), vec!["x", "a", "c"]);
    }

    #[test]
    fn test_merge_never_duplicates_ids() {
        let mut roster = CompanyRoster::from_companies(vec![record("1", true), record("2", true)]);
        let ticket = roster.begin_search();
        roster.apply_search(
            ticket,
            vec![record("1", false), record("1", false), record("2", false)],
        );

        assert_eq!(ids(&roster), vec!["1", "2"]);
    }

    #[test]
    fn test_stale_search_response_is_discarded() {
        let mut roster = CompanyRoster::new();
        let first = roster.begin_search();
        let second = roster.begin_search();

        assert_eq!(
            roster.apply_search(first, vec![record("old", false)]),
            SearchOutcome::Stale
        );
        assert!(roster.is_empty());

        assert_eq!(
            roster.apply_search(second, vec![record("new", false)]),
            SearchOutcome::Applied
        );
        assert_eq!(ids(&roster), vec!["new"]);
    }

    #[test]
    fn test_add_manual_is_idempotent() {
        let directory = vec![record("7", false)];
        let mut roster = CompanyRoster::new();

        assert!(roster.add_manual("7", &directory));
        assert!(!roster.add_manual("7", &directory));
        assert_eq!(roster.len(), 1);
        assert!(roster.companies()[0].added_manually);
    }

    #[test]
    fn test_add_manual_does_not_promote_search_hit() {
        let directory = vec![record("7", false)];
        let mut roster = CompanyRoster::from_companies(vec![record("7", false)]);

        assert!(!roster.add_manual("7", &directory));
        assert!(!roster.companies()[0].added_manually);
    }

    #[test]
    fn test_add_manual_unknown_id_is_noop() {
        let directory = vec![record("7", false)];
        let mut roster = CompanyRoster::new();

        assert!(!roster.add_manual("missing", &directory));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_remove_drops_any_provenance() {
        let mut roster = CompanyRoster::from_companies(vec![record("1", false), record("2", true)]);

        assert!(roster.remove("1"));
        assert!(roster.remove("2"));
        assert!(!roster.remove("2"));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_available_for_manual_selection() {
        let directory = vec![record("1", false), record("2", false), record("3", false)];
        let mut roster = CompanyRoster::from_companies(vec![record("1", false)]);
        roster.add_manual("2", &directory);

        let available = roster.available_for_manual_selection(&directory);
        let available_ids: Vec<&str> = available.iter().map(|c| c.id.as_str()).collect();
        // Search hit 1 is not toggleable; manual pick 2 and absent 3 are.
        assert_eq!(available_ids, vec!["2", "3"]);
    }

    #[test]
    fn test_unique_ids_across_operation_sequences() {
        let directory = vec![record("1", false), record("2", false)];
        let mut roster = CompanyRoster::new();

        roster.add_manual("1", &directory);
        roster.add_manual("2", &directory);
        let ticket = roster.begin_search();
        roster.apply_search(ticket, vec![record("2", false), record("3", false)]);
        roster.add_manual("2", &directory);
        roster.remove("3");

        let mut seen = std::collections::HashSet::new();
        for company in roster.companies() {
            assert!(seen.insert(company.id.clone()), "duplicate id {}", company.id);
        }
    }
}
