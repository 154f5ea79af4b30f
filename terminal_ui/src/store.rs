//! Task list state.
//!
//! `TaskStore` never touches the network. Each trigger hands back a
//! [`FetchTicket`] describing the list request to issue, and the response is
//! fed back through [`TaskStore::complete_fetch`]. Keeping the I/O outside
//! makes every transition observable from a plain unit test.

use taskdesk_shared::{Filter, Task, TaskPage};

use crate::error::FetchError;

pub const LIST_FETCH_ERROR: &str =
    "Failed to load tasks. Please check that the task server is running.";

/// What to do with list responses that resolve out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Only the most recently issued fetch may write state; older responses
    /// are dropped when they arrive.
    #[default]
    LatestRequestWins,
    /// Every response is applied as it resolves, so a slow stale response can
    /// overwrite a newer page.
    LastResolvedWins,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientState {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
    pub current_page: u32,
    pub total_pages: u32,
    pub filter: Filter,
}

impl Default for ClientState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            loading: false,
            error: None,
            current_page: 1,
            total_pages: 1,
            filter: Filter::All,
        }
    }
}

impl ClientState {
    pub fn scope_label(&self) -> &'static str {
        self.filter.scope_label()
    }

    pub fn empty_message(&self) -> &'static str {
        self.filter.empty_message()
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub page: u32,
    pub filter: Filter,
}

impl FetchTicket {
    pub fn completion(&self) -> Option<bool> {
        self.filter.completion()
    }
}

#[derive(Debug, Default)]
pub struct TaskStore {
    state: ClientState,
    ordering: ResponseOrdering,
    issued: u64,
}

impl TaskStore {
    pub fn new(ordering: ResponseOrdering) -> Self {
        Self {
            state: ClientState::default(),
            ordering,
            issued: 0,
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    fn begin(&mut self, page: u32) -> FetchTicket {
        self.issued += 1;
        self.state.loading = true;
        self.state.error = None;
        FetchTicket {
            seq: self.issued,
            page,
            filter: self.state.filter,
        }
    }

    /// Initial load: first page of the current filter.
    pub fn mount(&mut self) -> FetchTicket {
        self.state.current_page = 1;
        self.begin(1)
    }

    /// Switches the filter and goes back to page one. Returns `None` when
    /// there is nothing to refetch.
    pub fn set_filter(&mut self, filter: Filter) -> Option<FetchTicket> {
        if filter == self.state.filter && self.state.current_page == 1 {
            return None;
        }
        self.state.filter = filter;
        self.state.current_page = 1;
        Some(self.begin(1))
    }

    /// Selects another page under the same filter. The page is not checked
    /// against `total_pages`; the pagination control only offers valid ones.
    pub fn set_page(&mut self, page: u32) -> Option<FetchTicket> {
        if page == 0 || page == self.state.current_page {
            return None;
        }
        self.state.current_page = page;
        Some(self.begin(page))
    }

    /// A task was created: jump to page one. The new task is not guaranteed
    /// to be on it.
    pub fn task_created(&mut self) -> FetchTicket {
        self.state.current_page = 1;
        self.begin(1)
    }

    pub fn task_updated(&mut self) -> FetchTicket {
        self.begin(self.state.current_page)
    }

    /// Refetches the current page even if the deletion emptied it; the page
    /// is not clamped to the new `total_pages`.
    pub fn task_deleted(&mut self) -> FetchTicket {
        self.begin(self.state.current_page)
    }

    pub fn retry(&mut self) -> FetchTicket {
        self.begin(self.state.current_page)
    }

    /// Applies a list response. Returns whether it was applied.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<TaskPage, FetchError>,
    ) -> bool {
        if self.ordering == ResponseOrdering::LatestRequestWins && ticket.seq != self.issued {
            log::debug!(
                "dropping stale response for page {} (ticket {}, latest {})",
                ticket.page,
                ticket.seq,
                self.issued
            );
            return false;
        }

        self.state.loading = false;
        match result {
            Ok(page) => {
                self.state.total_pages = page.total_pages();
                self.state.tasks = page.results;
                self.state.current_page = ticket.page;
                self.state.error = None;
            }
            Err(err) => {
                log::warn!("error fetching tasks: {err:?}");
                self.state.error = Some(LIST_FETCH_ERROR.to_string());
            }
        }
        true
    }
}
