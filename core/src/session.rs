//! View orchestration for the monitor workflow.
//!
//! A [`Session`] owns the loaded monitors, the current view and the notices a
//! front end should show. Async work is split in two halves: `begin_*` takes a
//! ticket stamped with the current generation, `complete_*` applies the
//! outcome only if that generation is still current. A fetch that finishes
//! after the user left the view it was started from is dropped.

use std::fmt;

use tracing::{debug, info};

use crate::{
    client::MonitorApi,
    error::{MonitorError, Result},
    form::MonitorForm,
    models::{FoundCase, Monitor},
};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    List,
    Create,
    Details(Monitor),
    Results {
        monitor_id: i64,
        cases: Vec<FoundCase>,
    },
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::List => "list",
            View::Create => "create",
            View::Details(_) => "details",
            View::Results { .. } => "results",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Feedback for the user about a finished action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// A list load in flight
#[derive(Debug)]
#[must_use]
pub struct ListTicket {
    generation: u64,
}

/// A results fetch in flight
#[derive(Debug)]
#[must_use]
pub struct ResultsTicket {
    monitor_id: i64,
    generation: u64,
}

impl ResultsTicket {
    pub fn monitor_id(&self) -> i64 {
        self.monitor_id
    }
}

pub struct Session<A> {
    api: A,
    view: View,
    monitors: Vec<Monitor>,
    loading: usize,
    loading_results: usize,
    view_generation: u64,
    list_generation: u64,
    listed: bool,
    notices: Vec<Notice>,
}

impl<A: MonitorApi> Session<A> {
    /// A session in the list view with nothing loaded yet; call
    /// [`Session::enter_list`] to populate it.
    pub fn new(api: A) -> Self {
        Session {
            api,
            view: View::List,
            monitors: vec![],
            loading: 0,
            loading_results: 0,
            view_generation: 0,
            list_generation: 0,
            listed: false,
            notices: vec![],
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    /// Whether a monitor listing has been applied at least once
    pub fn is_listed(&self) -> bool {
        self.listed
    }

    pub fn is_loading(&self) -> bool {
        self.loading > 0
    }

    pub fn is_loading_results(&self) -> bool {
        self.loading_results > 0
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Monitor shown in the details view
    pub fn selected(&self) -> Option<&Monitor> {
        match &self.view {
            View::Details(monitor) => Some(monitor),
            _ => None,
        }
    }

    /// Cases shown in the results view
    pub fn results(&self) -> Option<&[FoundCase]> {
        match &self.view {
            View::Results { cases, .. } => Some(cases),
            _ => None,
        }
    }

    fn transition(&mut self, view: View) {
        debug!(from = %self.view, to = %view, "view transition");
        self.view = view;
        self.view_generation += 1;
    }

    fn invalid(&self, action: &'static str) -> MonitorError {
        MonitorError::InvalidTransition {
            action,
            from: self.view.name(),
        }
    }

    fn fail(&mut self, error: MonitorError) -> MonitorError {
        self.notices.push(Notice::Error(error.to_string()));
        error
    }

    /// Switch to the list view and reload the monitors. Always hits the service.
    pub async fn enter_list(&mut self) -> Result<()> {
        if self.view != View::List {
            self.transition(View::List);
        }
        self.reload().await
    }

    /// Reload the monitor collection without changing the view
    pub async fn reload(&mut self) -> Result<()> {
        let ticket = self.begin_list();
        let outcome = self.api.list_monitors().await;
        self.complete_list(ticket, outcome)
    }

    pub fn begin_list(&mut self) -> ListTicket {
        self.loading += 1;
        self.list_generation += 1;
        ListTicket {
            generation: self.list_generation,
        }
    }

    /// Apply a finished list load. Outcomes older than the newest load are
    /// discarded.
    pub fn complete_list(
        &mut self,
        ticket: ListTicket,
        outcome: Result<Vec<Monitor>>,
    ) -> Result<()> {
        self.loading = self.loading.saturating_sub(1);

        if ticket.generation != self.list_generation {
            debug!(
                issued = ticket.generation,
                current = self.list_generation,
                "discarding stale monitor list"
            );
            return Ok(());
        }

        match outcome {
            Ok(monitors) => {
                self.monitors = monitors;
                self.listed = true;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn new_monitor(&mut self) -> Result<()> {
        if self.view != View::List {
            return Err(self.invalid("create a monitor"));
        }
        self.transition(View::Create);
        Ok(())
    }

    /// Open the details view for one of the loaded monitors
    pub fn select(&mut self, id: i64) -> Result<()> {
        if self.view != View::List {
            return Err(self.invalid("open monitor details"));
        }

        let monitor = self
            .monitors
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(MonitorError::UnknownMonitor(id))?;

        self.transition(View::Details(monitor));
        Ok(())
    }

    /// Fetch a monitor's results and show them. On failure the view stays put.
    pub async fn request_results(&mut self, id: i64) -> Result<()> {
        let ticket = self.begin_results(id)?;
        let outcome = self.api.fetch_results(id).await;
        self.complete_results(ticket, outcome)
    }

    pub fn begin_results(&mut self, id: i64) -> Result<ResultsTicket> {
        if !matches!(self.view, View::List | View::Details(_)) {
            return Err(self.invalid("load results"));
        }

        self.loading_results += 1;
        Ok(ResultsTicket {
            monitor_id: id,
            generation: self.view_generation,
        })
    }

    /// Apply a finished results fetch if the user is still where it started.
    pub fn complete_results(
        &mut self,
        ticket: ResultsTicket,
        outcome: Result<Vec<FoundCase>>,
    ) -> Result<()> {
        self.loading_results = self.loading_results.saturating_sub(1);

        if ticket.generation != self.view_generation {
            debug!(
                monitor_id = ticket.monitor_id,
                "discarding results for a view that is gone"
            );
            return Ok(());
        }

        match outcome {
            Ok(cases) => {
                info!(
                    monitor_id = ticket.monitor_id,
                    count = cases.len(),
                    "showing monitor results"
                );
                self.transition(View::Results {
                    monitor_id: ticket.monitor_id,
                    cases,
                });
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Validate and submit the create form, then return to the list.
    ///
    /// A blank term fails before anything is sent.
    pub async fn submit_create(&mut self, form: &MonitorForm) -> Result<Monitor> {
        if self.view != View::Create {
            return Err(self.invalid("submit a monitor"));
        }

        let request = form.to_request().map_err(|e| self.fail(e))?;

        self.loading += 1;
        let outcome = self.api.create_monitor(&request).await;
        self.loading = self.loading.saturating_sub(1);

        let monitor = outcome.map_err(|e| self.fail(e))?;
        info!(id = monitor.id, termo = %monitor.termo, "monitor created");
        self.notices
            .push(Notice::Success("Monitor created successfully.".to_string()));

        // the new monitor exists even if this reload fails; the error is
        // already queued as a notice
        let _ = self.enter_list().await;
        Ok(monitor)
    }

    /// Delete a monitor and reload the list, whatever the delete outcome.
    /// The current view is left as it is.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        if !matches!(self.view, View::List | View::Details(_)) {
            return Err(self.invalid("delete a monitor"));
        }

        self.loading += 1;
        let outcome = self.api.delete_monitor(id).await;
        self.loading = self.loading.saturating_sub(1);

        let outcome = match outcome {
            Ok(()) => {
                info!(id, "monitor deleted");
                self.notices
                    .push(Notice::Success("Monitor deleted successfully.".to_string()));
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        };

        let reloaded = self.reload().await;
        outcome.and(reloaded)
    }

    /// Return to the list from any other view
    pub async fn back(&mut self) -> Result<()> {
        if self.view == View::List {
            return Ok(());
        }
        self.enter_list().await
    }
}
