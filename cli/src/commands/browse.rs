use anyhow::Context;
use chrono::NaiveDate;
use cliclack::{input, select};
use vigia_core::{format_date, navigate_to_case, CaseAction, FoundCase, Monitor, MonitorForm, View};

use crate::{
    args::OutputFormat,
    formatters::{stdout_for, FormPreview, FoundCasesView, MonitorDetailsView, MonitorListView},
    prompts::{confirm_delete, log_notices, read_form, with_spinner},
    utils::date_filter::DateFilter,
};

use super::{open::follow_link, MonitorSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListAction {
    New,
    Details,
    Results,
    Delete,
    FilterDate,
    Refresh,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailsAction {
    Results,
    Delete,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormAction {
    Submit,
    Edit,
    Cancel,
}

/// Interactive walk through the list, create, details and results views
pub async fn browse_cmd(session: &mut MonitorSession, web_url: &str) -> anyhow::Result<()> {
    cliclack::intro("vigia")?;

    let outcome = with_spinner("Loading monitors", session.enter_list()).await;
    settle(session, outcome)?;

    let mut date: Option<NaiveDate> = None;
    loop {
        let step = match session.view().clone() {
            View::List => list_step(session, &mut date).await?,
            View::Create => create_step(session).await?,
            View::Details(monitor) => details_step(session, &monitor).await?,
            View::Results { cases, .. } => results_step(session, &cases, web_url).await?,
        };

        if step == Step::Quit {
            break;
        }
    }

    cliclack::outro("See you")?;
    Ok(())
}

/// Show queued notices, plus the error itself when nothing was queued for it
fn settle(session: &mut MonitorSession, outcome: vigia_core::Result<()>) -> anyhow::Result<()> {
    let notices = session.take_notices();
    let queued = !notices.is_empty();
    log_notices(notices)?;

    if let Err(e) = outcome {
        if !queued {
            cliclack::log::error(e.to_string())?;
        }
    }
    Ok(())
}

/// Delete and report. The view stays where it was; the list is reloaded.
async fn delete_monitor(session: &mut MonitorSession, id: i64) -> anyhow::Result<()> {
    let outcome = with_spinner("Deleting monitor", session.delete(id)).await;
    settle(session, outcome)
}

fn pick_monitor(prompt: &str, monitors: &[&Monitor]) -> anyhow::Result<i64> {
    let mut choice = select(prompt);
    for monitor in monitors {
        choice = choice.item(
            monitor.id,
            format!("#{} {}", monitor.id, monitor.termo),
            format_date(&monitor.criado_em),
        );
    }
    choice.interact().context("Couldn't read monitor")
}

fn read_date() -> anyhow::Result<Option<NaiveDate>> {
    let value: String = input("Created on (today, yesterday, dd/mm/yyyy; blank shows all)")
        .required(false)
        .validate(|value: &String| {
            if value.trim().is_empty() {
                return Ok(());
            }
            value
                .trim()
                .parse::<DateFilter>()
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact()
        .context("Couldn't read date")?;

    if value.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(value.trim().parse::<DateFilter>()?.to_day()))
}

async fn list_step(
    session: &mut MonitorSession,
    date: &mut Option<NaiveDate>,
) -> anyhow::Result<Step> {
    let view = MonitorListView {
        loading: session.is_loading(),
        loading_results: session.is_loading_results(),
        ..MonitorListView::new(session.monitors())
    }
    .with_date(*date);
    view.render(&mut stdout_for(&OutputFormat::Pretty))?;
    let visible = view.visible();

    let mut menu = select("What next?").item(ListAction::New, "New monitor", "");
    if !visible.is_empty() {
        menu = menu
            .item(ListAction::Details, "Show details", "")
            .item(ListAction::Results, "Show results", "")
            .item(ListAction::Delete, "Delete a monitor", "");
    }
    let action = menu
        .item(ListAction::FilterDate, "Filter by creation date", "")
        .item(ListAction::Refresh, "Refresh", "")
        .item(ListAction::Quit, "Quit", "")
        .interact()
        .context("Couldn't read action")?;

    match action {
        ListAction::New => {
            let outcome = session.new_monitor();
            settle(session, outcome)?;
        }
        ListAction::Details => {
            let id = pick_monitor("Which monitor?", &visible)?;
            let outcome = session.select(id);
            settle(session, outcome)?;
        }
        ListAction::Results => {
            let id = pick_monitor("Results of which monitor?", &visible)?;
            let outcome = with_spinner("Loading results", session.request_results(id)).await;
            settle(session, outcome)?;
        }
        ListAction::Delete => {
            let id = pick_monitor("Delete which monitor?", &visible)?;
            if confirm_delete(id)? {
                delete_monitor(session, id).await?;
            }
        }
        ListAction::FilterDate => *date = read_date()?,
        ListAction::Refresh => {
            let outcome = with_spinner("Loading monitors", session.reload()).await;
            settle(session, outcome)?;
        }
        ListAction::Quit => return Ok(Step::Quit),
    }

    Ok(Step::Continue)
}

async fn create_step(session: &mut MonitorSession) -> anyhow::Result<Step> {
    let mut form = MonitorForm::default();

    loop {
        form = read_form(form)?;

        match form.to_request() {
            Ok(request) => {
                FormPreview { request: &request }.render(&mut stdout_for(&OutputFormat::Pretty))?
            }
            Err(e) => cliclack::log::warning(e.to_string())?,
        }

        let action = select("Create this monitor?")
            .item(FormAction::Submit, "Create", "")
            .item(FormAction::Edit, "Keep editing", "")
            .item(FormAction::Cancel, "Cancel", "back to the list")
            .interact()
            .context("Couldn't read action")?;

        match action {
            FormAction::Submit => {
                let outcome = with_spinner("Creating monitor", session.submit_create(&form))
                    .await
                    .map(|_| ());
                settle(session, outcome)?;
                if *session.view() != View::Create {
                    return Ok(Step::Continue);
                }
            }
            FormAction::Edit => {}
            FormAction::Cancel => {
                let outcome = with_spinner("Loading monitors", session.back()).await;
                settle(session, outcome)?;
                return Ok(Step::Continue);
            }
        }
    }
}

async fn details_step(session: &mut MonitorSession, monitor: &Monitor) -> anyhow::Result<Step> {
    MonitorDetailsView {
        loading: session.is_loading(),
        loading_results: session.is_loading_results(),
        ..MonitorDetailsView::new(monitor)
    }
    .render(&mut stdout_for(&OutputFormat::Pretty))?;

    let action = select("What next?")
        .item(DetailsAction::Results, "Show results", "")
        .item(DetailsAction::Delete, "Delete", "")
        .item(DetailsAction::Back, "Back", "")
        .interact()
        .context("Couldn't read action")?;

    match action {
        DetailsAction::Results => {
            let outcome =
                with_spinner("Loading results", session.request_results(monitor.id)).await;
            settle(session, outcome)?;
        }
        DetailsAction::Delete => {
            if confirm_delete(monitor.id)? {
                delete_monitor(session, monitor.id).await?;
            }
        }
        DetailsAction::Back => {
            let outcome = with_spinner("Loading monitors", session.back()).await;
            settle(session, outcome)?;
        }
    }

    Ok(Step::Continue)
}

async fn results_step(
    session: &mut MonitorSession,
    cases: &[FoundCase],
    web_url: &str,
) -> anyhow::Result<Step> {
    FoundCasesView {
        loading_results: session.is_loading_results(),
        ..FoundCasesView::new(cases, web_url)
    }
    .render(&mut stdout_for(&OutputFormat::Pretty))?;

    let mut menu = select("Open a case?").item(None, "Back", "");
    for (index, case) in cases.iter().enumerate() {
        menu = menu.item(
            Some(index),
            format!("{}. {}", index + 1, case.numero_cnj),
            &case.tribunal,
        );
    }
    let picked = menu.interact().context("Couldn't read case")?;

    let Some(index) = picked else {
        let outcome = with_spinner("Loading monitors", session.back()).await;
        settle(session, outcome)?;
        return Ok(Step::Continue);
    };

    let Some(case) = cases.get(index) else {
        return Ok(Step::Continue);
    };

    let action = select("Open")
        .item(CaseAction::Details, "Case details", "")
        .item(CaseAction::Movements, "Case movements", "")
        .interact()
        .context("Couldn't read link")?;

    let url = navigate_to_case(&case.numero_cnj, action).url(web_url);
    if let Err(e) = follow_link(&url, false) {
        cliclack::log::error(format!("{:#}", e))?;
    }

    Ok(Step::Continue)
}
