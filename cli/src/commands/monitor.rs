use std::future::Future;
use std::io::IsTerminal;

use anyhow::bail;
use vigia_core::{Condition, MonitorForm, Notice};

use crate::{
    args::{CreateArgs, DeleteArgs, ListArgs, OutputFormat, ShowArgs},
    formatters::{
        print_json, print_notices, stdout_for, FormPreview, FoundCasesView, MonitorDetailsView,
        MonitorListView,
    },
    prompts,
};

use super::MonitorSession;

/// Spinner only when a person is watching pretty output
async fn busy<F: Future>(format: &OutputFormat, message: &str, work: F) -> F::Output {
    if *format == OutputFormat::Pretty && std::io::stderr().is_terminal() {
        prompts::with_spinner(message, work).await
    } else {
        work.await
    }
}

/// Drain the notices and keep the successes for printing. Errors are
/// normally the command's own result; with `warn_errors` they are printed to
/// stderr here, for failures that do not fail the command (a reload after a
/// create).
fn take_successes(session: &mut MonitorSession, warn_errors: bool) -> Vec<Notice> {
    let (successes, errors): (Vec<Notice>, Vec<Notice>) = session
        .take_notices()
        .into_iter()
        .partition(|n| matches!(n, Notice::Success(_)));

    if warn_errors {
        for notice in errors {
            if let Notice::Error(msg) = notice {
                eprintln!("Warning: {}", msg);
            }
        }
    }
    successes
}

pub async fn list_cmd(session: &mut MonitorSession, args: ListArgs) -> anyhow::Result<()> {
    busy(&args.output, "Loading monitors", session.enter_list()).await?;

    let view = MonitorListView::new(session.monitors()).with_date(args.date.map(|d| d.to_day()));
    match args.output {
        OutputFormat::Json => print_json(&view.visible()),
        _ => Ok(view.render(&mut stdout_for(&args.output))?),
    }
}

pub async fn create_cmd(session: &mut MonitorSession, args: CreateArgs) -> anyhow::Result<()> {
    let mut form = MonitorForm::new(args.term.join(" "));
    for variation in args.variations {
        form.push_variation(variation);
    }
    for (condition, terms) in [
        (Condition::Contains, args.contains),
        (Condition::NotContains, args.not_contains),
        (Condition::ContainsAny, args.contains_any),
    ] {
        for term in terms {
            form.add_auxiliary_term(condition, term);
        }
    }
    for court in &args.courts {
        form.select_court(court)?;
    }

    if args.interactive {
        cliclack::intro("New monitor")?;
        form = prompts::read_form(form)?;

        if let Ok(request) = form.to_request() {
            FormPreview { request: &request }.render(&mut stdout_for(&args.output))?;
        }
        if !prompts::confirm_submit()? {
            cliclack::outro_cancel("Nothing was created")?;
            return Ok(());
        }
    }

    session.new_monitor()?;
    let created = busy(&args.output, "Creating monitor", session.submit_create(&form)).await?;

    let mut out = stdout_for(&args.output);
    match args.output {
        OutputFormat::Json => {
            take_successes(session, true);
            print_json(&created)
        }
        _ => {
            print_notices(&mut out, &take_successes(session, true))?;
            MonitorDetailsView::new(&created).render(&mut out)?;
            Ok(())
        }
    }
}

pub async fn show_cmd(session: &mut MonitorSession, args: ShowArgs) -> anyhow::Result<()> {
    busy(&args.output, "Loading monitors", session.enter_list()).await?;
    session.select(args.id)?;

    let Some(monitor) = session.selected() else {
        bail!("Monitor #{} is not available", args.id);
    };

    match args.output {
        OutputFormat::Json => print_json(monitor),
        _ => Ok(MonitorDetailsView::new(monitor).render(&mut stdout_for(&args.output))?),
    }
}

pub async fn results_cmd(
    session: &mut MonitorSession,
    args: ShowArgs,
    web_url: &str,
) -> anyhow::Result<()> {
    busy(&args.output, "Loading results", session.request_results(args.id)).await?;

    let cases = session.results().unwrap_or_default();
    match args.output {
        OutputFormat::Json => print_json(cases),
        _ => Ok(FoundCasesView::new(cases, web_url).render(&mut stdout_for(&args.output))?),
    }
}

/// Delete a monitor, then show the reloaded list even when the delete failed
pub async fn delete_cmd(session: &mut MonitorSession, args: DeleteArgs) -> anyhow::Result<()> {
    if !args.yes {
        if !std::io::stdin().is_terminal() {
            bail!("Refusing to delete monitor #{} without confirmation, pass --yes", args.id);
        }
        if !prompts::confirm_delete(args.id)? {
            return Ok(());
        }
    }

    let outcome = busy(&args.output, "Deleting monitor", session.delete(args.id)).await;

    if session.is_listed() {
        if args.output == OutputFormat::Json {
            print_json(&MonitorListView::new(session.monitors()).visible())?;
        } else {
            let mut out = stdout_for(&args.output);
            print_notices(&mut out, &take_successes(session, false))?;
            MonitorListView::new(session.monitors()).render(&mut out)?;
        }
    }

    Ok(outcome?)
}
