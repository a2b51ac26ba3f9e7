use std::future::Future;

use anyhow::Context;
use cliclack::{confirm, input, multiselect, select};
use vigia_core::{Condition, MonitorForm, Notice, COURT_OPTIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormEdit {
    Term,
    AddVariation,
    Variation(usize),
    AddAuxiliary,
    Auxiliary(usize),
    Courts,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowEdit {
    Change,
    Remove,
    Keep,
}

/// Edit a create form interactively, starting from `form`.
///
/// Every row already in the form can be changed or removed, and the court
/// selection is replaced by whatever is ticked in the grid.
pub fn read_form(mut form: MonitorForm) -> anyhow::Result<MonitorForm> {
    if form.termo.trim().is_empty() {
        form.termo = read_term(&form.termo)?;
    }

    loop {
        match form_menu(&form)? {
            FormEdit::Term => form.termo = read_term(&form.termo)?,
            FormEdit::AddVariation => {
                let variation = read_text("Term variation", "", "e.g. Joãozinho")?;
                form.push_variation(variation);
            }
            FormEdit::Variation(index) => match row_action("variation")? {
                RowEdit::Change => {
                    let current = form.variations().get(index).cloned().unwrap_or_default();
                    let variation = read_text("Term variation", &current, "e.g. Joãozinho")?;
                    form.set_variation(index, variation);
                }
                RowEdit::Remove => remove_variation_row(&mut form, index),
                RowEdit::Keep => {}
            },
            FormEdit::AddAuxiliary => {
                let condition = read_condition(None)?;
                let termo = read_text(&format!("Term that the result {}", condition), "", "")?;
                form.add_auxiliary_term(condition, termo);
            }
            FormEdit::Auxiliary(index) => match row_action("auxiliary term")? {
                RowEdit::Change => {
                    let Some(current) = form.auxiliary_terms().get(index).cloned() else {
                        continue;
                    };
                    let condition = read_condition(Some(current.condicao))?;
                    let termo = read_text(
                        &format!("Term that the result {}", condition),
                        &current.termo,
                        "",
                    )?;
                    form.set_auxiliary_term(index, condition, termo);
                }
                RowEdit::Remove => {
                    form.remove_auxiliary_term(index);
                }
                RowEdit::Keep => {}
            },
            FormEdit::Courts => {
                let selected = read_courts(form.courts())?;
                replace_courts(&mut form, &selected)?;
            }
            FormEdit::Done => return Ok(form),
        }
    }
}

fn form_menu(form: &MonitorForm) -> anyhow::Result<FormEdit> {
    let mut menu = select("Edit the monitor")
        .item(FormEdit::Done, "Done", "")
        .item(FormEdit::Term, "Main term", &form.termo)
        .item(FormEdit::AddVariation, "Add a variation", "");

    for (index, variation) in form.variations().iter().enumerate() {
        if !variation.trim().is_empty() {
            menu = menu.item(FormEdit::Variation(index), format!("Variation: {}", variation), "");
        }
    }

    menu = menu.item(FormEdit::AddAuxiliary, "Add an auxiliary term", "");
    for (index, term) in form.auxiliary_terms().iter().enumerate() {
        menu = menu.item(
            FormEdit::Auxiliary(index),
            format!("Auxiliary: [{}] {}", term.condicao, term.termo),
            "",
        );
    }

    let courts = if form.courts().is_empty() {
        "all courts".to_string()
    } else {
        form.courts().join(" ")
    };

    menu.item(FormEdit::Courts, "Courts", courts)
        .interact()
        .context("Couldn't read form action")
}

fn row_action(what: &str) -> anyhow::Result<RowEdit> {
    select(format!("This {}", what))
        .item(RowEdit::Change, "Change", "")
        .item(RowEdit::Remove, "Remove", "")
        .item(RowEdit::Keep, "Keep", "")
        .interact()
        .context("Couldn't read row action")
}

fn read_term(current: &str) -> anyhow::Result<String> {
    input("Main term")
        .placeholder("e.g. João da Silva")
        .default_input(current)
        .required(true)
        .interact()
        .context("Couldn't read the main term")
}

fn read_text(prompt: &str, current: &str, placeholder: &str) -> anyhow::Result<String> {
    input(prompt)
        .placeholder(placeholder)
        .default_input(current)
        .required(true)
        .interact()
        .with_context(|| format!("Couldn't read {}", prompt.to_lowercase()))
}

fn read_condition(current: Option<Condition>) -> anyhow::Result<Condition> {
    let mut choice = select("Condition")
        .item(Condition::Contains, "Contains", "results must mention it")
        .item(Condition::NotContains, "Does not contain", "results must not mention it")
        .item(Condition::ContainsAny, "Contains any", "at least one of these");
    if let Some(current) = current {
        choice = choice.initial_value(current);
    }
    choice
        .interact()
        .context("Couldn't read auxiliary term condition")
}

fn read_courts(current: &[String]) -> anyhow::Result<Vec<String>> {
    let mut courts = multiselect("Restrict to courts (none selected = all courts)").required(false);
    for court in COURT_OPTIONS {
        courts = courts.item(court.to_string(), court, "");
    }
    courts
        .initial_values(current.to_vec())
        .interact()
        .context("Couldn't read courts")
}

/// Removing the only variation row clears it instead
fn remove_variation_row(form: &mut MonitorForm, index: usize) {
    if !form.remove_variation(index) {
        form.set_variation(index, "");
    }
}

/// Make the form's court selection exactly `selected`
fn replace_courts(form: &mut MonitorForm, selected: &[String]) -> vigia_core::Result<()> {
    for code in COURT_OPTIONS {
        let wanted = selected.iter().any(|s| s == code);
        let current = form.courts().iter().any(|c| c == code);
        if wanted != current {
            form.toggle_court(code)?;
        }
    }
    Ok(())
}

pub fn confirm_submit() -> anyhow::Result<bool> {
    confirm("Create this monitor?")
        .initial_value(true)
        .interact()
        .context("Couldn't read confirmation")
}

pub fn confirm_delete(id: i64) -> anyhow::Result<bool> {
    confirm(format!("Delete monitor #{}?", id))
        .initial_value(false)
        .interact()
        .context("Couldn't read confirmation")
}

/// Run `work` behind a spinner
pub async fn with_spinner<F: Future>(message: &str, work: F) -> F::Output {
    let spinner = cliclack::spinner();
    spinner.start(message);
    let output = work.await;
    spinner.stop(message);
    output
}

pub fn log_notices(notices: Vec<Notice>) -> anyhow::Result<()> {
    for notice in notices {
        match notice {
            Notice::Success(msg) => cliclack::log::success(msg)?,
            Notice::Error(msg) => cliclack::log::error(msg)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_replace_courts_deselects_and_selects() {
        let mut form = MonitorForm::new("Maria");
        form.select_court("TJSP").unwrap();
        form.select_court("TJRJ").unwrap();

        replace_courts(&mut form, &["TJRJ".to_string(), "TJMG".to_string()]).unwrap();

        let mut courts = form.courts().to_vec();
        courts.sort();
        assert_eq!(courts, vec!["TJMG", "TJRJ"]);

        replace_courts(&mut form, &[]).unwrap();
        assert!(form.courts().is_empty());
    }

    #[test]
    fn test_remove_variation_row_keeps_one_row() {
        let mut form = MonitorForm::new("Maria");
        form.push_variation("M. Silva");
        form.add_variation();
        form.set_variation(1, "Maria S.");

        remove_variation_row(&mut form, 0);
        assert_eq!(form.variations(), ["Maria S."]);

        remove_variation_row(&mut form, 0);
        assert_eq!(form.variations(), [""]);
        assert!(form.to_request().unwrap().variacoes.is_empty());
    }
}
