use serde::{Deserialize, Serialize};

use crate::{
    error::{MonitorError, Result},
    models::{AuxiliaryTerm, Condition, NewMonitorRequest},
};

/// Courts offered in the create form
pub const COURT_OPTIONS: [&str; 27] = [
    "TJSP", "TJRJ", "TJMG", "TJRS", "TJPR", "TJSC", "TJGO", "TJMS", "TJMT", "TJBA", "TJPE", "TJCE",
    "TJPB", "TJES", "TJRN", "TJAL", "TJSE", "TJPI", "TJMA", "TJPA", "TJAP", "TJAC", "TJRO", "TJRR",
    "TJAM", "TJTO", "TJDF",
];

pub const MISSING_TERM_MESSAGE: &str = "Please enter the main search term.";

/// Normalise a court code and check it is one of [`COURT_OPTIONS`]
pub fn parse_court(code: &str) -> Result<String> {
    let code = code.trim().to_uppercase();

    if COURT_OPTIONS.contains(&code.as_str()) {
        Ok(code)
    } else {
        Err(MonitorError::Validation(format!(
            "Unknown court '{}'. Expected one of: {}",
            code,
            COURT_OPTIONS.join(", ")
        )))
    }
}

/// Editable state of the create-monitor form.
///
/// The variation list always has at least one row, possibly blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorForm {
    pub termo: String,
    variacoes: Vec<String>,
    termos_auxiliares: Vec<AuxiliaryTerm>,
    tribunais: Vec<String>,
}

impl Default for MonitorForm {
    fn default() -> Self {
        MonitorForm {
            termo: String::new(),
            variacoes: vec![String::new()],
            termos_auxiliares: vec![],
            tribunais: vec![],
        }
    }
}

impl MonitorForm {
    pub fn new(termo: impl Into<String>) -> Self {
        MonitorForm {
            termo: termo.into(),
            ..Default::default()
        }
    }

    pub fn variations(&self) -> &[String] {
        &self.variacoes
    }

    pub fn auxiliary_terms(&self) -> &[AuxiliaryTerm] {
        &self.termos_auxiliares
    }

    pub fn courts(&self) -> &[String] {
        &self.tribunais
    }

    /// Append an empty variation row
    pub fn add_variation(&mut self) {
        self.variacoes.push(String::new());
    }

    /// Fill the trailing blank row if there is one, otherwise append
    pub fn push_variation(&mut self, value: impl Into<String>) {
        let value = value.into();
        match self.variacoes.last_mut() {
            Some(last) if last.is_empty() => *last = value,
            _ => self.variacoes.push(value),
        }
    }

    pub fn set_variation(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.variacoes.get_mut(index) {
            Some(row) => {
                *row = value.into();
                true
            }
            None => false,
        }
    }

    /// Remove a variation row; the last remaining row is never removed
    pub fn remove_variation(&mut self, index: usize) -> bool {
        if self.variacoes.len() <= 1 || index >= self.variacoes.len() {
            return false;
        }
        self.variacoes.remove(index);
        true
    }

    pub fn add_auxiliary_term(&mut self, condicao: Condition, termo: impl Into<String>) {
        self.termos_auxiliares.push(AuxiliaryTerm::new(condicao, termo));
    }

    pub fn set_auxiliary_term(
        &mut self,
        index: usize,
        condicao: Condition,
        termo: impl Into<String>,
    ) -> bool {
        match self.termos_auxiliares.get_mut(index) {
            Some(row) => {
                *row = AuxiliaryTerm::new(condicao, termo);
                true
            }
            None => false,
        }
    }

    pub fn remove_auxiliary_term(&mut self, index: usize) -> bool {
        if index >= self.termos_auxiliares.len() {
            return false;
        }
        self.termos_auxiliares.remove(index);
        true
    }

    /// Flip a court in the selection grid. Returns whether it is now selected.
    pub fn toggle_court(&mut self, code: &str) -> Result<bool> {
        let code = parse_court(code)?;

        if let Some(pos) = self.tribunais.iter().position(|c| *c == code) {
            self.tribunais.remove(pos);
            Ok(false)
        } else {
            self.tribunais.push(code);
            Ok(true)
        }
    }

    pub fn select_court(&mut self, code: &str) -> Result<()> {
        let code = parse_court(code)?;
        if !self.tribunais.contains(&code) {
            self.tribunais.push(code);
        }
        Ok(())
    }

    /// Assemble the request body.
    ///
    /// The term is trimmed and must not be blank; variations that are blank
    /// after trimming are dropped. Auxiliary rows and courts pass through.
    pub fn to_request(&self) -> Result<NewMonitorRequest> {
        let termo = self.termo.trim();
        if termo.is_empty() {
            return Err(MonitorError::Validation(MISSING_TERM_MESSAGE.to_string()));
        }

        Ok(NewMonitorRequest {
            termo: termo.to_string(),
            variacoes: self
                .variacoes
                .iter()
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .collect(),
            termos_auxiliares: self.termos_auxiliares.clone(),
            tribunais: self.tribunais.clone(),
        })
    }
}
