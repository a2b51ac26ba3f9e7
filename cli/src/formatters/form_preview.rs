use std::io;

use termcolor::WriteColor;
use vigia_core::{group_auxiliary_terms, Condition, NewMonitorRequest};

use super::{field, heading, join_or};

/// Summary of a pending create request, auxiliary terms grouped by condition
pub struct FormPreview<'a> {
    pub request: &'a NewMonitorRequest,
}

impl FormPreview<'_> {
    pub fn render(&self, out: &mut dyn WriteColor) -> io::Result<()> {
        let request = self.request;

        heading(out, "New monitor")?;
        field(out, "Term", &request.termo)?;
        field(out, "Variations", &join_or(&request.variacoes, "None"))?;
        field(out, "Courts", &join_or(&request.tribunais, "All"))?;

        let grouped = group_auxiliary_terms(&request.termos_auxiliares);
        for condition in Condition::ALL {
            if let Some(terms) = grouped.get(condition) {
                writeln!(out, "  [{}] {}", condition, terms.join(", "))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use vigia_core::AuxiliaryTerm;

    use super::*;
    use crate::formatters::render_plain;

    #[test]
    fn test_preview_groups_auxiliary_terms() {
        let request = NewMonitorRequest {
            termo: "João".to_string(),
            variacoes: vec!["João".to_string()],
            termos_auxiliares: vec![
                AuxiliaryTerm::new(Condition::NotContains, "espólio"),
                AuxiliaryTerm::new(Condition::Contains, "ltda"),
                AuxiliaryTerm::new(Condition::NotContains, "arquivado"),
            ],
            tribunais: vec![],
        };

        let text = render_plain(|out| FormPreview { request: &request }.render(out));

        assert_eq!(
            text,
            "New monitor\n  Term: João\n  Variations: João\n  Courts: All\n  [contains] ltda\n  [does not contain] espólio, arquivado\n"
        );
    }
}
