use std::io;

use termcolor::{ColorSpec, WriteColor};
use vigia_core::{format_date, navigate_to_case, strip_html, CaseAction, FoundCase};

use super::{dimmed, field, heading};

/// Result set of a monitor. Rows are numbered by position; case numbers may repeat.
pub struct FoundCasesView<'a> {
    pub cases: &'a [FoundCase],
    pub loading_results: bool,
    pub web_url: &'a str,
}

impl<'a> FoundCasesView<'a> {
    pub fn new(cases: &'a [FoundCase], web_url: &'a str) -> Self {
        Self {
            cases,
            loading_results: false,
            web_url,
        }
    }

    pub fn render(&self, out: &mut dyn WriteColor) -> io::Result<()> {
        if self.loading_results {
            return dimmed(out, "Loading results...");
        }

        if self.cases.is_empty() {
            heading(out, "No cases found")?;
            writeln!(out, "This monitor has not found any new cases yet")?;
            return Ok(());
        }

        heading(out, &format!("Found cases ({})", self.cases.len()))?;

        for (index, case) in self.cases.iter().enumerate() {
            writeln!(out)?;
            out.set_color(ColorSpec::new().set_bold(true))?;
            writeln!(out, "{}. {}", index + 1, case.numero_cnj)?;
            out.reset()?;

            field(out, "Court", &case.tribunal)?;
            field(
                out,
                "State",
                &format!("{} ({})", case.estado_origem.nome, case.estado_origem.sigla),
            )?;
            field(out, "Start date", &format_date(&case.data_inicio))?;
            field(out, "Content", &strip_html(&case.match_html))?;

            let details = navigate_to_case(&case.numero_cnj, CaseAction::Details);
            let movements = navigate_to_case(&case.numero_cnj, CaseAction::Movements);
            dimmed(out, &format!("  Details: {}", details.url(self.web_url)))?;
            dimmed(out, &format!("  Movements: {}", movements.url(self.web_url)))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use vigia_core::OriginState;

    use super::*;
    use crate::formatters::render_plain;

    fn case(cnj: &str) -> FoundCase {
        FoundCase {
            numero_cnj: cnj.to_string(),
            data_inicio: "2024-02-01".to_string(),
            tribunal: "TJSP".to_string(),
            match_html: "<b>Maria</b> Silva".to_string(),
            estado_origem: OriginState {
                nome: "São Paulo".to_string(),
                sigla: "SP".to_string(),
            },
        }
    }

    #[test]
    fn test_empty_results() {
        let text = render_plain(|out| FoundCasesView::new(&[], "http://web").render(out));

        assert_eq!(
            text,
            "No cases found\nThis monitor has not found any new cases yet\n"
        );
    }

    #[test]
    fn test_loading_results() {
        let cases = vec![case("1")];
        let view = FoundCasesView {
            loading_results: true,
            ..FoundCasesView::new(&cases, "http://web")
        };

        assert_eq!(render_plain(|out| view.render(out)), "Loading results...\n");
    }

    #[test]
    fn test_rows_strip_html_and_link_to_case() {
        let cnj = "0000001-02.2024.8.26.0100";
        let cases = vec![case(cnj), case(cnj)];

        let text = render_plain(|out| FoundCasesView::new(&cases, "http://web/").render(out));

        assert!(text.starts_with("Found cases (2)\n"));
        assert!(text.contains(&format!("1. {}\n", cnj)));
        assert!(text.contains(&format!("2. {}\n", cnj)));
        assert!(text.contains("  State: São Paulo (SP)"));
        assert!(text.contains("  Start date: 01/02/2024"));
        assert!(text.contains("  Content: Maria Silva\n"));
        assert!(text.contains(&format!(
            "  Details: http://web/detalhes-processo?numero={}",
            cnj
        )));
        assert!(text.contains(&format!(
            "  Movements: http://web/movimentacoes?numero={}",
            cnj
        )));
    }
}
