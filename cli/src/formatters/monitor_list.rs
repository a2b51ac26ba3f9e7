use std::io;

use chrono::NaiveDate;
use termcolor::{ColorSpec, WriteColor};
use vigia_core::{filter_by_creation_date, format_date, Monitor};

use super::{dimmed, field, heading, join_or};

/// Monitor collection with its loading flags and an optional creation-day filter
pub struct MonitorListView<'a> {
    pub monitors: &'a [Monitor],
    pub loading: bool,
    pub loading_results: bool,
    pub date: Option<NaiveDate>,
}

impl<'a> MonitorListView<'a> {
    pub fn new(monitors: &'a [Monitor]) -> Self {
        Self {
            monitors,
            loading: false,
            loading_results: false,
            date: None,
        }
    }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    /// Monitors left after the date filter
    pub fn visible(&self) -> Vec<&'a Monitor> {
        filter_by_creation_date(self.monitors, self.date)
    }

    pub fn render(&self, out: &mut dyn WriteColor) -> io::Result<()> {
        if self.loading {
            return dimmed(out, "Loading monitors...");
        }

        if self.monitors.is_empty() {
            heading(out, "No monitors found")?;
            writeln!(out, "Create your first monitor to follow new cases:")?;
            writeln!(out, "  vigia create <TERM>")?;
            return Ok(());
        }

        let visible = self.visible();

        match self.date {
            Some(day) if visible.is_empty() => {
                return dimmed(
                    out,
                    &format!("No monitors created on {}", day.format("%d/%m/%Y")),
                );
            }
            Some(day) => heading(
                out,
                &format!(
                    "Your monitors ({} of {}, created on {})",
                    visible.len(),
                    self.monitors.len(),
                    day.format("%d/%m/%Y")
                ),
            )?,
            None => heading(out, &format!("Your monitors ({})", visible.len()))?,
        }

        for monitor in visible {
            writeln!(out)?;
            self.render_monitor(out, monitor)?;
        }

        Ok(())
    }

    fn render_monitor(&self, out: &mut dyn WriteColor, monitor: &Monitor) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "#{}", monitor.id)?;
        out.reset()?;
        writeln!(out, " {}", monitor.termo)?;

        field(out, "Variations", &join_or(&monitor.variacoes, "None"))?;
        field(out, "Courts", &join_or(&monitor.tribunais_especificos, "All"))?;
        field(out, "Created on", &format_date(&monitor.criado_em))?;

        let results = if self.loading_results {
            "results (loading...)".to_string()
        } else {
            format!("vigia results {}", monitor.id)
        };
        dimmed(
            out,
            &format!(
                "  vigia show {} | {} | vigia delete {}",
                monitor.id, results, monitor.id
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::{Local, TimeZone};
    use vigia_core::AuxiliaryTermMap;

    use super::*;
    use crate::formatters::render_plain;

    fn monitor(id: i64, termo: &str, criado_em: String) -> Monitor {
        Monitor {
            id,
            termo: termo.to_string(),
            tipo: None,
            criado_em,
            variacoes: vec![],
            termos_auxiliares: AuxiliaryTermMap::default(),
            tribunais_especificos: vec![],
        }
    }

    fn created(d: u32) -> String {
        Local
            .with_ymd_and_hms(2024, 3, d, 12, 0, 0)
            .unwrap()
            .to_rfc3339()
    }

    #[test]
    fn test_empty_state_has_call_to_action() {
        let text = render_plain(|out| MonitorListView::new(&[]).render(out));

        assert!(text.contains("No monitors found"));
        assert!(text.contains("vigia create <TERM>"));
        assert!(!text.contains("Error"));
    }

    #[test]
    fn test_loading_state() {
        let monitors = vec![monitor(1, "Maria", created(5))];
        let view = MonitorListView {
            loading: true,
            ..MonitorListView::new(&monitors)
        };

        let text = render_plain(|out| view.render(out));

        assert_eq!(text, "Loading monitors...\n");
    }

    #[test]
    fn test_renders_monitors_with_actions() {
        let mut maria = monitor(1, "Maria Silva", created(5));
        maria.variacoes = vec!["M. Silva".to_string(), "Maria S.".to_string()];
        maria.tribunais_especificos = vec!["TJSP".to_string()];
        let monitors = vec![maria, monitor(2, "João", created(6))];

        let text = render_plain(|out| MonitorListView::new(&monitors).render(out));

        assert!(text.starts_with("Your monitors (2)\n"));
        assert!(text.contains("#1 Maria Silva"));
        assert!(text.contains("  Variations: M. Silva, Maria S."));
        assert!(text.contains("  Courts: TJSP"));
        assert!(text.contains("  Created on: 05/03/2024"));
        assert!(text.contains("  Variations: None"));
        assert!(text.contains("  Courts: All"));
        assert!(text.contains("vigia show 2 | vigia results 2 | vigia delete 2"));
    }

    #[test]
    fn test_date_filter_narrows_display_only() {
        let monitors = vec![
            monitor(1, "Maria", created(5)),
            monitor(2, "João", created(6)),
        ];
        let view = MonitorListView::new(&monitors)
            .with_date(NaiveDate::from_ymd_opt(2024, 3, 6));

        let text = render_plain(|out| view.render(out));

        assert!(text.starts_with("Your monitors (1 of 2, created on 06/03/2024)"));
        assert!(text.contains("#2 João"));
        assert!(!text.contains("#1 Maria"));
        assert_eq!(monitors.len(), 2);
    }

    #[test]
    fn test_date_filter_without_matches() {
        let monitors = vec![monitor(1, "Maria", created(5))];
        let view = MonitorListView::new(&monitors)
            .with_date(NaiveDate::from_ymd_opt(2024, 3, 7));

        let text = render_plain(|out| view.render(out));

        assert_eq!(text, "No monitors created on 07/03/2024\n");
    }
}
