use std::io;

use termcolor::{Color, ColorSpec, WriteColor};
use vigia_core::{flatten_auxiliary_terms, format_date, Monitor};

use super::{dimmed, field, heading};

pub struct MonitorDetailsView<'a> {
    pub monitor: &'a Monitor,
    pub loading: bool,
    pub loading_results: bool,
}

impl<'a> MonitorDetailsView<'a> {
    pub fn new(monitor: &'a Monitor) -> Self {
        Self {
            monitor,
            loading: false,
            loading_results: false,
        }
    }

    pub fn render(&self, out: &mut dyn WriteColor) -> io::Result<()> {
        let monitor = self.monitor;

        heading(out, &monitor.termo)?;
        field(out, "ID", &monitor.id.to_string())?;
        if let Some(tipo) = &monitor.tipo {
            field(out, "Type", tipo)?;
        }
        field(out, "Created on", &format_date(&monitor.criado_em))?;

        writeln!(out)?;
        writeln!(out, "Variations")?;
        if monitor.variacoes.is_empty() {
            writeln!(out, "  - None")?;
        }
        for variation in &monitor.variacoes {
            writeln!(out, "  - {}", variation)?;
        }

        writeln!(out)?;
        writeln!(out, "Courts")?;
        if monitor.tribunais_especificos.is_empty() {
            writeln!(out, "  All courts")?;
        } else {
            writeln!(out, "  {}", monitor.tribunais_especificos.join(" "))?;
        }

        let auxiliary = flatten_auxiliary_terms(Some(&monitor.termos_auxiliares));
        if !auxiliary.is_empty() {
            writeln!(out)?;
            writeln!(out, "Auxiliary terms")?;
            for term in auxiliary {
                write!(out, "  ")?;
                out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
                write!(out, "[{}]", term.condicao)?;
                out.reset()?;
                writeln!(out, " {}", term.termo)?;
            }
        }

        writeln!(out)?;
        let results = if self.loading_results {
            "results (loading...)".to_string()
        } else {
            format!("vigia results {}", monitor.id)
        };
        let delete = if self.loading {
            "delete (busy...)".to_string()
        } else {
            format!("vigia delete {}", monitor.id)
        };
        dimmed(out, &format!("{} | {}", results, delete))
    }
}
