use std::io::{self, IsTerminal, Write};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use vigia_core::Notice;

use crate::args::OutputFormat;

mod form_preview;
mod found_cases;
mod monitor_details;
mod monitor_list;

pub use form_preview::FormPreview;
pub use found_cases::FoundCasesView;
pub use monitor_details::MonitorDetailsView;
pub use monitor_list::MonitorListView;

/// Stdout with colours only for pretty output on a terminal
pub fn stdout_for(format: &OutputFormat) -> StandardStream {
    let choice = match format {
        OutputFormat::Pretty if io::stdout().is_terminal() => ColorChoice::Auto,
        _ => ColorChoice::Never,
    };
    StandardStream::stdout(choice)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_notices(out: &mut dyn WriteColor, notices: &[Notice]) -> io::Result<()> {
    for notice in notices {
        match notice {
            Notice::Success(msg) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                writeln!(out, "{}", msg)?;
            }
            Notice::Error(msg) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                writeln!(out, "Error: {}", msg)?;
            }
        }
        out.reset()?;
    }
    Ok(())
}

pub(crate) fn heading(out: &mut dyn WriteColor, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true).set_fg(Some(Color::Blue)))?;
    writeln!(out, "{}", text)?;
    out.reset()
}

pub(crate) fn field(out: &mut dyn WriteColor, label: &str, value: &str) -> io::Result<()> {
    write!(out, "  ")?;
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "{}:", label)?;
    out.reset()?;
    writeln!(out, " {}", value)
}

pub(crate) fn dimmed(out: &mut dyn WriteColor, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_dimmed(true))?;
    writeln!(out, "{}", text)?;
    out.reset()
}

/// `items` joined with commas, or `empty` when there are none
pub(crate) fn join_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
pub(crate) fn render_plain(
    render: impl FnOnce(&mut dyn WriteColor) -> io::Result<()>,
) -> String {
    #![allow(clippy::unwrap_used)]

    let mut buffer = termcolor::Buffer::no_color();
    render(&mut buffer).unwrap();
    String::from_utf8(buffer.into_inner()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_notices() {
        let text = render_plain(|out| {
            print_notices(
                out,
                &[
                    Notice::Success("Monitor deleted successfully.".to_string()),
                    Notice::Error("not found".to_string()),
                ],
            )
        });

        assert_eq!(text, "Monitor deleted successfully.\nError: not found\n");
    }

    #[test]
    fn test_join_or() {
        assert_eq!(join_or(&[], "None"), "None");
        assert_eq!(join_or(&["a".to_string(), "b".to_string()], "None"), "a, b");
    }
}
