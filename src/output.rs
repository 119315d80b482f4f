//! Output formatting for decoded clauses

use crate::search::SearchClause;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print clauses one per line: connective, kind, property, comparator, value
pub fn print_clauses(clauses: &[SearchClause], color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_clauses(&mut stdout, clauses)
}

/// Write the clause listing to any color-aware writer
pub fn write_clauses<W: WriteColor>(out: &mut W, clauses: &[SearchClause]) -> io::Result<()> {
    for (i, clause) in clauses.iter().enumerate() {
        // First connective is meaningless and shown blank
        if i == 0 {
            write!(out, "{:<4}", "")?;
        } else {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
            write!(out, "{:<4}", clause.connective.to_string())?;
            out.reset()?;
        }

        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{:<17}", clause.kind.to_string())?;
        out.reset()?;

        write!(out, "{} ", clause.property)?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", clause.comparator)?;
        out.reset()?;

        if let Some(value) = clause.value() {
            write!(out, " {}", value)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Print clauses as a pretty JSON array
pub fn print_clauses_json(clauses: &[SearchClause]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, clauses)?;
    writeln!(lock)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{ClauseKind, Comparator};
    use termcolor::NoColor;

    #[test]
    fn test_plain_listing() {
        let clauses = vec![
            SearchClause::new(ClauseKind::GroupMembership, "admins", Comparator::Equals),
            SearchClause::attribute("email", Comparator::Equals).with_value("x").or(),
        ];
        let mut out = NoColor::new(Vec::new());
        write_clauses(&mut out, &clauses).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "    GROUP_MEMBERSHIP admins EQUALS");
        assert_eq!(lines[1], "OR  ATTRIBUTE        email EQUALS x");
    }
}
