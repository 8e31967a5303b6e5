//! Terminal setup and drawing.

use std::io::{self, Write};

use crossterm::{
    cursor, event, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
};
use treeview::{TreeRow, TreeSize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;

/// Lines above the first tree row when the label is shown.
const HEADER_LINES: u16 = 2;
/// Lines below the tree (status + help).
const FOOTER_LINES: u16 = 2;

const HELP: &str = "arrows move  enter/space select  ctrl+a all  shift+ctrl+home/end range  * expand  - collapse  q quit";

/// Raw-mode alternate screen, restored on drop.
pub struct Terminal {
    stdout: io::Stdout,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        crossterm::execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        Ok(Self { stdout })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Draw the whole frame.
    pub fn draw(&mut self, app: &mut App) -> io::Result<()> {
        let (width, height) = self.size()?;
        let top = header_lines(app);
        let viewport = height.saturating_sub(top + FOOTER_LINES) as usize;
        app.scroll_to_focus(viewport);

        queue!(self.stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;

        if top > 0 {
            queue!(
                self.stdout,
                SetAttribute(Attribute::Bold),
                Print(truncate(&app.tree.config().label, width)),
                SetAttribute(Attribute::Reset)
            )?;
        }

        let rows = app.tree.rows();
        let compact = app.tree.config().size == TreeSize::Xs;
        for (line, row) in rows.iter().skip(app.scroll).take(viewport).enumerate() {
            let focused = app.focus.as_ref() == Some(&row.id);
            queue!(self.stdout, cursor::MoveTo(0, top + line as u16))?;
            if row.disabled {
                queue!(self.stdout, SetAttribute(Attribute::Dim))?;
            }
            if focused {
                queue!(self.stdout, SetAttribute(Attribute::Reverse))?;
            }
            queue!(
                self.stdout,
                Print(truncate(&format_row(row, compact), width)),
                SetAttribute(Attribute::Reset)
            )?;
        }

        let status_y = height.saturating_sub(FOOTER_LINES);
        queue!(
            self.stdout,
            cursor::MoveTo(0, status_y),
            Print(truncate(&app.tree.listener().message, width)),
            cursor::MoveTo(0, status_y + 1),
            SetAttribute(Attribute::Dim),
            Print(truncate(HELP, width)),
            SetAttribute(Attribute::Reset)
        )?;

        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = crossterm::execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Lines taken by the label, zero when it is hidden.
pub fn header_lines(app: &App) -> u16 {
    if app.tree.config().hide_label || app.tree.config().label.is_empty() {
        0
    } else {
        HEADER_LINES
    }
}

/// Map a screen line to a row index, accounting for header and scroll.
pub fn row_at(app: &App, y: u16) -> Option<usize> {
    let top = header_lines(app);
    let line = y.checked_sub(top)? as usize;
    Some(app.scroll + line)
}

fn format_row(row: &TreeRow, compact: bool) -> String {
    let indent = if compact { 1 } else { 2 };
    let twisty = match (row.has_children, row.expanded) {
        (false, _) => ' ',
        (true, true) => 'v',
        (true, false) => '>',
    };
    let check = if row.selected { "[x]" } else { "[ ]" };
    let active = if row.active { " *" } else { "" };
    format!(
        "{:width$}{} {} {}{}",
        "",
        twisty,
        check,
        row.label,
        active,
        width = row.depth * indent
    )
}

/// Cut `text` to `width` terminal cells, marking the cut with an ellipsis.
fn truncate(text: &str, width: u16) -> String {
    let max = width as usize;
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let budget = max - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use treeview::NodeId;

    use super::*;

    fn row(depth: usize) -> TreeRow {
        TreeRow {
            id: NodeId::from("x"),
            label: "lib.rs".to_string(),
            depth,
            has_children: false,
            expanded: false,
            disabled: false,
            selected: true,
            active: true,
        }
    }

    #[test]
    fn test_format_row_indents_by_depth() {
        assert_eq!(format_row(&row(0), false), "  [x] lib.rs *");
        assert_eq!(format_row(&row(2), false), "      [x] lib.rs *");
        assert_eq!(format_row(&row(2), true), "    [x] lib.rs *");
    }

    #[test]
    fn test_format_row_twisty() {
        let mut parent = row(0);
        parent.has_children = true;
        parent.selected = false;
        parent.active = false;
        assert_eq!(format_row(&parent, false), "> [ ] lib.rs");
        parent.expanded = true;
        assert_eq!(format_row(&parent, false), "v [ ] lib.rs");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "ab…");
        assert_eq!(truncate("ab", 10), "ab");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        assert_eq!(truncate("日本語", 4), "日…");
        assert_eq!(truncate("日本語", 6), "日本語");
    }
}
