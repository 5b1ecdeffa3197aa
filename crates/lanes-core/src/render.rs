use std::io::{self, IsTerminal, Write};

use lanes_model::{Column, Task, Theme};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

const MIN_SHORT_ID: usize = 8;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
    theme: Theme,
}

impl Renderer {
    /// Colour needs both the `color` setting and a terminal on stdout.
    pub fn new(cfg: &Config, theme: Theme) -> Self {
        let color = cfg.get_bool("color").unwrap_or(true);
        Self {
            color: color && io::stdout().is_terminal(),
            theme,
        }
    }

    /// Renderer that never emits escape codes.
    pub fn plain(theme: Theme) -> Self {
        Self { color: false, theme }
    }

    #[tracing::instrument(skip_all)]
    pub fn print_board(&self, columns: &[Column], all_ids: &[&str]) -> anyhow::Result<()> {
        let out = io::stdout().lock();
        self.write_board(out, columns, all_ids)
    }

    pub fn write_board<W: Write>(
        &self,
        mut out: W,
        columns: &[Column],
        all_ids: &[&str],
    ) -> anyhow::Result<()> {
        for (idx, column) in columns.iter().enumerate() {
            if idx > 0 {
                writeln!(out)?;
            }
            let heading = format!("{} ({})", column.stage.label(), column.count());
            writeln!(out, "{}", self.paint(&heading, self.heading_code()))?;

            if column.cards.is_empty() {
                writeln!(out, "  No tasks")?;
                continue;
            }

            let headers = vec![
                "ID".to_string(),
                "Title".to_string(),
                "Priority".to_string(),
                "Category".to_string(),
                "Due".to_string(),
                "Move".to_string(),
            ];

            let rows = column
                .cards
                .iter()
                .map(|card| {
                    let id = self.paint(&short_id(card.task.id.as_str(), all_ids), "33");
                    let due = if card.overdue {
                        self.paint(&card.due_label, "31")
                    } else {
                        card.due_label.clone()
                    };
                    let moves = match (card.can_move_previous, card.can_move_next) {
                        (true, true) => "← →",
                        (true, false) => "←",
                        (false, true) => "→",
                        (false, false) => "",
                    };
                    vec![
                        id,
                        card.task.title.clone(),
                        card.task.priority.clone(),
                        card.task.category.clone(),
                        due,
                        moves.to_string(),
                    ]
                })
                .collect();

            write_table(&mut out, headers, rows)?;
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, task))]
    pub fn print_task_info(&self, task: &Task) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        writeln!(out, "id          {}", task.id)?;
        writeln!(out, "title       {}", task.title)?;
        writeln!(out, "description {}", task.description_or_empty())?;
        writeln!(out, "category    {}", task.category)?;
        writeln!(out, "priority    {}", task.priority)?;
        writeln!(out, "due         {}", task.due_label())?;
        writeln!(out, "status      {}", task.status.label())?;

        Ok(())
    }

    fn heading_code(&self) -> &'static str {
        match self.theme {
            Theme::Dark => "1;36",
            Theme::Light => "1;34",
        }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

/// Shortest prefix of `id`, at least eight characters, that no other id
/// in `all_ids` shares.
pub fn short_id(id: &str, all_ids: &[&str]) -> String {
    let chars: Vec<char> = id.chars().collect();
    let mut len = MIN_SHORT_ID.min(chars.len());
    loop {
        let prefix: String = chars[..len].iter().collect();
        let clash = all_ids
            .iter()
            .any(|other| *other != id && other.starts_with(&prefix));
        if !clash || len == chars.len() {
            return prefix;
        }
        len += 1;
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    write!(writer, "  ")?;
    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    write!(writer, "  ")?;
    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        write!(writer, "  ")?;
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lanes_model::{BoardState, MemoryStorage, Theme};

    use super::{Renderer, short_id, strip_ansi};
    use crate::config::Config;

    #[test]
    fn color_setting_off_disables_escapes() {
        let mut cfg = Config::default();
        cfg.apply_overrides(vec![("color".to_string(), "off".to_string())]);
        let renderer = Renderer::new(&cfg, Theme::Light);
        assert!(!renderer.color);
        assert_eq!(renderer.paint("late", "31"), "late");
    }

    #[test]
    fn short_ids_grow_until_unique() {
        let ids = ["task-1718000000001", "task-1718000000002", "abcdef0123"];
        assert_eq!(short_id(ids[0], &ids), "task-1718000000001");
        assert_eq!(short_id(ids[2], &ids), "abcdef01");
        assert_eq!(short_id("abc", &["abc"]), "abc");
    }

    #[test]
    fn board_lists_columns_with_counts() {
        let mut board = BoardState::open(MemoryStorage::new());
        board.open_new_form();
        board.form_mut().draft_mut().title = "Ship release".to_string();
        board.submit_form().expect("submit");

        let today = NaiveDate::from_ymd_opt(2026, 1, 1).expect("date");
        let ids: Vec<&str> = board.store().all().iter().map(|t| t.id.as_str()).collect();
        let mut out = Vec::new();
        Renderer::plain(Theme::Dark)
            .write_board(&mut out, &board.columns(today), &ids)
            .expect("render");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.contains("To Do (1)"));
        assert!(text.contains("Ship release"));
        assert!(text.contains("In Progress (0)"));
        assert!(text.contains("No tasks"));
        assert!(text.contains("No due date"));
    }

    #[test]
    fn strips_escape_sequences() {
        assert_eq!(strip_ansi("\x1b[31mlate\x1b[0m"), "late");
    }
}
