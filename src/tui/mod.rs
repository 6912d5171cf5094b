// TUI module for rendering the terminal interface
pub mod colors;
pub mod helpers;
pub mod input;

// Re-exports
pub use colors::*;
pub use helpers::{centered_rect, format_count, RestoreGuard};
pub use input::{handle_key_event, KeyAction};

use crate::controller::{Controller, ControllerState};
use crate::domain::Totals;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Renders the checklist screen and, when open, the help overlay on top
pub fn render(frame: &mut Frame, controller: &Controller) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Checklist
            Constraint::Length(4), // Totals and controls
        ])
        .split(frame.area());

    render_header(frame, chunks[0], controller);
    render_checklist(frame, chunks[1], controller);
    render_footer(frame, chunks[2], controller.totals());

    if *controller.state() == ControllerState::Help {
        render_help_overlay(frame);
    }
}

/// Renders the header with the selected/total file count
fn render_header(frame: &mut Frame, area: Rect, controller: &Controller) {
    let selection = controller.selection();
    let line = Line::from(vec![
        Span::styled(
            " ctxpick ",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!(
                "{}/{} files selected",
                selection.checked_count(),
                selection.len()
            ),
            Style::default().fg(TEXT_PRIMARY),
        ),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_COLOR)),
    );

    frame.render_widget(header, area);
}

/// Renders one row per input file with its checkbox and token count
fn render_checklist(frame: &mut Frame, area: Rect, controller: &Controller) {
    let records = controller.records();
    let items: Vec<ListItem> = controller
        .selection()
        .entries()
        .iter()
        .map(|entry| {
            let record = records.get(&entry.path);
            let (mark, mark_style) = if entry.checked {
                ("[x] ", Style::default().fg(ACCENT_PRIMARY))
            } else {
                ("[ ] ", Style::default().fg(TEXT_SECONDARY))
            };

            let mut spans = vec![
                Span::styled(mark, mark_style),
                Span::styled(entry.path.as_str(), Style::default().fg(TEXT_PRIMARY)),
            ];
            match record {
                Some(r) if r.unreadable => spans.push(Span::styled(
                    "  (unreadable)",
                    Style::default().fg(ACCENT_WARNING),
                )),
                Some(r) => spans.push(Span::styled(
                    format!("  {} tok", format_count(r.token_count)),
                    Style::default().fg(TEXT_SECONDARY),
                )),
                None => {}
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR))
                .title(" Files "),
        )
        .highlight_style(Style::default().bg(FOCUS_BG).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(controller.focus()));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Renders live totals and the key bindings
fn render_footer(frame: &mut Frame, area: Rect, totals: Totals) {
    let stats = Line::from(vec![
        Span::styled("Tokens: ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled(
            format_count(totals.tokens),
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  │  "),
        Span::styled("Words: ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled(
            format_count(totals.words),
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let key = |k: &'static str| Span::styled(k, Style::default().fg(ACCENT_HIGHLIGHT));
    let label = |l: &'static str| Span::styled(l, Style::default().fg(TEXT_SECONDARY));
    let sep = || Span::raw("  │  ");
    let controls = Line::from(vec![
        key("Space "),
        label("Toggle"),
        sep(),
        key("c "),
        label("Check all"),
        sep(),
        key("s "),
        label("Uncheck all"),
        sep(),
        key("t "),
        label("Invert"),
        sep(),
        key("Enter "),
        label("Copy"),
        sep(),
        key("? "),
        label("Help"),
        sep(),
        key("q "),
        label("Quit"),
    ]);

    let footer = Paragraph::new(vec![stats, controls])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let help_area = centered_rect(60, 70, area);

    // Clear background
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let binding = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:>12}  ", keys), Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::styled(format!("{:<24}", what), Style::default().fg(TEXT_PRIMARY)),
        ])
    };

    let help_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        binding("Space", "Toggle focused file"),
        binding("c", "Check all files"),
        binding("s", "Uncheck all files"),
        binding("t", "Invert selection"),
        Line::from(""),
        binding("↑↓ / k j", "Move focus"),
        binding("Home / g", "First file"),
        binding("End / G", "Last file"),
        Line::from(""),
        binding("Enter", "Copy selection and exit"),
        binding("q / Esc", "Quit without copying"),
        binding("? / h", "Show this help"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileRecord, FileRecords};
    use ratatui::{backend::TestBackend, Terminal};

    fn sample_records() -> FileRecords {
        let mut records = FileRecords::new();
        for (path, tokens, unreadable) in [
            ("src/main.rs", 1200, false),
            ("build.py", 34, false),
            ("missing.txt", 4, true),
        ] {
            records.insert(FileRecord {
                path: path.to_string(),
                annotated_content: String::new(),
                token_count: tokens,
                word_count: 10,
                unreadable,
            });
        }
        records
    }

    fn draw(controller: &Controller, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, controller)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    mod layout_tests {
        use super::*;
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        #[test]
        fn test_render_checklist_rows() {
            let records = sample_records();
            let controller = Controller::new(&records);
            let screen = draw(&controller, 100, 20);

            assert!(screen.contains("3/3 files selected"));
            assert!(screen.contains("[x] src/main.rs"));
            assert!(screen.contains("1,200 tok"));
            assert!(screen.contains("(unreadable)"));
        }

        #[test]
        fn test_render_footer_totals_follow_selection() {
            let records = sample_records();
            let mut controller = Controller::new(&records);
            let screen = draw(&controller, 100, 20);
            assert!(screen.contains("Tokens: 1,238"));
            assert!(screen.contains("Words: 30"));

            controller.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
            let screen = draw(&controller, 100, 20);
            assert!(screen.contains("[ ] src/main.rs"));
            assert!(screen.contains("Tokens: 38"));
            assert!(screen.contains("2/3 files selected"));
        }

        #[test]
        fn test_render_footer_labels() {
            let records = sample_records();
            let controller = Controller::new(&records);
            let screen = draw(&controller, 120, 20);
            assert!(screen.contains("Check all"));
            assert!(screen.contains("Uncheck all"));
            assert!(screen.contains("Invert"));
            assert!(screen.contains("Quit"));
        }

        #[test]
        fn test_render_help_overlay() {
            let records = sample_records();
            let mut controller = Controller::new(&records);
            controller.handle_key(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE));
            let screen = draw(&controller, 100, 30);

            assert!(screen.contains("Keyboard Shortcuts"));
            assert!(screen.contains("Check all files"));
            assert!(screen.contains("Uncheck all files"));
            assert!(screen.contains("Press any key to close"));
        }
    }
}
