//! Dashboard rendering and the main event loop.

use super::app::DashboardApp;
use super::columns::{Column, ColumnKey};
use super::events::{handle_key_event, Event, EventHandler};
use super::theme::{colors, status_color};
use crate::rows::parse_scan_date;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use std::io::{self, stdout};

/// Run the dashboard TUI until the user quits.
pub fn run_dashboard(app: &mut DashboardApp) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::default();

    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Resize(_, _) => {}
            Event::Tick => app.on_tick(),
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Main render function
fn render(frame: &mut Frame, app: &mut DashboardApp) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Grid
            Constraint::Length(1), // Scan metadata footer
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_header(frame, chunks[0], app);

    if let Some(message) = app.loader.state().error() {
        render_error(frame, chunks[1], message);
    } else if app.loader.state().loaded().is_some() {
        render_grid(frame, chunks[1], app);
    } else {
        // Idle or mid-fetch
        render_loading(frame, chunks[1]);
    }

    render_footer(frame, chunks[2], app);
    render_hints(frame, chunks[3]);

    if app.show_detail {
        render_detail_overlay(frame, area, app);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let mut spans = vec![
        Span::styled(
            " Software Bill of Materials ",
            Style::default().fg(colors().primary).bold(),
        ),
        Span::raw("  "),
        Span::styled("Filter: ", Style::default().fg(colors().text_muted)),
        Span::styled(
            if app.hide_empty_service {
                "services only"
            } else {
                "all rows"
            },
            Style::default().fg(colors().accent),
        ),
        Span::raw("  "),
        Span::styled("Columns: ", Style::default().fg(colors().text_muted)),
        Span::styled(
            if app.show_hidden_columns { "all" } else { "default" },
            Style::default().fg(colors().accent),
        ),
    ];

    if let Some(col_idx) = app.sort_column {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("Sort: ", Style::default().fg(colors().text_muted)));
        spans.push(Span::styled(
            format!(
                "{} {}",
                super::columns::COLUMNS[col_idx].label,
                app.sort_direction.arrow()
            ),
            Style::default().fg(colors().accent),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let loading = Paragraph::new("Loading")
        .style(Style::default().fg(colors().text_muted))
        .alignment(Alignment::Center);
    frame.render_widget(loading, area);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let error = Paragraph::new(message)
        .style(Style::default().fg(colors().error))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(error, area);
}

/// Row height for a multiline cell: one line per entry, never capped, so
/// every technology stays visible in the grid itself.
fn cell_height(text: &str) -> u16 {
    (text.lines().count().max(1)) as u16
}

/// Columns to draw this frame: the repository column stays pinned while the
/// rest honor the horizontal scroll offset.
fn displayed_columns(app: &DashboardApp) -> Vec<&'static Column> {
    let visible = app.visible_columns();
    let mut shown: Vec<&Column> = Vec::with_capacity(visible.len());
    for (i, column) in visible.iter().enumerate() {
        if i == 0 || i > app.col_offset {
            shown.push(column);
        }
    }
    shown
}

fn render_grid(frame: &mut Frame, area: Rect, app: &mut DashboardApp) {
    let columns = displayed_columns(app);
    let rows_data = app.visible_rows();

    let header = Row::new(columns.iter().map(|c| {
        let mut label = c.label.to_string();
        if app
            .sort_column
            .is_some_and(|idx| super::columns::COLUMNS[idx].key == c.key)
        {
            label = format!("{label} {}", app.sort_direction.arrow());
        }
        Cell::from(label).style(Style::default().fg(colors().primary).bold())
    }))
    .height(1);

    let table_rows: Vec<Row> = rows_data
        .iter()
        .map(|row| {
            let mut height = 1u16;
            let cells: Vec<Cell> = columns
                .iter()
                .map(|column| {
                    let text = column.cell_text(row);
                    if column.multiline {
                        height = height.max(cell_height(&text));
                        let lines: Vec<Line> = text.lines().map(|l| Line::from(l.to_string())).collect();
                        Cell::from(Text::from(lines))
                    } else {
                        let style = match column.key {
                            ColumnKey::CiStatus
                            | ColumnKey::Sonar
                            | ColumnKey::VeracodeStatus
                            | ColumnKey::ScaStatus => Style::default().fg(status_color(&text)),
                            _ => Style::default().fg(colors().text),
                        };
                        Cell::from(text).style(style)
                    }
                })
                .collect();
            Row::new(cells).height(height)
        })
        .collect();

    let widths: Vec<Constraint> = columns.iter().map(|c| Constraint::Length(c.width)).collect();

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors().border)),
        )
        .column_spacing(1)
        .row_highlight_style(Style::default().bg(colors().selection).bold());

    let mut table_state = TableState::default()
        .with_offset(app.scroll_offset)
        .with_selected(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
    app.scroll_offset = table_state.offset();
}

fn render_footer(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let Some(loaded) = app.loader.state().loaded() else {
        return;
    };
    let snapshot = &loaded.snapshot;

    let scan_date = parse_scan_date(&snapshot.scan_date)
        .map_or_else(|| "Invalid".to_string(), |d| d.format("%a %b %d %Y").to_string());
    let shown = app.visible_rows().len();

    let line = Line::from(vec![
        Span::styled(" Scan Date: ", Style::default().fg(colors().text_muted)),
        Span::raw(scan_date),
        Span::styled("  Scan Time: ", Style::default().fg(colors().text_muted)),
        Span::raw(format!("{} seconds", snapshot.elapsed_seconds())),
        Span::styled("  Orgs: ", Style::default().fg(colors().text_muted)),
        Span::raw(snapshot.orgs.join(", ")),
        Span::styled("  Rows: ", Style::default().fg(colors().text_muted)),
        Span::raw(format!("{shown}/{}", loaded.rows.len())),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let hints = Paragraph::new(Line::from(vec![
        Span::styled(" q", Style::default().fg(colors().accent)),
        Span::styled(" quit  ", Style::default().fg(colors().text_muted)),
        Span::styled("↑↓", Style::default().fg(colors().accent)),
        Span::styled(" rows  ", Style::default().fg(colors().text_muted)),
        Span::styled("←→", Style::default().fg(colors().accent)),
        Span::styled(" columns  ", Style::default().fg(colors().text_muted)),
        Span::styled("f", Style::default().fg(colors().accent)),
        Span::styled(" filter  ", Style::default().fg(colors().text_muted)),
        Span::styled("c", Style::default().fg(colors().accent)),
        Span::styled(" all columns  ", Style::default().fg(colors().text_muted)),
        Span::styled("s/S", Style::default().fg(colors().accent)),
        Span::styled(" sort  ", Style::default().fg(colors().text_muted)),
        Span::styled("enter", Style::default().fg(colors().accent)),
        Span::styled(" detail", Style::default().fg(colors().text_muted)),
    ]));
    frame.render_widget(hints, area);
}

/// Full-field view of the selected row, including the profile URLs that
/// have no grid column.
fn render_detail_overlay(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let Some(row) = app.selected_row() else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    for column in super::columns::COLUMNS {
        let value = column.cell_text(row);
        if column.multiline && !value.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("{}: ", column.label),
                Style::default().fg(colors().text_muted),
            )));
            for entry in value.lines() {
                lines.push(Line::from(format!("    {entry}")));
            }
        } else {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", column.label),
                    Style::default().fg(colors().text_muted),
                ),
                Span::raw(value),
            ]));
        }
    }
    if let Some(url) = &row.veracode_app_profile_url {
        lines.push(Line::from(vec![
            Span::styled("Veracode Profile: ", Style::default().fg(colors().text_muted)),
            Span::raw(url.clone()),
        ]));
    }
    if let Some(url) = &row.veracode_sca_profile_url {
        lines.push(Line::from(vec![
            Span::styled("SCA Profile: ", Style::default().fg(colors().text_muted)),
            Span::raw(url.clone()),
        ]));
    }

    let popup = centered_rect(70, 80, area);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!(" {} ", row.id))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors().border)),
            )
            .wrap(Wrap { trim: false }),
        popup,
    );
}

/// A centered sub-rectangle, sized by percentage of the outer area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
