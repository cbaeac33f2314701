//! TUI rendering.
//!
//! ┌──────────────────────────────────────────────┐
//! │  📄 NoticeLens   summary   Ada               │
//! ├──────────────────────────────────────────────┤
//! │  Summary │ Why │ Breakdown │ What to do │ …  │
//! │                                              │
//! │  CP23 notice, tax year 2023                  │
//! │  Amount due  $328.45   Pay by March 15, 2024 │
//! │  ...                                         │
//! ├──────────────────────────────────────────────┤
//! │  ✓ CP23 notice analyzed.                     │
//! ├──────────────────────────────────────────────┤
//! │  ←→ section   e: copy email   esc: back      │
//! └──────────────────────────────────────────────┘

use noticelens_core::{NoticeRecord, ToastKind, View, format_usd};
use ratatui::{prelude::*, widgets::*};

use super::app::{App, DashboardFocus, SummaryTab};
use super::input::{self, FormField};

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(10),   // main
            Constraint::Length(3), // toast
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);
    match app.controller().view() {
        View::Login | View::Register => draw_auth(f, rows[1], app),
        View::Dashboard => draw_dashboard(f, rows[1], app),
        View::Analyzing => draw_analyzing(f, rows[1], app),
        View::Summary => draw_summary(f, rows[1], app),
    }
    draw_toast(f, rows[2], app);
    draw_keys(f, rows[3], app);
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let controller = app.controller();
    let who = controller.user().map(|u| u.display_name()).unwrap_or("");

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" 📄 NoticeLens ", Style::default().bold().fg(Color::Cyan)),
            Span::styled(
                format!("  {}  ", controller.view()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(who.to_string(), Style::default().bold().fg(Color::Yellow)),
            Span::raw(" "),
        ]));

    f.render_widget(block, area);
}

// ---------------------------------------------------------------------------
// Login / register
// ---------------------------------------------------------------------------

fn draw_auth(f: &mut Frame, area: Rect, app: &App) {
    let controller = app.controller();
    let state = controller.state();
    let register = controller.view() == View::Register;
    let fields = app.fields();

    let mut lines = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let value = if register {
            field.register_value(&state.register_form)
        } else {
            field.login_value(&state.login_form)
        };
        lines.push(field_line(*field, value, i == app.field()));

        if register && *field == FormField::Password {
            lines.push(strength_line(app));
        }
    }

    lines.push(Line::from(""));
    if controller.auth_pending() {
        let spin = SPINNER[app.frame() % SPINNER.len()];
        lines.push(Line::from(Span::styled(
            format!("{spin} Contacting server..."),
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(error) = &state.form_error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().bold().fg(Color::Red),
        )));
    }

    let title = if register {
        " Create an account "
    } else {
        " Sign in "
    };
    let height = lines.len() as u16 + 2;
    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(p, centered(area, 60, height));
}

fn field_line(field: FormField, value: &str, focused: bool) -> Line<'static> {
    let pointer = if focused { "▸" } else { " " };
    let shown = if value.is_empty() {
        Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
    } else if field.is_secret() {
        Span::raw(input::mask(value))
    } else {
        Span::raw(value.to_string())
    };
    let cursor = if focused { "▏" } else { "" };
    let label_style = if focused {
        Style::default().bold().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(format!("{pointer} ")),
        Span::styled(format!("{:<18}", field.label()), label_style),
        shown,
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ])
}

fn strength_line(app: &App) -> Line<'static> {
    let strength = app.controller().password_strength();
    let score = strength.score();
    let color = match score {
        0 | 1 => Color::Red,
        2 => Color::Yellow,
        3 => Color::LightGreen,
        _ => Color::Green,
    };
    Line::from(vec![
        Span::raw(format!("  {:<18}", "")),
        Span::styled("■".repeat(score), Style::default().fg(color)),
        Span::styled("□".repeat(4 - score), Style::default().fg(Color::DarkGray)),
        Span::styled(format!(" {}", strength.label()), Style::default().fg(color)),
    ])
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_upload(f, cols[0], app);
    draw_history(f, cols[1], app);
}

fn draw_upload(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus() == DashboardFocus::Path;
    let border = if focused { Color::Cyan } else { Color::DarkGray };

    let names = app.controller().classifier().names().join(" or ");
    let lines = vec![
        Line::from("Path to your IRS notice (PDF):"),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(app.path_input().to_string()),
            Span::styled(if focused { "▏" } else { "" }, Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("Recognized notices: {names}"),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "The notice type is read from the file name.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Upload ");
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(p, area);
}

fn draw_history(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus() == DashboardFocus::History;
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    let entries = app.history_entries();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" History ({}) ", entries.len()));

    if entries.is_empty() {
        let p = Paragraph::new("No notices analyzed yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_cursor = focused && i == app.history_cursor();
            let pointer = if is_cursor { "▸" } else { " " };
            let style = if is_cursor {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            Row::new(vec![
                pointer.to_string(),
                entry.record.kind.to_string(),
                entry.record.amount_due(),
                entry.file.name.clone(),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),  // pointer
            Constraint::Length(7),  // kind
            Constraint::Length(11), // amount
            Constraint::Min(10),    // file
        ],
    )
    .block(block);

    f.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Analyzing
// ---------------------------------------------------------------------------

fn draw_analyzing(f: &mut Frame, area: Rect, app: &App) {
    let spin = SPINNER[app.frame() % SPINNER.len()];
    let name = app
        .controller()
        .state()
        .active_file
        .as_ref()
        .map(|file| file.name.as_str())
        .unwrap_or("");

    let lines = vec![
        Line::from(Span::styled(
            format!("{spin} Analyzing your notice..."),
            Style::default().bold().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(name, Style::default().fg(Color::DarkGray))),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, centered(area, 50, 5));
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

fn draw_summary(f: &mut Frame, area: Rect, app: &App) {
    let Some(record) = app.controller().state().active_notice else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let titles: Vec<Line> = SummaryTab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.label())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.tab().index())
        .highlight_style(Style::default().bold().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(format!(
            " {} · {} due {} ",
            record.kind,
            record.amount_due(),
            record.due_date
        )));
    f.render_widget(tabs, rows[0]);

    let lines = section_lines(record, app.tab(), app.why_expanded());
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll(), 0))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, rows[1]);
}

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().bold().fg(Color::Cyan),
    ))
}

fn bullet(text: &str) -> Line<'static> {
    Line::from(format!("  • {text}"))
}

/// Body text for one summary section.
pub fn section_lines(record: &NoticeRecord, tab: SummaryTab, why_expanded: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match tab {
        SummaryTab::Overview => {
            lines.push(heading(format!(
                "{} notice, tax year {}",
                record.kind, record.tax_year
            )));
            lines.push(Line::from(format!("Notice date  {}", record.notice_date)));
            lines.push(Line::from(vec![
                Span::raw("Amount due   "),
                Span::styled(record.amount_due(), Style::default().bold().fg(Color::Red)),
            ]));
            lines.push(Line::from(format!("Pay by       {}", record.due_date)));
            lines.push(Line::from(""));
            lines.push(Line::from(record.taxpayer.name));
            for address in record.taxpayer.address {
                lines.push(Line::from(*address));
            }
            lines.push(Line::from(format!("SSN {}", record.taxpayer.ssn_mask)));
            lines.push(Line::from(""));
            lines.push(Line::from(record.summary.overview));
            lines.push(Line::from(""));
            lines.extend(record.summary.key_points.iter().map(|p| bullet(p)));
        }
        SummaryTab::Why => {
            for item in record.why {
                lines.push(heading(item.title));
                if item.interactive && !why_expanded {
                    lines.push(Line::from(Span::styled(
                        "  (press enter to see what to check)",
                        Style::default().fg(Color::DarkGray),
                    )));
                } else {
                    lines.push(Line::from(format!("  {}", item.body)));
                }
                lines.push(Line::from(""));
            }
        }
        SummaryTab::Breakdown => {
            for item in record.breakdown.items {
                let style = if item.is_total {
                    Style::default().bold()
                } else {
                    Style::default()
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{:<44}", item.label), style),
                    Span::styled(format!("{:>12}", format_usd(item.amount_cents)), style),
                ]));
            }
            lines.push(Line::from(""));
            lines.extend(record.breakdown.notes.iter().map(|n| bullet(n)));
        }
        SummaryTab::Fix => {
            for (i, step) in record.fix.iter().enumerate() {
                lines.push(heading(format!("{}. {}", i + 1, step.title)));
                lines.extend(step.points.iter().map(|p| bullet(p)));
                lines.push(Line::from(""));
            }
        }
        SummaryTab::Payment => {
            for option in record.payment_options {
                lines.push(heading(option.channel));
                lines.push(Line::from(format!("  {}", option.detail)));
                if let Some(contact) = option.contact {
                    lines.push(Line::from(Span::styled(
                        format!("  {contact}"),
                        Style::default().fg(Color::Yellow),
                    )));
                }
                lines.push(Line::from(""));
            }
        }
        SummaryTab::Help => {
            lines.push(heading(record.help.heading));
            lines.push(Line::from(format!(
                "{}  ({})",
                record.help.phone, record.help.hours
            )));
            lines.push(Line::from(""));
            lines.extend(record.help.resources.iter().map(|r| bullet(r)));
        }
        SummaryTab::Templates => {
            lines.push(heading("Email to your tax preparer  [e to copy]"));
            lines.extend(record.templates.taxpayer_email.lines().map(|l| Line::from(l.to_string())));
            lines.push(Line::from(""));
            lines.push(heading("Response letter to the IRS  [l to copy]"));
            lines.extend(record.templates.irs_response.lines().map(|l| Line::from(l.to_string())));
        }
    }
    lines
}

// ---------------------------------------------------------------------------
// Toast / keys
// ---------------------------------------------------------------------------

fn draw_toast(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL);
    let Some(toast) = app.controller().toast() else {
        f.render_widget(block, area);
        return;
    };
    let (icon, color) = match toast.kind {
        ToastKind::Success => ("✓", Color::Green),
        ToastKind::Error => ("✗", Color::Red),
    };
    let p = Paragraph::new(format!("{icon} {}", toast.text))
        .style(Style::default().bold().fg(color))
        .block(block.border_style(Style::default().fg(color)));
    f.render_widget(p, area);
}

fn key_hints(app: &App) -> &'static str {
    match app.controller().view() {
        View::Login => " tab: next field   enter: sign in   F2: register   F3: register (clear)   esc: quit",
        View::Register => " tab: next field   enter: create account   F2: sign in   F3: sign in (clear)   esc: quit",
        View::Dashboard => match app.focus() {
            DashboardFocus::Path => " enter: analyze   tab: history   F9: sign out   esc: quit",
            DashboardFocus::History => " ↑↓ select   enter: open   tab: upload   F9: sign out   esc: quit",
        },
        View::Analyzing => " F9: sign out   ctrl-c: quit",
        View::Summary => " ←→/1-7 section   ↑↓ scroll   e: copy email   l: copy letter   esc: back   F9: sign out",
    }
}

fn draw_keys(f: &mut Frame, area: Rect, app: &App) {
    let bar = Paragraph::new(key_hints(app))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
