use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap};

use super::app::{MessageType, Screen, StatusMessage};
use super::layout::AppLayout;
use crate::models::{CustomizationTemplate, MenuItem, SelectionMode, Transaction};
use crate::utils::{format_money, format_price, format_timestamp, sanitize_cell};

const TEXT: Color = Color::Rgb(250, 250, 250);
const MUTED: Color = Color::Rgb(113, 113, 122);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const BAR: Color = Color::Rgb(24, 24, 27);

/// One list row, already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub text: String,
    pub selected: bool,
}

/// Everything the current screen needs drawn
#[derive(Debug, Clone, Default)]
pub struct ScreenView {
    pub rows: Vec<RowView>,
    /// Label/value pairs for the row under the cursor
    pub detail: Vec<(String, String)>,
    pub sort_label: String,
    pub total: usize,
    pub selected: usize,
}

pub struct RenderState<'a> {
    pub screen: Screen,
    pub view: &'a ScreenView,
    pub cursor: usize,
    pub input: &'a str,
    pub search_pending: bool,
    pub filter_error: Option<&'a str>,
    pub status_message: Option<&'a StatusMessage>,
}

pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, layout.tabs_area, state.screen);
    render_search(frame, layout.search_area, state.input, state.search_pending);
    render_results_list(frame, layout.results_area, state.screen, state.view, state.cursor);
    render_detail(frame, layout.detail_area, &state.view.detail);
    render_status_bar(frame, layout.status_area, state);
}

fn render_tabs(frame: &mut Frame, area: Rect, screen: Screen) {
    let tabs = Tabs::new(Screen::ALL.iter().map(|s| s.title()))
        .select(screen.index())
        .style(Style::default().fg(MUTED))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn render_search(frame: &mut Frame, area: Rect, input: &str, pending: bool) {
    let mut spans = vec![
        Span::styled(" Search: ", Style::default().fg(MUTED)),
        Span::styled(input.to_string(), Style::default().fg(TEXT)),
    ];
    if pending {
        spans.push(Span::styled(" …", Style::default().fg(MUTED)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_results_list(
    frame: &mut Frame,
    area: Rect,
    screen: Screen,
    view: &ScreenView,
    cursor: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
        .title(format!(" {} ", screen.title()));

    if view.rows.is_empty() {
        let message = Paragraph::new("No matching records")
            .style(Style::default().fg(MUTED))
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    // Keep the cursor row inside the visible window
    let height = usize::from(area.height.saturating_sub(2)).max(1);
    let offset = cursor.saturating_sub(height - 1);

    let items: Vec<ListItem> = view
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(idx, row)| {
            let marker = if row.selected { "[x]" } else { "[ ]" };
            let style = if idx == cursor {
                Style::default().fg(TEXT).bg(ACCENT).add_modifier(Modifier::BOLD)
            } else if row.selected {
                Style::default().fg(TEXT)
            } else {
                Style::default().fg(MUTED)
            };
            ListItem::new(format!("{} {}", marker, row.text)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_detail(frame: &mut Frame, area: Rect, detail: &[(String, String)]) {
    let content = if detail.is_empty() {
        Text::from("Nothing under the cursor")
    } else {
        Text::from(
            detail
                .iter()
                .map(|(label, value)| {
                    Line::from(vec![
                        Span::styled(format!("{}: ", label), Style::default().fg(MUTED)),
                        Span::raw(value.clone()),
                    ])
                })
                .collect::<Vec<_>>(),
        )
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED))
                .title(" Details "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (status_text, fg) = if let Some(message) = state.status_message {
        let fg = match message.message_type {
            MessageType::Success => ACCENT,
            MessageType::Error => ERROR,
        };
        (format!(" {} ", message.text), fg)
    } else if let Some(error) = state.filter_error {
        (format!(" [ERROR] {} ", error), ERROR)
    } else {
        let view = state.view;
        let mut parts = Vec::new();
        if view.rows.len() < view.total {
            parts.push(format!("{}/{} shown", view.rows.len(), view.total));
        } else {
            parts.push(format!("{} records", view.total));
        }
        if view.selected > 0 {
            parts.push(format!("{} selected", view.selected));
        }
        parts.push(format!("sort: {}", view.sort_label));
        parts.push("Tab: screen".to_string());
        parts.push("^T: select".to_string());
        parts.push("^S/^O: sort".to_string());
        parts.push("Enter: apply".to_string());
        parts.push("^C: quit".to_string());
        (format!(" {} ", parts.join(" | ")), TEXT)
    };

    let paragraph = Paragraph::new(status_text).style(Style::default().fg(fg).bg(BAR));
    frame.render_widget(paragraph, area);
}

pub(super) fn transaction_row(tx: &Transaction) -> String {
    format!(
        "{:<10} {:<8} {:>14}  {}",
        format_timestamp(&tx.created_at),
        tx.tx_type,
        format_money(tx.amount, &tx.currency),
        sanitize_cell(tx.description.as_deref().unwrap_or(&tx.id), 40),
    )
}

pub(super) fn transaction_detail(tx: &Transaction) -> Vec<(String, String)> {
    let mut detail = vec![
        ("ID".to_string(), sanitize_cell(&tx.id, 64)),
        ("Type".to_string(), tx.tx_type.to_string()),
        ("Amount".to_string(), format_money(tx.amount, &tx.currency)),
        ("Created".to_string(), tx.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
    ];
    detail.push((
        "Settled".to_string(),
        tx.settled_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "pending".to_string()),
    ));
    if let Some(reference) = &tx.reference {
        detail.push(("Reference".to_string(), sanitize_cell(reference, 64)));
    }
    if let Some(description) = &tx.description {
        detail.push(("Description".to_string(), sanitize_cell(description, 200)));
    }
    detail
}

pub(super) fn menu_row(item: &MenuItem) -> String {
    format!(
        "{:<28} {:<14} {:>8} {:>5} orders{}",
        sanitize_cell(&item.name, 28),
        sanitize_cell(&item.category, 14),
        format_price(item.base_price),
        item.order_count,
        if item.is_available { "" } else { "  (unavailable)" },
    )
}

/// Detail for a menu item; applied templates are shown by name where known
pub(super) fn menu_detail(
    item: &MenuItem,
    templates: &[CustomizationTemplate],
) -> Vec<(String, String)> {
    let mut detail = vec![
        ("ID".to_string(), sanitize_cell(&item.id, 64)),
        ("Name".to_string(), sanitize_cell(&item.name, 64)),
        ("Category".to_string(), sanitize_cell(&item.category, 64)),
        ("Price".to_string(), format_price(item.base_price)),
        ("Available".to_string(), if item.is_available { "yes" } else { "no" }.to_string()),
        ("Orders".to_string(), item.order_count.to_string()),
        (
            "Performance".to_string(),
            item.performance_score.map(|s| format!("{s:.1}")).unwrap_or_else(|| "-".into()),
        ),
    ];
    for (position, template_id) in item.template_ids.iter().enumerate() {
        let name = templates
            .iter()
            .find(|t| &t.id == template_id)
            .map(|t| t.name.as_str())
            .unwrap_or(template_id);
        detail.push((format!("Template {}", position + 1), sanitize_cell(name, 64)));
    }
    if let Some(description) = &item.description {
        detail.push(("Description".to_string(), sanitize_cell(description, 200)));
    }
    detail
}

pub(super) fn template_row(template: &CustomizationTemplate, applied: Option<usize>) -> String {
    let position = applied.map(|p| format!("#{}", p + 1)).unwrap_or_default();
    format!(
        "{:<28} {:<8} {:>3} options {:>5} uses {}",
        sanitize_cell(&template.name, 28),
        if template.is_required { "required" } else { "optional" },
        template.options.len(),
        template.usage_count,
        position,
    )
}

pub(super) fn template_detail(
    template: &CustomizationTemplate,
    applied: Option<usize>,
) -> Vec<(String, String)> {
    let mode = match template.selection_mode {
        SelectionMode::Single => "single choice",
        SelectionMode::Multiple => "multiple choice",
    };
    let mut detail = vec![
        ("ID".to_string(), sanitize_cell(&template.id, 64)),
        ("Name".to_string(), sanitize_cell(&template.name, 64)),
        ("Mode".to_string(), mode.to_string()),
        ("Required".to_string(), if template.is_required { "yes" } else { "no" }.to_string()),
        ("Uses".to_string(), template.usage_count.to_string()),
        (
            "Applied".to_string(),
            applied.map(|p| format!("position {}", p + 1)).unwrap_or_else(|| "no".into()),
        ),
    ];
    for option in &template.options {
        let mut value = format!("+{}", format_price(option.additional_price));
        if option.is_default {
            value.push_str(" (default)");
        }
        detail.push((sanitize_cell(&option.name, 32), value));
    }
    detail
}
