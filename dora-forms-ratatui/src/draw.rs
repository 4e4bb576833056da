//! Rendering of the saved-forms screen.

use dora_forms::{ChartSurface, DocumentGenerator, FormDelegate, Label, SavedForms};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::Theme;
use crate::state::{Focus, Mode, StatusKind, UiState, ordered_questions};

/// Bars are drawn in tenths so averages keep one decimal.
const BAR_SCALE: f64 = 10.0;

pub(crate) fn draw_view<D, C, G>(
    frame: &mut Frame,
    view: &SavedForms<D, C, G>,
    ui: &UiState,
    theme: &Theme,
) where
    D: FormDelegate,
    C: ChartSurface,
    G: DocumentGenerator,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // List and detail
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    let lang = view.language();
    let title = Paragraph::new(Label::SavedForms.text(lang))
        .style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[1]);
    draw_list(frame, view, ui, theme, body[0]);

    let detail = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(12)])
        .split(body[1]);
    draw_detail(frame, view, ui, theme, detail[0]);
    draw_chart(frame, view, theme, detail[1]);

    draw_status(frame, view, ui, theme, chunks[2]);

    let help_text = if view.is_editing() {
        "↑/↓: Question  0-9: Answer  o: Observation  s: Save  x: Discard  e: Exit edit"
    } else {
        "Tab: Focus  ↑/↓: Navigate  Enter: Select  e: Edit  p: PDF  d: Delete  q: Quit"
    };
    let help = Paragraph::new(help_text).style(Style::default().fg(theme.border));
    frame.render_widget(help, chunks[3]);
}

fn pane_block(title: &str, focused: bool, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            theme.primary
        } else {
            theme.border
        }))
        .title(format!(" {title} "))
}

fn draw_list<D, C, G>(
    frame: &mut Frame,
    view: &SavedForms<D, C, G>,
    ui: &UiState,
    theme: &Theme,
    area: Rect,
) where
    D: FormDelegate,
    C: ChartSurface,
    G: DocumentGenerator,
{
    let lang = view.language();
    let block = pane_block(Label::Date.text(lang), ui.focus == Focus::List, theme);

    if view.forms().is_empty() {
        let empty = Paragraph::new(Label::NoSavedForms.text(lang))
            .style(Style::default().fg(theme.border))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = view
        .forms()
        .iter()
        .enumerate()
        .map(|(i, form)| {
            let marker = if view.selected_index() == Some(i) { "● " } else { "  " };
            ListItem::new(format!("{marker}{}", form.date))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .style(Style::default().fg(theme.text))
        .highlight_style(
            Style::default()
                .bg(theme.selected_bg)
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        );
    let mut state = ListState::default().with_selected(Some(ui.list_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_detail<D, C, G>(
    frame: &mut Frame,
    view: &SavedForms<D, C, G>,
    ui: &UiState,
    theme: &Theme,
    area: Rect,
) where
    D: FormDelegate,
    C: ChartSurface,
    G: DocumentGenerator,
{
    let lang = view.language();
    let focused = ui.focus == Focus::Detail;

    let Some(form) = view.selected_form() else {
        let hint = Paragraph::new(Label::SelectFormHint.text(lang))
            .style(Style::default().fg(theme.border))
            .block(pane_block(Label::Question.text(lang), focused, theme));
        frame.render_widget(hint, area);
        return;
    };

    let title = if view.is_editing() {
        format!("{} · {}", form.date, Label::Editing.text(lang))
    } else {
        form.date.clone()
    };
    let block = pane_block(&title, focused, theme).border_style(Style::default().fg(
        if view.is_editing() {
            theme.highlight
        } else if focused {
            theme.primary
        } else {
            theme.border
        },
    ));

    let questions = ordered_questions(view);
    let mut lines = Vec::new();
    let mut cursor_line = 0;
    let mut current_category = None;
    for (i, question) in questions.iter().enumerate() {
        if current_category != Some(question.category) {
            current_category = Some(question.category);
            if let Some(category) = view.categories().iter().find(|c| c.id == question.category) {
                lines.push(Line::from(Span::styled(
                    category.label(lang).to_string(),
                    Style::default()
                        .fg(theme.secondary)
                        .add_modifier(Modifier::BOLD),
                )));
            }
        }

        let is_cursor = focused && i == ui.question_cursor;
        if is_cursor {
            cursor_line = lines.len();
        }
        let prompt_style = if is_cursor {
            Style::default()
                .bg(theme.selected_bg)
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        lines.push(Line::from(Span::styled(
            format!("{} {}", if is_cursor { "›" } else { " " }, question.prompt(lang)),
            prompt_style,
        )));

        let answer = match view.displayed_answer(question.id) {
            Some(value) => Span::styled(value.to_string(), Style::default().fg(theme.success)),
            None => Span::styled(
                Label::NoAnswer.text(lang),
                Style::default().fg(theme.border),
            ),
        };
        lines.push(Line::from(vec![
            Span::raw(format!("    {}: ", Label::Answer.text(lang))),
            answer,
        ]));

        if let Some(observation) = view.displayed_observation(question.id) {
            lines.push(Line::from(Span::styled(
                format!("    {}: {observation}", Label::Observation.text(lang)),
                Style::default().fg(theme.text),
            )));
        }
    }

    // Keep the cursor line visible
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = cursor_line.saturating_sub(inner_height.saturating_sub(3));
    let detail = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(detail, area);
}

fn draw_chart<D, C, G>(frame: &mut Frame, view: &SavedForms<D, C, G>, theme: &Theme, area: Rect)
where
    D: FormDelegate,
    C: ChartSurface,
    G: DocumentGenerator,
{
    let lang = view.language();
    let data = view.chart_data();
    let block = pane_block(Label::ChartTitle.text(lang), false, theme);

    let bars: Vec<Bar> = data
        .bars
        .iter()
        .map(|bar| {
            Bar::default()
                .value((bar.value * BAR_SCALE).round() as u64)
                .text_value(format!("{:.1}", bar.value))
                .label(Line::from(bar.label.clone()))
        })
        .collect();

    let bar_width = if bars.is_empty() {
        1
    } else {
        let per_bar = area.width.saturating_sub(2) / bars.len() as u16;
        per_bar.saturating_sub(1).clamp(3, 20)
    };

    let chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.primary))
        .value_style(Style::default().fg(theme.background).bg(theme.primary))
        .label_style(Style::default().fg(theme.text))
        .data(BarGroup::default().bars(&bars))
        .max((data.scale_max * BAR_SCALE).round() as u64);
    frame.render_widget(chart, area);
}

fn draw_status<D, C, G>(
    frame: &mut Frame,
    view: &SavedForms<D, C, G>,
    ui: &UiState,
    theme: &Theme,
    area: Rect,
) where
    D: FormDelegate,
    C: ChartSurface,
    G: DocumentGenerator,
{
    let line = if let Mode::EditingObservation { text, cursor, .. } = &ui.mode {
        let split = text
            .char_indices()
            .nth(*cursor)
            .map_or(text.len(), |(i, _)| i);
        let (before, after) = text.split_at(split);
        Line::from(vec![
            Span::styled(
                format!("{}: ", Label::Observation.text(view.language())),
                Style::default().fg(theme.highlight),
            ),
            Span::raw(before.to_string()),
            Span::styled("│", Style::default().fg(theme.highlight)),
            Span::raw(after.to_string()),
        ])
    } else if let Some(status) = &ui.status {
        let color = match status.kind {
            StatusKind::Info => theme.success,
            StatusKind::Error => theme.error,
        };
        Line::from(Span::styled(status.text.clone(), Style::default().fg(color)))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line), area);
}
