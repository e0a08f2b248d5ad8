//! Frame rendering for the interactive screens. Pure projections of state.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::commit::{CommitComposer, ComposerAction};
use crate::stage::{SelectorMode, WorkingTreeSelector};
use crate::stats::{ContributionCalendar, IntensityTier, month_grid};
use crate::stats::heatmap::WEEKDAY_LABELS;

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;
const MODIFIED: Color = Color::Magenta;
const CELL_WIDTH: usize = 6;

/// Split `area` into a body and a one-line help bar.
fn with_help_bar(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

fn render_help(f: &mut Frame, text: &str, area: Rect) {
    let bar = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::White).bg(MUTED),
    )));
    f.render_widget(bar, area);
}

pub fn render_selector(f: &mut Frame, selector: &WorkingTreeSelector) {
    let (body, help) = with_help_bar(f.area());
    let groups = selector.groups();

    let mut lines = Vec::new();
    for (title, indices) in [
        ("Changes to be committed / Modified:", &groups.tracked),
        ("Untracked files:", &groups.untracked),
    ] {
        if indices.is_empty() {
            continue;
        }
        lines.push(Line::from(Span::styled(
            title,
            Style::default().fg(MUTED).add_modifier(Modifier::BOLD),
        )));
        for &i in indices {
            lines.push(file_line(selector, i));
        }
        lines.push(Line::default());
    }

    let title = format!(" On branch {} ", selector.branch().descriptor);
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    f.render_widget(Paragraph::new(lines).block(block), body);

    let text = match selector.mode() {
        SelectorMode::Add => " Space:select  a:all  Enter:stage  q:quit",
        SelectorMode::View => " j/k:move  q:quit",
    };
    render_help(f, text, help);
}

fn file_line(selector: &WorkingTreeSelector, index: usize) -> Line<'static> {
    let file = &selector.files()[index];
    let is_cursor = selector.cursor() == index;
    let cursor = if is_cursor { "> " } else { "  " };

    let prefix = match selector.mode() {
        SelectorMode::Add if selector.selected().contains(index) => "[x] ",
        SelectorMode::Add => "[ ] ",
        SelectorMode::View if file.untracked => " ? ",
        SelectorMode::View if file.staged => " + ",
        SelectorMode::View => " M ",
    };

    let color = if file.untracked {
        Color::Gray
    } else if file.staged {
        ACCENT
    } else {
        MODIFIED
    };
    let mut style = Style::default().fg(color);
    if is_cursor {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }

    Line::from(vec![
        Span::raw(cursor),
        Span::styled(format!("{prefix}{}", file.path), style),
    ])
}

pub fn render_composer(f: &mut Frame, composer: &CommitComposer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // message box
            Constraint::Length(1), // actions
            Constraint::Min(0),
            Constraint::Length(1), // help
        ])
        .split(f.area());

    let (title, content) = match composer.buffer() {
        Some(buffer) => (" Edit message ", format!("{buffer}\u{2588}")),
        None => (" Raven suggestion ", composer.message().to_string()),
    };
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let message = Paragraph::new(content).block(block).wrap(Wrap { trim: false });
    f.render_widget(message, chunks[0]);

    if composer.buffer().is_some() {
        render_help(f, " Enter:save  Esc:cancel editing  Ctrl-U:clear", chunks[3]);
        return;
    }

    let buttons: Vec<Span> = ComposerAction::ALL
        .iter()
        .flat_map(|action| {
            let style = if *action == composer.cursor() {
                Style::default()
                    .fg(Color::White)
                    .bg(MODIFIED)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).bg(MUTED)
            };
            [Span::styled(format!("   {}   ", action.label()), style), Span::raw(" ")]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(buttons)), chunks[1]);
    render_help(f, " Arrows/Tab:navigate  Enter:select  q:quit", chunks[3]);
}

pub fn tier_color(tier: IntensityTier) -> Color {
    match tier {
        IntensityTier::None => Color::Reset,
        IntensityTier::Low => Color::Rgb(14, 68, 41),
        IntensityTier::Medium => Color::Rgb(0, 109, 50),
        IntensityTier::High => Color::Rgb(38, 166, 65),
        IntensityTier::VeryHigh => Color::Rgb(57, 211, 83),
        IntensityTier::Exceptional => Color::Rgb(255, 215, 0),
    }
}

pub fn render_calendar(f: &mut Frame, calendar: &ContributionCalendar) {
    let (body, help) = with_help_bar(f.area());
    let cursor = calendar.cursor();

    let mut lines = vec![Line::from(
        WEEKDAY_LABELS
            .iter()
            .map(|d| Span::styled(format!("{d:^CELL_WIDTH$}"), Style::default().add_modifier(Modifier::BOLD)))
            .collect::<Vec<_>>(),
    )];

    for week in month_grid(cursor.month_anchor) {
        let cells: Vec<Span> = week
            .iter()
            .map(|cell| match cell {
                Some(date) => {
                    let count = calendar.histogram().count(*date);
                    let tier = IntensityTier::from_count(count);
                    let mut style = Style::default().bg(tier_color(tier));
                    if *date > calendar.today() {
                        style = style.fg(MUTED);
                    }
                    if *date == cursor.selected {
                        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                    }
                    Span::styled(format!("{:^CELL_WIDTH$}", date.format("%-d").to_string()), style)
                }
                None => Span::raw(" ".repeat(CELL_WIDTH)),
            })
            .collect();
        lines.push(Line::from(cells));
    }

    lines.push(Line::default());
    let count = calendar.selected_count();
    let noun = if count == 1 { "commit" } else { "commits" };
    lines.push(Line::from(Span::styled(
        format!("{}: {count} {noun}", cursor.selected.format("%a, %b %-d %Y")),
        Style::default().fg(ACCENT),
    )));

    let title = format!(" {} ", cursor.month_anchor.format("%B %Y"));
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), body);

    render_help(f, " Arrows/hjkl:move  [/]:month  q:quit", help);
}
