use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Row, Table},
};
use tracing::Level;

use crate::log_buffer::LogBuffer;
use crate::state::LogsState;
use crate::ui::{
    components::{empty_state, help_bar},
    layouts,
    theme::Palette,
};

pub fn render(f: &mut Frame, state: &LogsState, log_buffer: &LogBuffer, palette: &Palette) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let title = format!("Session Logs ({} entries)", state.total_entries);
    f.render_widget(
        ratatui::widgets::Paragraph::new(title).style(palette.title_style()),
        title_area,
    );
    render_logs(f, content_area, state, log_buffer, palette);
    render_help(f, help_area, state, palette);
}

fn render_logs(
    f: &mut Frame,
    area: Rect,
    state: &LogsState,
    log_buffer: &LogBuffer,
    palette: &Palette,
) {
    let entries = log_buffer.get_entries();
    let total = entries.len();

    if total == 0 {
        empty_state::render_empty_state(f, area, palette, "Session Logs", "No logs yet", None);
        return;
    }

    // Calculate visible window (scrolling from bottom, newest at bottom)
    let inner_height = area.height.saturating_sub(2) as usize; // Account for borders
    let start = total.saturating_sub(state.scroll_offset + inner_height);
    let end = total.saturating_sub(state.scroll_offset);

    let rows: Vec<Row> = entries[start..end]
        .iter()
        .map(|entry| {
            let level_style = match entry.level {
                Level::ERROR => palette.error_style(),
                Level::WARN => palette.loading_style(),
                Level::INFO => Style::default().fg(palette.positive),
                Level::DEBUG => Style::default().fg(palette.accent),
                Level::TRACE => palette.help_text_style(),
            };

            let level_str = match entry.level {
                Level::ERROR => "ERROR",
                Level::WARN => "WARN ",
                Level::INFO => "INFO ",
                Level::DEBUG => "DEBUG",
                Level::TRACE => "TRACE",
            };

            Row::new(vec![
                entry.timestamp.format("%H:%M:%S%.3f").to_string(),
                level_str.to_string(),
                truncate_target(&entry.target, 25),
                entry.message.clone(),
            ])
            .style(level_style)
        })
        .collect();

    let widths = [
        Constraint::Length(12), // Time
        Constraint::Length(5),  // Level
        Constraint::Length(25), // Target
        Constraint::Min(30),    // Message
    ];

    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Logs [{}-{} of {}] ",
            start + 1,
            end,
            total
        )))
        .header(
            Row::new(vec!["Time", "Level", "Target", "Message"])
                .style(palette.header_style())
                .bottom_margin(1),
        );

    f.render_widget(table, area);
}

fn render_help(f: &mut Frame, area: Rect, state: &LogsState, palette: &Palette) {
    let scroll_info = if state.scroll_offset > 0 {
        format!(" (scrolled {} from bottom)", state.scroll_offset)
    } else {
        String::new()
    };

    let help_text = format!(
        "j/k: scroll | G: newest | gg: oldest | PgUp/PgDn: page | h/Esc: back | ?: help{}",
        scroll_info
    );

    help_bar::render_help_bar(f, area, palette, &help_text);
}

/// Keep the tail of a module path, which is the informative part.
fn truncate_target(target: &str, max_len: usize) -> String {
    let count = target.chars().count();
    if count <= max_len {
        target.to_string()
    } else {
        let tail: String = target.chars().skip(count - max_len + 3).collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_target_keeps_tail() {
        assert_eq!(truncate_target("dealdash::app", 25), "dealdash::app");
        assert_eq!(
            truncate_target("dealdash::background::data_loader", 20),
            "...ound::data_loader"
        );
    }
}
