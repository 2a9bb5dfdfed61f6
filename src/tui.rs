mod input;

pub use input::map_key_event;

use crossbeam::channel::Sender;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame, Terminal,
};
use std::{error::Error, io, time::Duration};

use crate::config::{BEATS_PER_MEASURE, MAX_BPM, MIN_BPM};
use crate::event_loop::{EngineMessage, SharedState, Snapshot};

const POLL_INTERVAL: Duration = Duration::from_millis(30);

fn button_label(snapshot: &Snapshot) -> &'static str {
    if snapshot.playing {
        "Stop"
    } else {
        "Start"
    }
}

fn beat_lights(snapshot: &Snapshot) -> Line<'static> {
    let spans = (0..BEATS_PER_MEASURE)
        .flat_map(|beat| {
            let lit = snapshot.last_beat == Some(beat);
            let color = match (lit, beat == 0) {
                (true, true) => Color::Red,
                (true, false) => Color::Green,
                (false, _) => Color::DarkGray,
            };
            let symbol = if beat == 0 { " ◆ " } else { " ● " };
            [
                Span::styled(symbol, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(" "),
            ]
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

fn status_line(snapshot: &Snapshot) -> String {
    match snapshot.started_at {
        Some(started) if snapshot.playing => format!(
            "Playing since {} | {} clicks",
            started.format("%H:%M:%S"),
            snapshot.clicks
        ),
        _ => "Stopped".to_string(),
    }
}

pub fn render_ui(f: &mut Frame, snapshot: &Snapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tempo slider
            Constraint::Length(3), // Start/Stop button
            Constraint::Length(3), // Beat lights
            Constraint::Length(1), // Status
            Constraint::Min(1),    // Controls
        ])
        .split(f.size());

    let slider = Gauge::default()
        .block(
            Block::default()
                .title(format!("Tempo ({}-{})", MIN_BPM, MAX_BPM))
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(snapshot.tempo.ratio())
        .label(snapshot.tempo.to_string());
    f.render_widget(slider, chunks[0]);

    let button_style = if snapshot.playing {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::Black).bg(Color::Green)
    };
    let button = Paragraph::new(Span::styled(
        format!("  {}  ", button_label(snapshot)),
        button_style.add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, chunks[1]);

    let lights = Paragraph::new(beat_lights(snapshot))
        .alignment(Alignment::Center)
        .block(Block::default().title("Beat").borders(Borders::ALL));
    f.render_widget(lights, chunks[2]);

    f.render_widget(
        Paragraph::new(status_line(snapshot)).alignment(Alignment::Center),
        chunks[3],
    );

    let instructions = Paragraph::new(Span::styled(
        "Space: Start/Stop | Arrows: +/-1 BPM | PgUp/PgDn: +/-10 | Q: Quit",
        Style::default().fg(Color::Yellow),
    ));
    let instructions_block = Block::default().title("Controls").borders(Borders::ALL);
    f.render_widget(instructions.block(instructions_block), chunks[4]);
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)
}

/// Draws the widget and forwards key presses until the user quits.
pub fn run_tui_event_loop(
    shared_state: SharedState,
    message_tx: Sender<EngineMessage>,
) -> Result<(), Box<dyn Error>> {
    log::info!("Starting TUI event loop");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = drive(&mut terminal, &shared_state, &message_tx);

    restore_terminal()?;
    terminal.show_cursor()?;
    log::info!("Terminal restored, TUI event loop finished");
    result
}

fn drive<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    shared_state: &SharedState,
    message_tx: &Sender<EngineMessage>,
) -> Result<(), Box<dyn Error>> {
    loop {
        let snapshot = shared_state
            .lock()
            .map_err(|_| "shared state lock poisoned")?
            .clone();
        terminal.draw(|f| render_ui(f, &snapshot))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key_event) = event::read()? {
            log::debug!("Key event received: {:?}", key_event);
            if let Some(message) = map_key_event(key_event) {
                message_tx.send(message)?;
                if message == EngineMessage::Quit {
                    return Ok(());
                }
            }
        }
    }
}
