//! Terminal viewer for symtext documents
//!
//! Shows a document rebuilt from terminal symbols with the active element highlighted. Every
//! key press regenerates the symbol sequence and reconciles it against what is on screen; the
//! status line reports what the reconciliation touched.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p tui-symview -- settings.json
//! cargo run -p tui-symview -- --moves
//! ```
//!
//! # Environment
//!
//! - `SYMTEXT_INDENT`: indent width for JSON documents (default 2)
//! - `SYMTEXT_LOG_FILE`: write `tracing` output to this file, filtered by `RUST_LOG`
//!
//! # Keys
//!
//! - Left/Right: previous/next setting or move
//! - a: play the next scripted move after the active one
//! - v: play a scripted alternative as a variation
//! - p: promote the active move to the main line
//! - d: delete the active move and everything after it
//! - q / Esc: quit

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    env,
    error::Error,
    fs,
    io::{self, stdout},
    ops::Range,
    process,
    sync::Mutex,
    time::Duration,
};
use symtext_core::{
    DocumentView, ReconcileOutcome, RenderSurface, RopeSurface, TextElement, ViewChange,
};
use symtext_json::{JsonFormatOptions, JsonToken, SettingsDocument, key_at};
use symtext_movelist::{MoveCursor, MoveListWalker, MoveSymbol, MoveTree};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

type DemoResult<T> = Result<T, Box<dyn Error>>;

/// Moves played by `a`, indexed by ply.
const MAIN_LINE: [&str; 20] = [
    "e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Ba4", "Nf6", "O-O", "Be7", "Re1", "b5", "Bb3", "d6",
    "c3", "O-O", "h3", "Nb8", "d4", "Nbd7",
];

/// Moves played by `v`, indexed by ply.
const ALTERNATIVES: [&str; 20] = [
    "d4", "c5", "Bc4", "d6", "Bc4", "Nf6", "Bxc6", "d6", "d3", "Nxe4", "Qe2", "d6", "Bxc6", "O-O",
    "a4", "Bb7", "d4", "Na5", "d3", "c5",
];

/// The document on screen and the producer behind it.
enum Document {
    Settings {
        settings: SettingsDocument,
        pointers: Vec<String>,
        selected: usize,
        view: DocumentView<JsonToken, RopeSurface>,
    },
    Moves {
        walker: MoveListWalker,
        cursor: MoveCursor,
        view: DocumentView<MoveSymbol, RopeSurface>,
    },
}

impl Document {
    fn settings(settings: SettingsDocument) -> Self {
        let mut view = DocumentView::new(RopeSurface::new());
        view.subscribe(log_change);
        Document::Settings {
            pointers: settings.member_pointers(),
            settings,
            selected: 0,
            view,
        }
    }

    fn moves() -> DemoResult<Self> {
        let mut walker = MoveListWalker::new(MoveTree::new());
        let tree = walker.tree_mut();
        let first = tree.add_move(tree.root(), MAIN_LINE[0])?;
        let last = tree.add_line(first, MAIN_LINE[1..8].iter().copied())?;
        tree.add_line(first, ["c5", "Nf3", "d6"])?;

        let mut cursor = MoveCursor::new(walker.tree());
        cursor.goto(walker.tree(), last)?;

        let mut view = DocumentView::new(RopeSurface::new());
        view.subscribe(log_change);
        Ok(Document::Moves {
            walker,
            cursor,
            view,
        })
    }

    fn surface(&self) -> &RopeSurface {
        match self {
            Document::Settings { view, .. } => view.surface(),
            Document::Moves { view, .. } => view.surface(),
        }
    }

    fn active_range(&self) -> Option<Range<usize>> {
        match self {
            Document::Settings { view, .. } => view.active_element().map(TextElement::range),
            Document::Moves { view, .. } => view.active_element().map(TextElement::range),
        }
    }

    fn version(&self) -> u64 {
        match self {
            Document::Settings { view, .. } => view.version(),
            Document::Moves { view, .. } => view.version(),
        }
    }

    fn is_moves(&self) -> bool {
        matches!(self, Document::Moves { .. })
    }

    /// Regenerate the symbols and reconcile the view against them.
    fn refresh(&mut self) -> DemoResult<ReconcileOutcome> {
        match self {
            Document::Settings {
                settings,
                pointers,
                selected,
                view,
            } => {
                let pointer = pointers.get(*selected).map_or("", String::as_str);
                Ok(view.refresh_from(settings, key_at(pointer))?)
            }
            Document::Moves {
                walker,
                cursor,
                view,
            } => Ok(view.refresh_from(walker, cursor.is_active())?),
        }
    }

    fn step(&mut self, forward: bool) -> DemoResult<()> {
        match self {
            Document::Settings {
                pointers, selected, ..
            } => {
                *selected = if forward {
                    (*selected + 1).min(pointers.len().saturating_sub(1))
                } else {
                    selected.saturating_sub(1)
                };
            }
            Document::Moves { walker, cursor, .. } => {
                if forward {
                    cursor.forward(walker.tree())?;
                } else {
                    cursor.back(walker.tree())?;
                }
            }
        }
        Ok(())
    }

    fn play(&mut self, script: &[&str]) -> DemoResult<()> {
        let Document::Moves { walker, cursor, .. } = self else {
            return Err("moves can only be played in a move list".into());
        };
        let ply = walker.tree().ply(cursor.active())?;
        let san = script
            .get(ply)
            .map_or_else(|| format!("m{}", ply + 1), |san| san.to_string());
        cursor.play(walker.tree_mut(), &san)?;
        Ok(())
    }

    fn promote(&mut self) -> DemoResult<()> {
        let Document::Moves { walker, cursor, .. } = self else {
            return Err("only moves can be promoted".into());
        };
        walker.tree_mut().promote(cursor.active())?;
        Ok(())
    }

    fn delete(&mut self) -> DemoResult<()> {
        let Document::Moves { walker, cursor, .. } = self else {
            return Err("only moves can be deleted".into());
        };
        cursor.delete_active(walker.tree_mut())?;
        Ok(())
    }
}

fn log_change(change: &ViewChange) {
    tracing::debug!(
        kind = ?change.kind,
        old_version = change.old_version,
        new_version = change.new_version,
        region = ?change.affected_region,
        "view changed"
    );
}

fn describe(outcome: &ReconcileOutcome, version: u64) -> String {
    if outcome.is_noop() {
        return format!("v{version} | text unchanged | caret {}", outcome.caret);
    }
    let removed = outcome
        .removed
        .as_ref()
        .map_or_else(|| "-".to_string(), |r| format!("{}..{}", r.start, r.end));
    format!(
        "v{version} | kept {} | removed {} | +{} elements ({} chars) | caret {}",
        outcome.agree_index,
        removed,
        outcome.inserted_elements,
        outcome.inserted_chars,
        outcome.caret
    )
}

/// Split `text` so the part overlapping `active` (document offsets) is highlighted.
fn highlight_line(text: &str, line_start: usize, active: Option<&Range<usize>>) -> Line<'static> {
    let len = text.chars().count();
    let Some(active) = active else {
        return Line::from(text.to_string());
    };
    let start = active.start.saturating_sub(line_start).min(len);
    let end = active.end.saturating_sub(line_start).min(len);
    if start >= end {
        return Line::from(text.to_string());
    }

    let byte_at = |col: usize| text.char_indices().nth(col).map_or(text.len(), |(i, _)| i);
    let (start, end) = (byte_at(start), byte_at(end));
    Line::from(vec![
        Span::raw(text[..start].to_string()),
        Span::styled(
            text[start..end].to_string(),
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(text[end..].to_string()),
    ])
}

struct App {
    document: Document,
    title: String,
    should_quit: bool,
    status_message: String,
    scroll_top: usize,
}

impl App {
    fn new(target: &str) -> DemoResult<Self> {
        let (document, title) = if target == "--moves" {
            (Document::moves()?, "move list".to_string())
        } else {
            let text = fs::read_to_string(target)?;
            let settings = SettingsDocument::parse(&text)?.with_options(format_options_from_env());
            (Document::settings(settings), target.to_string())
        };

        let mut app = Self {
            document,
            title,
            should_quit: false,
            status_message: String::new(),
            scroll_top: 0,
        };
        app.refresh();
        Ok(app)
    }

    fn refresh(&mut self) {
        self.status_message = match self.document.refresh() {
            Ok(outcome) => describe(&outcome, self.document.version()),
            Err(err) => {
                tracing::warn!(%err, "refresh failed");
                format!("error: {err}")
            }
        };
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let result = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Left => self.document.step(false),
            KeyCode::Right => self.document.step(true),
            KeyCode::Char('a') => self.document.play(&MAIN_LINE),
            KeyCode::Char('v') => self.document.play(&ALTERNATIVES),
            KeyCode::Char('p') => self.document.promote(),
            KeyCode::Char('d') => self.document.delete(),
            _ => return,
        };
        match result {
            Ok(()) => self.refresh(),
            Err(err) => self.status_message = format!("error: {err}"),
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_document(frame, chunks[0]);
        self.render_status_line(frame, chunks[1]);
        self.render_shortcuts(frame, chunks[2]);
    }

    fn render_document(&mut self, frame: &mut Frame, area: Rect) {
        let surface = self.document.surface();
        let inner_height = area.height.saturating_sub(2) as usize;
        let (caret_line, caret_col) = surface.offset_to_position(surface.caret_position());

        // Keep the caret line visible.
        if caret_line < self.scroll_top {
            self.scroll_top = caret_line;
        } else if inner_height > 0 && caret_line >= self.scroll_top + inner_height {
            self.scroll_top = caret_line + 1 - inner_height;
        }

        let active = self.document.active_range();
        let last_line = (self.scroll_top + inner_height).min(surface.line_count());
        let lines: Vec<Line> = (self.scroll_top..last_line)
            .map(|line| {
                let text = surface.line_text(line).unwrap_or_default();
                highlight_line(&text, surface.line_to_offset(line), active.as_ref())
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", self.title)),
        );
        frame.render_widget(paragraph, area);

        if inner_height == 0 || area.width < 3 {
            return;
        }
        let caret_text = surface.line_text(caret_line).unwrap_or_default();
        let prefix: String = caret_text.chars().take(caret_col).collect();
        let inner_right = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1).saturating_add(prefix.width() as u16).min(inner_right);
        let y = area.y + 1 + (caret_line - self.scroll_top) as u16;
        frame.set_cursor_position((x, y));
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let status_line = Paragraph::new(self.status_message.as_str()).style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status_line, area);
    }

    fn render_shortcuts(&self, frame: &mut Frame, area: Rect) {
        let shortcuts = if self.document.is_moves() {
            "Left/Right:move  a:play  v:variation  p:promote  d:delete  q:quit"
        } else {
            "Left/Right:setting  q:quit"
        };
        let shortcuts_line =
            Paragraph::new(shortcuts).style(Style::default().bg(Color::Blue).fg(Color::White));
        frame.render_widget(shortcuts_line, area);
    }
}

fn format_options_from_env() -> JsonFormatOptions {
    let mut options = JsonFormatOptions::default();
    if let Some(indent) = env::var("SYMTEXT_INDENT")
        .ok()
        .and_then(|value| value.trim().parse().ok())
    {
        options.indent = indent;
    }
    options
}

/// Log to `SYMTEXT_LOG_FILE` if set; the terminal belongs to the UI.
fn init_tracing() -> io::Result<()> {
    let Ok(path) = env::var("SYMTEXT_LOG_FILE") else {
        return Ok(());
    };
    let file = fs::File::create(path)?;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("tui-symview", String::as_str);
    let Some(target) = args.get(1) else {
        eprintln!("usage: {program} <file.json>");
        eprintln!("       {program} --moves");
        process::exit(1);
    };

    init_tracing()?;

    let mut app = match App::new(target) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key_event(key);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_line_splits_active_range() {
        let line = highlight_line("1. e4 e5", 0, Some(&(3..5)));
        assert_eq!(text_of(&line), vec!["1. ", "e4", " e5"]);
    }

    #[test]
    fn test_highlight_line_outside_range() {
        let line = highlight_line("  \"b\": 2", 10, Some(&(0..4)));
        assert_eq!(text_of(&line), vec!["  \"b\": 2"]);
    }

    #[test]
    fn test_moves_document_navigation() {
        let mut document = Document::moves().unwrap();
        document.refresh().unwrap();
        let initial = document.surface().text();
        assert!(initial.starts_with("1. e4 e5 (1... c5 2. Nf3 d6) 2. Nf3"));

        document.step(false).unwrap();
        assert!(document.refresh().unwrap().is_noop());

        document.delete().unwrap();
        let outcome = document.refresh().unwrap();
        assert_eq!(outcome.removed.map(|r| r.end), Some(initial.chars().count()));
        assert!(initial.starts_with(&document.surface().text()));
    }

    #[test]
    fn test_settings_document_rejects_move_keys() {
        let settings = SettingsDocument::parse(r#"{"a": 1}"#).unwrap();
        let mut document = Document::settings(settings);
        assert!(document.play(&MAIN_LINE).is_err());
        document.step(true).unwrap();
        document.refresh().unwrap();
        assert_eq!(document.active_range(), Some(4..7));
    }
}
