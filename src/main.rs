mod ui;

use crossterm::event::{self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use pairs::core::DRIVER_POLL_INTERVAL_MS;
use pairs::view::dispatch;
use pairs::{build_info, GameConfig, GameSession, GridSize, SaveStore, SelectOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use ui::board_scene::render_board_scene;
use ui::{BoardInput, TerminalView};

#[derive(Debug, Default)]
struct Args {
    grid: Option<GridSize>,
    seed: Option<u64>,
    data_dir: Option<PathBuf>,
    fresh: bool,
}

fn print_help() {
    println!("Pairs - matching-pairs memory game\n");
    println!("Usage: pairs [options]\n");
    println!("Options:");
    println!("  --width N        Grid width for a new game");
    println!("  --height N       Grid height for a new game");
    println!("  --seed N         Seed the shuffle");
    println!("  --data-dir PATH  Keep the save slot in PATH");
    println!("  --new            Ignore any saved game");
    println!("  --version        Show version information");
    println!("  --help           Show this help message");
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> T {
    match value.as_deref().map(str::parse) {
        Some(Ok(n)) => n,
        _ => {
            eprintln!("{} expects a number", flag);
            std::process::exit(1);
        }
    }
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut width = None;
    let mut height = None;
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--width" => width = Some(parse_number::<u32>("--width", iter.next())),
            "--height" => height = Some(parse_number::<u32>("--height", iter.next())),
            "--seed" => args.seed = Some(parse_number::<u64>("--seed", iter.next())),
            "--data-dir" => match iter.next() {
                Some(path) => args.data_dir = Some(PathBuf::from(path)),
                None => {
                    eprintln!("--data-dir expects a path");
                    std::process::exit(1);
                }
            },
            "--new" => args.fresh = true,
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'pairs --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    if width.is_some() || height.is_some() {
        let default = GridSize::default();
        args.grid = Some(GridSize::new(
            width.unwrap_or(default.width),
            height.unwrap_or(default.height),
        ));
    }
    args
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Logs go to stderr so they do not tear the alternate screen
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn open_store(data_dir: Option<PathBuf>) -> Option<SaveStore> {
    let store = match data_dir {
        Some(dir) => SaveStore::in_dir(dir),
        None => SaveStore::new(),
    };
    match store {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(error = %e, "save slot unavailable; progress will not persist");
            None
        }
    }
}

fn map_key(code: KeyCode) -> BoardInput {
    match code {
        KeyCode::Up | KeyCode::Char('k') => BoardInput::Up,
        KeyCode::Down | KeyCode::Char('j') => BoardInput::Down,
        KeyCode::Left | KeyCode::Char('h') => BoardInput::Left,
        KeyCode::Right | KeyCode::Char('l') => BoardInput::Right,
        KeyCode::Enter | KeyCode::Char(' ') => BoardInput::Select,
        KeyCode::Char('s') | KeyCode::Char('S') => BoardInput::Save,
        KeyCode::Char('n') | KeyCode::Char('N') => BoardInput::NewGame,
        KeyCode::Char('g') | KeyCode::Char('G') => BoardInput::NextGrid,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => BoardInput::Quit,
        _ => BoardInput::Other,
    }
}

/// Save and report the outcome in the status line. Failures never stop play.
fn save_game(session: &GameSession, view: &mut TerminalView) {
    match session.save() {
        Ok(()) => view.set_status("Game saved"),
        Err(e) => {
            tracing::warn!(error = %e, "save failed");
            view.set_status("Save failed");
        }
    }
}

/// Losing focus is a save trigger. Finished games have nothing to keep.
fn on_focus_lost(session: &GameSession, view: &mut TerminalView) {
    if session.controller().is_game_over() {
        return;
    }
    tracing::debug!("terminal lost focus; saving");
    save_game(session, view);
}

fn main() -> io::Result<()> {
    let args = parse_args();
    init_tracing();

    let store = open_store(args.data_dir);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let clock = Instant::now();
    let now = || clock.elapsed().as_secs_f64();

    let config = GameConfig::default();
    let grid = args.grid.unwrap_or_default();
    let mut session = if args.fresh || args.grid.is_some() {
        GameSession::start(config, grid, store, &mut rng)
    } else {
        GameSession::load_or_new(config, grid, store, &mut rng, now())
    };

    let mut view = TerminalView::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session, &mut view, &mut rng, &now);

    // Quitting is a save trigger; a finished game has nothing to keep
    session.shutdown();
    if let Err(e) = session.save() {
        tracing::warn!(error = %e, "save on exit failed");
    }

    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableFocusChange)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut GameSession,
    view: &mut TerminalView,
    rng: &mut StdRng,
    now: &dyn Fn() -> f64,
) -> io::Result<()> {
    loop {
        session.tick(now());
        let events = session.drain_events();
        dispatch(session, &events, view);

        terminal.draw(|frame| render_board_scene(frame, view))?;

        if !event::poll(Duration::from_millis(DRIVER_POLL_INTERVAL_MS))? {
            continue;
        }
        let key = match event::read()? {
            Event::Key(key) => key,
            Event::FocusLost => {
                on_focus_lost(session, view);
                continue;
            }
            _ => continue,
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match map_key(key.code) {
            BoardInput::Up => view.move_cursor(-1, 0),
            BoardInput::Down => view.move_cursor(1, 0),
            BoardInput::Left => view.move_cursor(0, -1),
            BoardInput::Right => view.move_cursor(0, 1),
            BoardInput::Select => {
                let index = view.cursor_index();
                if index < session.board().len() {
                    if let SelectOutcome::Ignored(reason) = session.select_card(index, now()) {
                        tracing::debug!(index, ?reason, "card not selectable");
                    }
                }
            }
            BoardInput::Save => save_game(session, view),
            BoardInput::NewGame => {
                let grid = session.grid();
                session.new_game(grid, rng);
                view.set_status(format!("New {} game", grid));
            }
            BoardInput::NextGrid => {
                // Changing the grid mid-game keeps the current game in the slot
                if !session.controller().is_game_over() {
                    save_game(session, view);
                }
                let grid = session.grid().next_preset();
                session.new_game(grid, rng);
                view.set_status(format!("New {} game", grid));
            }
            BoardInput::Quit => return Ok(()),
            BoardInput::Other => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    fn session_in(dir: &std::path::Path, config: GameConfig, grid: GridSize) -> (GameSession, SaveStore) {
        let store = SaveStore::in_dir(dir).expect("store");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        (GameSession::start(config, grid, Some(store.clone()), &mut rng), store)
    }

    #[test]
    fn test_focus_lost_saves_game_in_progress() {
        let temp = tempfile::tempdir().expect("tempdir");
        let (mut session, store) = session_in(temp.path(), GameConfig::default(), GridSize::new(2, 2));
        session.select_card(0, 0.0);
        let mut view = TerminalView::new();

        on_focus_lost(&session, &mut view);
        assert!(store.has_saved_game());
        assert_eq!(store.read().expect("read"), session.snapshot());
    }

    #[test]
    fn test_focus_lost_skips_finished_game() {
        let temp = tempfile::tempdir().expect("tempdir");
        let (mut session, store) = session_in(temp.path(), GameConfig::instant(), GridSize::new(2, 1));
        session.select_card(0, 0.0);
        session.select_card(1, 0.0);
        session.tick(0.0);
        let mut view = TerminalView::new();

        on_focus_lost(&session, &mut view);
        assert!(!store.has_saved_game());
    }

    #[test]
    fn test_map_key_bindings() {
        assert_eq!(map_key(KeyCode::Char(' ')), BoardInput::Select);
        assert_eq!(map_key(KeyCode::Char('s')), BoardInput::Save);
        assert_eq!(map_key(KeyCode::Esc), BoardInput::Quit);
        assert_eq!(map_key(KeyCode::Tab), BoardInput::Other);
    }
}
