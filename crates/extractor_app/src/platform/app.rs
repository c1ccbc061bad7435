use std::io;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event, KeyEventKind};
use engine_logging::{engine_debug, engine_info};
use extractor_core::{update, AppState, Msg};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::terminal::TerminalGuard;
use super::ui::keys::{translate, translate_paste, UiAction};
use super::ui::render::{render, ScrollState};

const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    logging::initialize(&config.log_file, config.log_level);
    engine_info!("Starting extractor, output_dir={}", config.output_dir.display());

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(&config, msg_tx);

    let _guard = TerminalGuard::enter().context("failed to prepare terminal")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(io::stdout())).context("failed to open terminal")?;
    terminal.clear()?;

    let mut shell = Shell {
        state: AppState::new(),
        runner,
        msg_rx,
        scroll: ScrollState::default(),
        quit: false,
    };
    shell.run(&mut terminal)?;
    engine_info!("Extractor exiting");
    Ok(())
}

struct Shell {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    scroll: ScrollState,
    quit: bool,
}

impl Shell {
    fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
        self.draw(terminal)?;
        while !self.quit {
            let mut redraw = false;
            if event::poll(POLL_INTERVAL)? {
                redraw |= self.handle_event(event::read()?);
            }
            while let Ok(msg) = self.msg_rx.try_recv() {
                self.dispatch(msg);
            }
            redraw |= self.state.consume_dirty();
            if redraw && !self.quit {
                self.draw(terminal)?;
            }
        }
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        let view = self.state.view();
        let scroll = &mut self.scroll;
        terminal.draw(|frame| render(frame, &view, scroll))?;
        Ok(())
    }

    /// Returns true when the event changed presentation-only state.
    fn handle_event(&mut self, event: Event) -> bool {
        let view = self.state.view();
        let action = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => translate(key, &view),
            Event::Paste(text) => translate_paste(&text, &view),
            Event::Resize(..) => return true,
            _ => UiAction::Ignore,
        };
        match action {
            UiAction::Dispatch(msg) => {
                self.dispatch(msg);
                false
            }
            UiAction::Scroll(delta) => {
                self.scroll.apply(delta, view.viewer.is_some());
                true
            }
            UiAction::Quit => {
                self.quit = true;
                false
            }
            UiAction::Ignore => false,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        engine_debug!("dispatch {:?}", msg);
        let was_open = self.state.is_viewer_open();
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;
        if !was_open && self.state.is_viewer_open() {
            self.scroll.viewer = 0;
        }
        self.runner.run(effects);
    }
}
