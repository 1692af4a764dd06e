// Terminal application: menu and game loop around a Session

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::{backend::Backend, layout::Rect, Frame, Terminal};
use tracing::{debug, info, warn};

use crate::clock::{FrameClock, Tick};
use crate::config::{save_config, Config};
use crate::game::Player;
use crate::input::{KeyTracker, PointerTracker};
use crate::menu::{handle_menu_key, render_menu, AppState, MenuAction, MenuState};
use crate::session::{InputSnapshot, Session};
use crate::ui::{court_area, court_orientation, render, GameView};

/// Sleep off whatever is left of this frame's time slice
pub fn limit_frame_rate(frame_start: Instant, frame_duration: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame_duration {
        std::thread::sleep(frame_duration - elapsed);
    }
}

pub struct App {
    session: Session,
    config: Config,
    /// Where control changes are saved; None keeps them in memory only
    config_path: Option<PathBuf>,
    state: AppState,
    menu: MenuState,
    clock: FrameClock,
    keys: KeyTracker,
    pointer: PointerTracker,
    frame_duration: Duration,
    started: Instant,
    /// Court area from the last layout, for mapping mouse events
    court: Rect,
}

impl App {
    /// `release_events` tells whether the terminal reports key releases
    pub fn new(
        session: Session,
        config: Config,
        config_path: Option<PathBuf>,
        release_events: bool,
    ) -> Self {
        let timing = &config.timing;
        let hold = (!release_events).then(|| Duration::from_millis(timing.key_hold_ms));
        let frame_duration = Duration::from_millis(1000 / timing.target_fps.max(1));

        Self {
            clock: FrameClock::new(timing.min_tick_ms, timing.stall_ms),
            keys: KeyTracker::new(hold),
            pointer: PointerTracker::new(Duration::from_millis(timing.pointer_throttle_ms)),
            frame_duration,
            session,
            config,
            config_path,
            state: AppState::Menu,
            menu: MenuState::new(),
            started: Instant::now(),
            court: Rect::default(),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until the player quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Frame loop started at {} fps", self.config.timing.target_fps);

        while self.state != AppState::Exiting {
            let frame_start = Instant::now();

            while event::poll(Duration::ZERO).context("Failed to poll terminal events")? {
                let event = event::read().context("Failed to read terminal event")?;
                self.handle_event(event, Instant::now());
            }

            self.update(frame_start);
            self.draw(terminal)?;

            limit_frame_rate(frame_start, self.frame_duration);
        }

        info!("Frame loop stopped");
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Press
            && key.code == KeyCode::Char('c')
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.state = AppState::Exiting;
            return;
        }

        match self.state {
            AppState::Playing => self.handle_game_key(key, now),
            AppState::Menu if key.kind == KeyEventKind::Press => {
                let game_active = self.session.has_game();
                let action = handle_menu_key(
                    &mut self.menu,
                    self.session.controls_mut(),
                    game_active,
                    key.code,
                );
                self.apply_menu_action(action);
            }
            _ => {}
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent, now: Instant) {
        let fresh = match self.keys.handle(&key, now) {
            Some(fresh) => fresh,
            None => return,
        };

        match fresh.as_str() {
            "Escape" => self.open_menu(),
            "q" | "Q" => self.state = AppState::Exiting,
            _ => {
                let finished = self
                    .session
                    .game()
                    .and_then(|game| game.winner())
                    .is_some();
                if finished {
                    self.start_new_game();
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.state != AppState::Playing {
            return;
        }
        let orientation = court_orientation(self.court);
        if let Some(player) = self.pointer.handle(&mouse, self.court, orientation, now) {
            debug!("Pointer target for {}: {:?}", player.label(), self.pointer.targets().get(player));
        }
    }

    fn apply_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::None => {}
            MenuAction::NewGame => self.start_new_game(),
            MenuAction::Continue => self.resume(),
            MenuAction::ControlsChanged => self.save_controls(),
            MenuAction::Quit => self.state = AppState::Exiting,
        }
    }

    fn start_new_game(&mut self) {
        self.session.new_game();
        self.resume();
    }

    fn resume(&mut self) {
        if !self.session.has_game() {
            return;
        }
        self.state = AppState::Playing;
        self.clock.reset();
        self.keys.clear();
        self.pointer.clear();
    }

    fn open_menu(&mut self) {
        self.state = AppState::Menu;
        self.menu.open_main();
        self.keys.clear();
    }

    /// Persist the current controllers so the next launch starts with them
    fn save_controls(&mut self) {
        for player in Player::ALL {
            let setting = self.session.controls().get(player).setting();
            self.config.controls.set(player, setting);
        }

        if let Some(path) = &self.config_path {
            if let Err(e) = save_config(path, &self.config) {
                warn!("Failed to save controls to {}: {}", path.display(), e);
            }
        }
    }

    /// Advance the game by however many frames the clock grants
    pub fn update(&mut self, now: Instant) {
        if self.state != AppState::Playing {
            return;
        }

        let now_ms = now.saturating_duration_since(self.started).as_secs_f64() * 1000.0;
        let frames = match self.clock.tick(now_ms) {
            Tick::Advance(frames) => frames,
            Tick::Skip | Tick::Stalled => return,
        };

        let inputs = InputSnapshot {
            active_keys: self.keys.active_keys(now),
            pointer_targets: self.pointer.targets(),
        };
        let events = self.session.step(&inputs, frames);
        if let Some(player) = events.goal_scored {
            debug!("Goal for {}", player.label());
        }
    }

    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let size = terminal.size().context("Failed to read terminal size")?;
        self.court = court_area(Rect::new(0, 0, size.width, size.height));

        terminal
            .draw(|f| self.render_frame(f))
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn render_frame(&self, frame: &mut Frame) {
        match (self.state, self.session.game()) {
            (AppState::Playing, Some(game)) => {
                let snapshot = game.snapshot();
                let view = GameView {
                    snapshot: &snapshot,
                    paused: game.is_paused(),
                };
                render(frame, view, &self.config.display);
            }
            _ => render_menu(
                frame,
                &self.menu,
                self.session.controls(),
                self.session.has_game(),
            ),
        }
    }
}
