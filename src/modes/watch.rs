//! Terminal mode for watching the autopilot fill the grid
//!
//! # Controls
//!
//! - Space: Start, then pause/unpause
//! - R: Reset the run
//! - +/-: Faster/slower ticks
//! - ]/[: Larger/smaller grid (resets)
//! - P: Show/hide the Hamiltonian path
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use super::scheduler::TickScheduler;
use crate::game::{AgentState, GameConfig, GameEngine, RunState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::RunMetrics;
use crate::render::{Hud, Renderer};

/// Change applied to the tick interval per speed key press
const SPEED_STEP: Duration = Duration::from_millis(25);
const MIN_TICK: Duration = Duration::from_millis(10);
const MAX_TICK: Duration = Duration::from_millis(1000);

pub const MIN_GRID: usize = 2;
pub const MAX_GRID: usize = 20;

pub struct WatchMode {
    engine: GameEngine,
    state: AgentState,
    metrics: RunMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    scheduler: TickScheduler,
    show_path: bool,
    should_quit: bool,
}

impl WatchMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let scheduler = TickScheduler::new(config.tick_interval());
        let show_path = config.show_path;

        let mut engine = GameEngine::new(config).context("Invalid game configuration")?;
        let state = engine.reset().context("Failed to place the first target")?;

        Ok(Self {
            engine,
            state,
            metrics: RunMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            scheduler,
            show_path,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run watch loop with cleanup
        let result = self.run_watch_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_watch_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Planner tick; pending while paused
                _ = self.scheduler.tick() => {
                    self.on_tick();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let hud = self.hud();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.state,
                            self.engine.tour(),
                            &self.metrics,
                            &hud,
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.handle_action(action)?;
        }

        Ok(())
    }

    fn handle_action(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::StartPause => self.toggle_running(),
            KeyAction::Reset => self.restart(self.state.grid_size)?,
            KeyAction::Faster => self.change_speed(|tick| tick.saturating_sub(SPEED_STEP)),
            KeyAction::Slower => self.change_speed(|tick| tick + SPEED_STEP),
            KeyAction::Grow => {
                let size = (self.state.grid_size + 2).min(MAX_GRID);
                self.restart(size)?;
            }
            KeyAction::Shrink => {
                let size = self.state.grid_size.saturating_sub(2).max(MIN_GRID);
                self.restart(size)?;
            }
            KeyAction::TogglePath => self.show_path = !self.show_path,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }

        Ok(())
    }

    fn toggle_running(&mut self) {
        match self.state.run_state {
            RunState::Idle => {
                self.state.start();
                self.resume();
            }
            RunState::Running if self.scheduler.is_active() => self.pause(),
            RunState::Running => self.resume(),
            RunState::Finished | RunState::Blocked => {}
        }
    }

    fn resume(&mut self) {
        self.scheduler.start();
        self.metrics.on_resume();
    }

    fn pause(&mut self) {
        self.scheduler.pause();
        self.metrics.on_pause();
    }

    fn on_tick(&mut self) {
        if !self.state.is_running() {
            self.pause();
            return;
        }

        match self.engine.step(&mut self.state) {
            Ok(result) => {
                self.metrics.record(&result);
                if result.finished {
                    self.pause();
                    info!(
                        steps = self.state.steps,
                        time = %self.metrics.format_time(),
                        "grid filled"
                    );
                }
            }
            Err(err) => {
                self.pause();
                warn!(%err, "run stopped");
            }
        }
    }

    fn change_speed(&mut self, adjust: impl FnOnce(Duration) -> Duration) {
        let tick = adjust(self.scheduler.period()).clamp(MIN_TICK, MAX_TICK);
        self.scheduler.set_period(tick);
    }

    /// Stop ticking before the state is rebuilt so no stale tick lands on it
    fn restart(&mut self, grid_size: usize) -> Result<()> {
        self.scheduler.pause();
        self.state = self
            .engine
            .resize(grid_size)
            .with_context(|| format!("Failed to reset a {0}x{0} grid", grid_size))?;
        self.metrics.on_reset();
        Ok(())
    }

    fn hud(&self) -> Hud {
        Hud {
            show_path: self.show_path,
            paused: !self.scheduler.is_active(),
            tick_interval: self.scheduler.period(),
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(grid_size: usize) -> WatchMode {
        let config = GameConfig {
            seed: Some(1),
            ..GameConfig::new(grid_size)
        };
        WatchMode::new(config).unwrap()
    }

    #[test]
    fn test_watch_initialization() {
        let mode = mode(6);
        assert_eq!(mode.state.run_state, RunState::Idle);
        assert_eq!(mode.state.grid_size, 6);
        assert!(!mode.scheduler.is_active());
        assert!(mode.show_path);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(WatchMode::new(GameConfig::new(5)).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_and_pause() {
        let mut mode = mode(4);

        mode.handle_action(KeyAction::StartPause).unwrap();
        assert!(mode.state.is_running());
        assert!(mode.scheduler.is_active());
        assert!(!mode.hud().paused);

        mode.handle_action(KeyAction::StartPause).unwrap();
        assert!(mode.state.is_running());
        assert!(!mode.scheduler.is_active());
        assert!(mode.hud().paused);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_until_grid_is_full() {
        let mut mode = mode(4);
        mode.handle_action(KeyAction::StartPause).unwrap();

        while mode.scheduler.is_active() {
            mode.scheduler.tick().await;
            mode.on_tick();
        }

        assert!(mode.state.is_finished());
        assert_eq!(mode.state.len(), 16);
        assert_eq!(mode.metrics.steps, mode.state.steps);
        assert_eq!(mode.metrics.apples, 15);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_stops_ticks() {
        let mut mode = mode(4);
        mode.handle_action(KeyAction::StartPause).unwrap();
        mode.on_tick();
        assert_eq!(mode.state.steps, 1);

        mode.handle_action(KeyAction::Reset).unwrap();
        assert_eq!(mode.state.run_state, RunState::Idle);
        assert_eq!(mode.state.steps, 0);
        assert_eq!(mode.metrics.steps, 0);
        assert!(!mode.scheduler.is_active());
    }

    #[test]
    fn test_grid_size_keys_stay_in_range() {
        let mut mode = mode(4);

        mode.handle_action(KeyAction::Grow).unwrap();
        assert_eq!(mode.state.grid_size, 6);
        assert_eq!(mode.engine.tour().len(), 36);

        mode.handle_action(KeyAction::Shrink).unwrap();
        mode.handle_action(KeyAction::Shrink).unwrap();
        mode.handle_action(KeyAction::Shrink).unwrap();
        assert_eq!(mode.state.grid_size, MIN_GRID);

        let mut large = self::mode(MAX_GRID);
        large.handle_action(KeyAction::Grow).unwrap();
        assert_eq!(large.state.grid_size, MAX_GRID);
    }

    #[test]
    fn test_speed_keys_clamp() {
        let mut mode = mode(4);
        assert_eq!(mode.scheduler.period(), Duration::from_millis(150));

        mode.handle_action(KeyAction::Faster).unwrap();
        assert_eq!(mode.scheduler.period(), Duration::from_millis(125));

        for _ in 0..20 {
            mode.handle_action(KeyAction::Faster).unwrap();
        }
        assert_eq!(mode.scheduler.period(), MIN_TICK);

        for _ in 0..60 {
            mode.handle_action(KeyAction::Slower).unwrap();
        }
        assert_eq!(mode.scheduler.period(), MAX_TICK);
    }

    #[test]
    fn test_toggle_path_and_quit() {
        let mut mode = mode(4);
        mode.handle_action(KeyAction::TogglePath).unwrap();
        assert!(!mode.hud().show_path);

        mode.handle_action(KeyAction::Quit).unwrap();
        assert!(mode.should_quit);
    }
}
