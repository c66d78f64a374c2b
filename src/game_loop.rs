/// The fixed-tick loop: input → update → draw → sleep, forever.
///
/// `GameLoop` is the single owner of the simulation state and the surface.
/// Ticks are strictly sequential; the only other thread is the input
/// listener, reached exclusively through `InputChannel`.
///
/// Pacing is a plain sleep after each tick. Time spent updating and drawing
/// is not subtracted, so the real period is the tick rate plus frame work.

use std::process;
use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::config::GameConfig;
use crate::sim::state::SimulationState;
use crate::sim::step::{self, Flow};
use crate::ui::input::InputChannel;
use crate::ui::paint;
use crate::ui::surface::Surface;

pub struct GameLoop<S: Surface> {
    state: SimulationState,
    surface: S,
    input: InputChannel,
    config: GameConfig,
    sleep: Box<dyn FnMut(Duration)>,
}

impl<S: Surface> GameLoop<S> {
    pub fn new(state: SimulationState, surface: S, input: InputChannel, config: GameConfig) -> Self {
        GameLoop {
            state, surface, input, config,
            sleep: Box::new(thread::sleep),
        }
    }

    /// Replace the pause between ticks (`thread::sleep` by default).
    #[cfg(test)]
    pub fn with_sleep(mut self, sleep: impl FnMut(Duration) + 'static) -> Self {
        self.sleep = Box::new(sleep);
        self
    }

    /// One iteration minus the sleep.
    ///
    /// On quit the surface is shut down right away and nothing else runs.
    pub fn tick(&mut self) -> Flow {
        let key = self.input.try_next();

        if step::handle_input(&mut self.state, key.as_deref(), &self.config.keys) == Flow::Quit {
            if let Err(e) = self.surface.shutdown() {
                warn!("surface shutdown failed: {e}");
            }
            return Flow::Quit;
        }

        step::update(&mut self.state);
        if self.config.debug_overlay {
            let (_, height) = self.surface.size();
            step::refresh_overlay(&mut self.state, height);
        }

        if let Err(e) = paint::draw(&mut self.surface, &self.state, &self.config.frame) {
            warn!("present failed: {e}");
        }

        Flow::Continue
    }

    /// Tick, then sleep for the full tick rate, until the quit key arrives.
    /// Paused ticks sleep too, so the cadence never changes.
    pub fn run_until_quit(&mut self) {
        loop {
            if self.tick() == Flow::Quit {
                return;
            }
            (self.sleep)(self.config.tick_rate);
        }
    }

    /// Drive ticks until the quit key arrives, then exit the process with 0.
    pub fn run(mut self) -> ! {
        info!(
            "loop started: tick={:?} objects={} listener={}",
            self.config.tick_rate,
            self.state.objects.len(),
            self.input.listener_alive(),
        );

        self.run_until_quit();
        info!("quit after {} ticks", self.state.ticks);
        process::exit(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;
    use std::sync::mpsc::Sender;

    use crate::domain::object::GameObject;
    use crate::ui::surface::{Grid, Style};

    /// In-memory surface that counts lifecycle calls.
    struct Recording {
        grid: Grid,
        presents: usize,
        shutdowns: usize,
    }

    impl Recording {
        fn new(w: usize, h: usize) -> Self {
            Recording { grid: Grid::new(w, h), presents: 0, shutdowns: 0 }
        }
    }

    impl Surface for Recording {
        fn init(&mut self) -> io::Result<()> { Ok(()) }
        fn clear(&mut self) { self.grid.clear(); }
        fn set_cell(&mut self, col: i32, row: i32, glyph: char, style: Style) {
            self.grid.set_cell(col, row, glyph, style);
        }
        fn size(&self) -> (usize, usize) { self.grid.size() }
        fn present(&mut self) -> io::Result<()> {
            self.presents += 1;
            Ok(())
        }
        fn shutdown(&mut self) -> io::Result<()> {
            self.shutdowns += 1;
            Ok(())
        }
    }

    fn looper(objects: Vec<GameObject>, config: GameConfig) -> (Sender<String>, GameLoop<Recording>) {
        let (tx, input) = InputChannel::detached();
        let mut state = SimulationState::new();
        for o in objects { state.push(o); }
        (tx, GameLoop::new(state, Recording::new(8, 4), input, config))
    }

    #[test]
    fn tick_moves_and_redraws() {
        let (_tx, mut gl) = looper(
            vec![GameObject::new(1, 0, 1, 1, 'o').with_velocity(0, 2)],
            GameConfig::default(),
        );

        assert_eq!(gl.tick(), Flow::Continue);
        assert_eq!(gl.tick(), Flow::Continue);

        assert_eq!((gl.state.objects[0].row, gl.state.objects[0].col), (1, 4));
        assert_eq!(gl.surface.presents, 2);
        assert_eq!(gl.surface.grid.rows()[1], "    o   ");
    }

    #[test]
    fn pause_freezes_state_and_frame() {
        let (tx, mut gl) = looper(
            vec![GameObject::new(0, 0, 1, 1, 'o').with_velocity(0, 1)],
            GameConfig::default(),
        );
        gl.tick();
        tx.send("Rune[p]".into()).unwrap();
        for _ in 0..5 { gl.tick(); }

        assert!(gl.state.paused);
        assert_eq!(gl.state.objects[0].col, 1);
        assert_eq!(gl.surface.presents, 1);
        assert_eq!(gl.surface.grid.rows()[0], " o      ");

        tx.send("Rune[p]".into()).unwrap();
        gl.tick();
        assert!(!gl.state.paused);
        assert_eq!(gl.state.objects[0].col, 2);
        assert_eq!(gl.surface.presents, 2);
    }

    #[test]
    fn queued_events_are_consumed_one_per_tick() {
        let (tx, mut gl) = looper(Vec::new(), GameConfig::default());
        tx.send("Rune[p]".into()).unwrap();
        tx.send("Rune[p]".into()).unwrap();

        gl.tick();
        assert!(gl.state.paused, "first tick sees only the first event");
        gl.tick();
        assert!(!gl.state.paused);
        gl.tick();
        assert!(!gl.state.paused);
    }

    #[test]
    fn unread_events_stay_queued() {
        let (tx, mut gl) = looper(Vec::new(), GameConfig::default());
        tx.send("Up".into()).unwrap();
        tx.send("Rune[p]".into()).unwrap();

        gl.tick();
        assert!(!gl.state.paused);
        assert_eq!(gl.input.try_next().as_deref(), Some("Rune[p]"));
        assert_eq!(gl.input.try_next(), None);
    }

    #[test]
    fn quit_shuts_down_before_update_or_draw() {
        let (tx, mut gl) = looper(
            vec![GameObject::new(0, 0, 1, 1, 'o').with_velocity(1, 1)],
            GameConfig::default(),
        );
        tx.send("Rune[q]".into()).unwrap();

        assert_eq!(gl.tick(), Flow::Quit);
        assert_eq!(gl.surface.shutdowns, 1);
        assert_eq!(gl.surface.presents, 0);
        assert_eq!((gl.state.objects[0].row, gl.state.objects[0].col), (0, 0));
    }

    #[test]
    fn quit_is_seen_after_earlier_events() {
        let (tx, mut gl) = looper(Vec::new(), GameConfig::default());
        tx.send("Rune[x]".into()).unwrap();
        tx.send("Rune[q]".into()).unwrap();

        assert_eq!(gl.tick(), Flow::Continue);
        assert_eq!(gl.surface.shutdowns, 0);
        assert_eq!(gl.tick(), Flow::Quit);
        assert_eq!(gl.surface.shutdowns, 1);
    }

    #[test]
    fn every_tick_but_quit_sleeps_for_the_tick_rate() {
        let config = GameConfig::from_toml_str("tick_rate_ms = 40").unwrap();
        let (tx, gl) = looper(
            vec![GameObject::new(0, 0, 1, 1, 'o').with_velocity(0, 1)],
            config,
        );
        let sleeps = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&sleeps);
        let mut gl = gl.with_sleep(move |d| log.borrow_mut().push(d));

        tx.send("Rune[p]".into()).unwrap(); // pause
        tx.send("Up".into()).unwrap();      // paused tick
        tx.send("Rune[p]".into()).unwrap(); // resume
        tx.send("Rune[q]".into()).unwrap();
        gl.run_until_quit();

        assert_eq!(*sleeps.borrow(), vec![Duration::from_millis(40); 3]);
        assert_eq!(gl.state.objects[0].col, 1);
        assert_eq!(gl.surface.presents, 1);
        assert_eq!(gl.surface.shutdowns, 1);
    }

    #[test]
    fn default_cadence_is_75ms() {
        let (tx, gl) = looper(Vec::new(), GameConfig::default());
        let sleeps = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&sleeps);
        let mut gl = gl.with_sleep(move |d| log.borrow_mut().push(d));

        tx.send("Rune[x]".into()).unwrap();
        tx.send("Rune[q]".into()).unwrap();
        gl.run_until_quit();

        assert_eq!(*sleeps.borrow(), vec![Duration::from_millis(75)]);
    }

    #[test]
    fn overlay_reports_live_surface_height() {
        let config = GameConfig::from_toml_str("[debug]\noverlay = true").unwrap();
        let (_tx, mut gl) = looper(
            vec![GameObject::new(2, 6, 1, 1, 'o').with_velocity(1, 0)],
            config,
        );
        gl.tick();
        // After one update the object sits on row 3 of a 4-row surface.
        assert_eq!(gl.state.debug_text, "tick:1 objects:1 wall-ahead:1");
    }
}
