//! Fixed-Timestep Clock
//!
//! The simulation always advances in whole steps of `step` seconds. Real
//! frame time goes into an accumulator; every full step in it runs one
//! update, and whatever is left carries over to the next frame. Render runs
//! once per frame after the catch-up loop, with the raw frame delta.
//!
//! There is no interpolation and no clamp on long frames: after a stall the
//! clock runs as many updates as the stall covered.

/// Receiver of clock callbacks, implemented by the host.
pub trait FrameHandler {
    /// One fixed simulation step of `dt` seconds.
    fn update(&mut self, dt: f64);
    /// Called once per frame after all updates, with the frame's real delta.
    fn render(&mut self, frame_dt: f64);
}

/// Fixed-step accumulator loop with start/stop control.
#[derive(Debug, Clone)]
pub struct GameClock {
    step: f64,
    accumulator: f64,
    /// Timestamp of the previous frame (None until the first frame)
    last_time: Option<f64>,
    running: bool,
}

impl GameClock {
    pub fn new(step: f64) -> Self {
        Self {
            step,
            accumulator: 0.0,
            last_time: None,
            running: false,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Leftover time that hasn't made up a full step yet.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Begin running. `now` becomes the reference for the first frame delta.
    /// Calling start on a running clock does nothing.
    pub fn start(&mut self, now: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_time = Some(now);
        self.accumulator = 0.0;
        log::debug!("clock started at {now:.3}");
    }

    /// Stop running. Frames are ignored until the next start.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.last_time = None;
        log::debug!("clock stopped");
    }

    /// Feed a wall-clock timestamp. Returns the number of updates run.
    pub fn frame<H: FrameHandler>(&mut self, now: f64, handler: &mut H) -> u32 {
        if !self.running {
            return 0;
        }
        let delta = match self.last_time {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last_time = Some(now);
        self.advance(delta, handler)
    }

    /// Feed an elapsed duration directly. Returns the number of updates run.
    pub fn advance<H: FrameHandler>(&mut self, delta: f64, handler: &mut H) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator += delta;

        let mut updates = 0;
        while self.accumulator >= self.step {
            handler.update(self.step);
            self.accumulator -= self.step;
            updates += 1;
        }

        handler.render(delta);
        updates
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}
