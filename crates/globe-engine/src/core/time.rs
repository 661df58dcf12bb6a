/// Simulation clock driven by the transport controls.
/// Accumulates frame time only while running; frozen while paused.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationClock {
    /// Seconds of simulated time since the last reset.
    elapsed_seconds: f64,
    /// Whether the transport is playing.
    running: bool,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Flip between playing and paused (the transport's play/pause button).
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Rewind to zero and stop.
    pub fn reset(&mut self) {
        self.elapsed_seconds = 0.0;
        self.running = false;
    }

    /// Add frame time to the clock. Ignored while paused.
    /// Non-finite or non-positive deltas are dropped so elapsed time never goes backwards.
    pub fn advance(&mut self, dt: f64) {
        if !self.running || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.elapsed_seconds += dt;
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed time formatted for the transport readout, e.g. `"12.34s"`.
    pub fn display(&self) -> String {
        format!("{:.2}s", self.elapsed_seconds)
    }
}
