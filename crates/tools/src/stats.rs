//! Frame-rate counter modelled on stats.js.
//!
//! Timestamps are milliseconds from any fixed origin. The caller supplies
//! them, which keeps the counter independent of the clock source.

/// Which readout the overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    /// Frames per second, refreshed once a second.
    #[default]
    Fps,
    /// Milliseconds between `begin` and `end` of the last frame.
    Ms,
}

impl Panel {
    pub fn index(&self) -> usize {
        match self {
            Self::Fps => 0,
            Self::Ms => 1,
        }
    }

    pub fn from_index(index: usize) -> Self {
        match index % 2 {
            0 => Self::Fps,
            _ => Self::Ms,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fps => "FPS",
            Self::Ms => "MS",
        }
    }
}

/// Latest value of a readout plus the extremes seen so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelValue {
    pub current: f64,
    pub min: f64,
    pub max: f64,
    samples: u64,
}

impl Default for PanelValue {
    fn default() -> Self {
        Self {
            current: 0.0,
            min: f64::INFINITY,
            max: 0.0,
            samples: 0,
        }
    }
}

impl PanelValue {
    pub fn update(&mut self, value: f64) {
        self.current = value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.samples += 1;
    }

    pub fn has_samples(&self) -> bool {
        self.samples > 0
    }
}

#[derive(Debug, Clone)]
pub struct FrameStats {
    panel: Panel,
    begin_ms: f64,
    prev_ms: f64,
    frames: u32,
    fps: PanelValue,
    ms: PanelValue,
}

impl FrameStats {
    const FPS_WINDOW_MS: f64 = 1000.0;

    pub fn new(now_ms: f64) -> Self {
        Self {
            panel: Panel::Fps,
            begin_ms: now_ms,
            prev_ms: now_ms,
            frames: 0,
            fps: PanelValue::default(),
            ms: PanelValue::default(),
        }
    }

    pub fn show_panel(&mut self, panel: Panel) {
        self.panel = panel;
    }

    /// Switch to the next readout, as clicking the overlay does.
    pub fn cycle_panel(&mut self) {
        self.panel = Panel::from_index(self.panel.index() + 1);
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn begin(&mut self, now_ms: f64) {
        self.begin_ms = now_ms;
    }

    /// Close the frame opened by `begin`. Returns `now_ms`.
    pub fn end(&mut self, now_ms: f64) -> f64 {
        self.frames += 1;
        self.ms.update(now_ms - self.begin_ms);

        let elapsed = now_ms - self.prev_ms;
        if elapsed >= Self::FPS_WINDOW_MS {
            self.fps
                .update(f64::from(self.frames) * 1000.0 / elapsed);
            self.prev_ms = now_ms;
            self.frames = 0;
        }
        now_ms
    }

    pub fn fps(&self) -> &PanelValue {
        &self.fps
    }

    pub fn ms(&self) -> &PanelValue {
        &self.ms
    }

    /// Readout for the active panel, e.g. `60 FPS (58-61)`.
    pub fn label(&self) -> String {
        let value = match self.panel {
            Panel::Fps => &self.fps,
            Panel::Ms => &self.ms,
        };
        if !value.has_samples() {
            return format!("-- {}", self.panel.name());
        }
        format!(
            "{} {} ({}-{})",
            value.current.round(),
            self.panel.name(),
            value.min.round(),
            value.max.round()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frames(stats: &mut FrameStats, start: f64, count: u32, spacing: f64, work: f64) -> f64 {
        let mut t = start;
        for _ in 0..count {
            t += spacing;
            stats.begin(t);
            stats.end(t + work);
        }
        t
    }

    #[test]
    fn steady_sixty_hz() {
        let mut stats = FrameStats::new(0.0);
        // 61 frames so the last end lands past the one-second mark.
        run_frames(&mut stats, 0.0, 61, 1000.0 / 60.0, 0.0);
        let fps = stats.fps().current;
        assert!((fps - 60.0).abs() < 1.5, "fps = {fps}");
    }

    #[test]
    fn fps_waits_for_a_full_second() {
        let mut stats = FrameStats::new(0.0);
        run_frames(&mut stats, 0.0, 10, 10.0, 0.0);
        assert!(!stats.fps().has_samples());
        assert_eq!(stats.label(), "-- FPS");
    }

    #[test]
    fn ms_tracks_frame_work() {
        let mut stats = FrameStats::new(0.0);
        stats.begin(100.0);
        stats.end(104.0);
        stats.begin(200.0);
        stats.end(210.0);
        assert_eq!(stats.ms().current, 10.0);
        assert_eq!(stats.ms().min, 4.0);
        assert_eq!(stats.ms().max, 10.0);
    }

    #[test]
    fn min_max_follow_changing_rate() {
        let mut stats = FrameStats::new(0.0);
        let t = run_frames(&mut stats, 0.0, 30, 1000.0 / 30.0, 0.0);
        run_frames(&mut stats, t, 70, 1000.0 / 60.0, 0.0);
        assert!(stats.fps().min < 35.0);
        assert!(stats.fps().max > 55.0);
    }

    #[test]
    fn panel_cycles_and_labels() {
        let mut stats = FrameStats::new(0.0);
        assert_eq!(stats.panel(), Panel::Fps);
        stats.cycle_panel();
        assert_eq!(stats.panel(), Panel::Ms);
        stats.begin(0.0);
        stats.end(16.0);
        assert_eq!(stats.label(), "16 MS (16-16)");
        stats.cycle_panel();
        assert_eq!(stats.panel(), Panel::Fps);
    }
}
