use std::time::{Instant, SystemTime, UNIX_EPOCH};

pub const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Wall-clock seconds since the Unix epoch
    pub time: f64,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f64, delta: f32) -> Self {
        Self {
            number,
            time,
            delta,
        }
    }
}

/// Produces one `FrameInfo` per rendered frame
#[derive(Debug)]
pub struct FrameClock {
    frame_number: u64,
    last_frame: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame_number: 0,
            last_frame: Instant::now(),
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn wall_time() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default()
    }

    /// Advance to the next frame
    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        let info = FrameInfo::new(self.frame_number, Self::wall_time(), delta);

        self.frame_number += 1;
        self.last_frame = now;
        info
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameClock {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        Some(self.tick())
    }
}

/// Averages frame rate over `FPS_UPDATE_INTERVAL` windows
#[derive(Debug, Default)]
pub struct FpsCounter {
    frame_count: u32,
    timer: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Record a frame; returns the new average when a window completes
    pub fn record(&mut self, delta: f32) -> Option<f32> {
        self.frame_count += 1;
        self.timer += delta;

        if self.timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.timer;
            self.frame_count = 0;
            self.timer = 0.0;
            return Some(self.fps);
        }
        None
    }
}
