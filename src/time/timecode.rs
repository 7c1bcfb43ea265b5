use std::fmt;

use crate::foundation::core::Rational;
use crate::time::rate::FrameRate;

/// Frame-accurate SMPTE timecode for a position on a timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Timecode {
    /// Frame rate the timecode counts in.
    pub rate: FrameRate,
    /// Position is before zero.
    pub negative: bool,
    /// Hours (not wrapped at 24).
    pub hours: u64,
    /// Minutes `0..60`.
    pub minutes: u32,
    /// Seconds `0..60`.
    pub seconds: u32,
    /// Frames `0..timecode_base`.
    pub frames: u32,
}

impl Timecode {
    /// Convert an exact time to timecode, truncating to whole frames.
    pub fn from_rational(time: Rational, rate: FrameRate) -> Self {
        let negative = time < Rational::ZERO;
        let magnitude = if negative { -time } else { time };
        let frame_count = (magnitude * rate.fps()).floor().max(0) as u64;
        Self::from_frame_count(frame_count, negative, rate)
    }

    /// Split a real frame count into timecode fields.
    pub fn from_frame_count(frame_count: u64, negative: bool, rate: FrameRate) -> Self {
        let base = u64::from(rate.timecode_base());
        let numbered = if rate.is_drop() {
            drop_frame_number(frame_count, base)
        } else {
            frame_count
        };

        Self {
            rate,
            negative,
            hours: numbered / (base * 3600),
            minutes: ((numbered / (base * 60)) % 60) as u32,
            seconds: ((numbered / base) % 60) as u32,
            frames: (numbered % base) as u32,
        }
    }
}

// Skip the first `drop` frame numbers of every minute except each tenth minute.
fn drop_frame_number(frame_count: u64, base: u64) -> u64 {
    let drop = base / 15; // 2 at 30, 4 at 60, 8 at 120
    let per_ten_minutes = base * 600 - drop * 9;
    let per_minute = base * 60 - drop;

    let tens = frame_count / per_ten_minutes;
    let rem = frame_count % per_ten_minutes;
    if rem > drop {
        frame_count + drop * 9 * tens + drop * ((rem - drop) / per_minute)
    } else {
        frame_count + drop * 9 * tens
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        let sep = if self.rate.is_drop() { ';' } else { ':' };
        let width = if self.rate.timecode_base() > 100 { 3 } else { 2 };
        write!(
            f,
            "{:02}:{:02}:{:02}{sep}{:0width$}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/time/timecode.rs"]
mod tests;
