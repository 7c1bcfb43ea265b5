use crate::foundation::core::Rational;
use crate::foundation::error::{ResolveError, ResolveResult};

/// Broadcast frame rates a timeline or clip can run at.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum FrameRate {
    /// 23.976 fps.
    #[serde(rename = "23.976")]
    Fps23_976,
    /// 24 fps.
    #[serde(rename = "24")]
    Fps24,
    /// 24.98 fps.
    #[serde(rename = "24.98")]
    Fps24_98,
    /// 25 fps.
    #[serde(rename = "25")]
    Fps25,
    /// 29.97 fps non-drop.
    #[serde(rename = "29.97")]
    Fps29_97,
    /// 29.97 fps drop-frame.
    #[serde(rename = "29.97d")]
    Fps29_97d,
    /// 30 fps.
    #[serde(rename = "30")]
    Fps30,
    /// 47.952 fps.
    #[serde(rename = "47.952")]
    Fps47_952,
    /// 48 fps.
    #[serde(rename = "48")]
    Fps48,
    /// 50 fps.
    #[serde(rename = "50")]
    Fps50,
    /// 59.94 fps non-drop.
    #[serde(rename = "59.94")]
    Fps59_94,
    /// 59.94 fps drop-frame.
    #[serde(rename = "59.94d")]
    Fps59_94d,
    /// 60 fps.
    #[serde(rename = "60")]
    Fps60,
    /// 95.904 fps.
    #[serde(rename = "95.904")]
    Fps95_904,
    /// 96 fps.
    #[serde(rename = "96")]
    Fps96,
    /// 100 fps.
    #[serde(rename = "100")]
    Fps100,
    /// 119.88 fps non-drop.
    #[serde(rename = "119.88")]
    Fps119_88,
    /// 119.88 fps drop-frame.
    #[serde(rename = "119.88d")]
    Fps119_88d,
    /// 120 fps.
    #[serde(rename = "120")]
    Fps120,
}

/// Compatibility groups used to pick conform scaling rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RateGroup {
    /// Integer rates (24, 25, 30, ...).
    Whole,
    /// NTSC color rates (x/1.001), non-drop numbering.
    NtscColor,
    /// NTSC color rates with drop-frame numbering.
    NtscDrop,
}

struct RateInfo {
    rate: FrameRate,
    label: &'static str,
    // frame duration as num/den seconds
    dur: (i64, i64),
    base: u32,
    drop: bool,
    group: RateGroup,
}

const RATES: &[RateInfo] = &[
    info(FrameRate::Fps23_976, "23.976", (1001, 24000), 24, false, RateGroup::NtscColor),
    info(FrameRate::Fps24, "24", (1, 24), 24, false, RateGroup::Whole),
    info(FrameRate::Fps24_98, "24.98", (1001, 25000), 25, false, RateGroup::NtscColor),
    info(FrameRate::Fps25, "25", (1, 25), 25, false, RateGroup::Whole),
    info(FrameRate::Fps29_97, "29.97", (1001, 30000), 30, false, RateGroup::NtscColor),
    info(FrameRate::Fps29_97d, "29.97d", (1001, 30000), 30, true, RateGroup::NtscDrop),
    info(FrameRate::Fps30, "30", (1, 30), 30, false, RateGroup::Whole),
    info(FrameRate::Fps47_952, "47.952", (1001, 48000), 48, false, RateGroup::NtscColor),
    info(FrameRate::Fps48, "48", (1, 48), 48, false, RateGroup::Whole),
    info(FrameRate::Fps50, "50", (1, 50), 50, false, RateGroup::Whole),
    info(FrameRate::Fps59_94, "59.94", (1001, 60000), 60, false, RateGroup::NtscColor),
    info(FrameRate::Fps59_94d, "59.94d", (1001, 60000), 60, true, RateGroup::NtscDrop),
    info(FrameRate::Fps60, "60", (1, 60), 60, false, RateGroup::Whole),
    info(FrameRate::Fps95_904, "95.904", (1001, 96000), 96, false, RateGroup::NtscColor),
    info(FrameRate::Fps96, "96", (1, 96), 96, false, RateGroup::Whole),
    info(FrameRate::Fps100, "100", (1, 100), 100, false, RateGroup::Whole),
    info(FrameRate::Fps119_88, "119.88", (1001, 120000), 120, false, RateGroup::NtscColor),
    info(FrameRate::Fps119_88d, "119.88d", (1001, 120000), 120, true, RateGroup::NtscDrop),
    info(FrameRate::Fps120, "120", (1, 120), 120, false, RateGroup::Whole),
];

const fn info(
    rate: FrameRate,
    label: &'static str,
    dur: (i64, i64),
    base: u32,
    drop: bool,
    group: RateGroup,
) -> RateInfo {
    RateInfo {
        rate,
        label,
        dur,
        base,
        drop,
        group,
    }
}

// Labels FCP writes in `conform-rate/@srcFrameRate`.
const CONFORM_TOKENS: &[(&str, FrameRate)] = &[
    ("23.98", FrameRate::Fps23_976),
    ("23.976", FrameRate::Fps23_976),
    ("24", FrameRate::Fps24),
    ("24.98", FrameRate::Fps24_98),
    ("25", FrameRate::Fps25),
    ("29.97", FrameRate::Fps29_97),
    ("30", FrameRate::Fps30),
    ("47.95", FrameRate::Fps47_952),
    ("47.952", FrameRate::Fps47_952),
    ("48", FrameRate::Fps48),
    ("50", FrameRate::Fps50),
    ("59.94", FrameRate::Fps59_94),
    ("60", FrameRate::Fps60),
    ("95.9", FrameRate::Fps95_904),
    ("95.904", FrameRate::Fps95_904),
    ("96", FrameRate::Fps96),
    ("100", FrameRate::Fps100),
    ("119.88", FrameRate::Fps119_88),
    ("120", FrameRate::Fps120),
];

impl FrameRate {
    /// All supported rates.
    pub fn all() -> impl Iterator<Item = FrameRate> {
        RATES.iter().map(|i| i.rate)
    }

    fn info(self) -> &'static RateInfo {
        // RATES lists every variant exactly once, in declaration order.
        &RATES[self as usize]
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration(self) -> Rational {
        let (n, d) = self.info().dur;
        Rational::new(n, d).unwrap_or(Rational::ZERO)
    }

    /// Frames per second as an exact fraction.
    pub fn fps(self) -> Rational {
        let (n, d) = self.info().dur;
        Rational::new(d, n).unwrap_or(Rational::ZERO)
    }

    /// Nominal frames per timecode second (30 for 29.97).
    pub fn timecode_base(self) -> u32 {
        self.info().base
    }

    /// Return `true` for drop-frame timecode numbering.
    pub fn is_drop(self) -> bool {
        self.info().drop
    }

    /// Compatibility group.
    pub fn group(self) -> RateGroup {
        self.info().group
    }

    /// Short label such as `"29.97d"`.
    pub fn label(self) -> &'static str {
        self.info().label
    }

    /// Rate whose frame duration is exactly `frame_duration`.
    ///
    /// When `drop` is requested for a rate without a drop-frame variant the non-drop rate is
    /// returned; drop numbering only exists for NTSC 29.97 multiples.
    pub fn from_frame_duration(frame_duration: Rational, drop: bool) -> Option<FrameRate> {
        let mut fallback = None;
        for i in RATES {
            if Rational::new(i.dur.0, i.dur.1) != Some(frame_duration) {
                continue;
            }
            if i.drop == drop {
                return Some(i.rate);
            }
            if !i.drop {
                fallback = Some(i.rate);
            }
        }
        fallback
    }

    /// Parse a `conform-rate/@srcFrameRate` token.
    pub fn from_conform_token(token: &str) -> ResolveResult<FrameRate> {
        CONFORM_TOKENS
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, r)| *r)
            .ok_or_else(|| ResolveError::format(format!("unknown frame rate token '{token}'")))
    }
}

impl std::fmt::Display for FrameRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for FrameRate {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RATES
            .iter()
            .find(|i| i.label == s)
            .map(|i| i.rate)
            .ok_or_else(|| ResolveError::format(format!("unknown frame rate '{s}'")))
    }
}

/// Scaling factor applied to the `start` attribute family of a clip with an active
/// `conform-rate` whose native `media` rate differs from its container's `timeline` rate.
///
/// Reading multiplies the attribute value by the factor; writing divides. `None` means no
/// scaling: identical rates, rates sharing a frame duration, or a pair with no conform rule.
pub fn conform_scaling_factor(media: FrameRate, timeline: FrameRate) -> Option<Rational> {
    if media.frame_duration() == timeline.frame_duration() {
        return None;
    }
    let ratio = || media.frame_duration().checked_div(timeline.frame_duration());

    match (media.group(), timeline.group()) {
        (RateGroup::Whole, RateGroup::Whole) => ratio(),
        (RateGroup::NtscColor | RateGroup::NtscDrop, RateGroup::NtscColor | RateGroup::NtscDrop) => {
            ratio()
        }
        // Cross-family conform is only defined between siblings (24 <-> 23.976, 30 <-> 29.97, ...).
        _ if media.timecode_base() == timeline.timecode_base() => ratio(),
        _ => {
            tracing::debug!(%media, %timeline, "no conform rule for rate pair");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/time/rate.rs"]
mod tests;
