pub(crate) mod rate;
pub(crate) mod resolve;
pub(crate) mod timecode;
