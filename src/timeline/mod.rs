pub(crate) mod absolute;
pub(crate) mod occlusion;
