pub(crate) mod children;
pub(crate) mod element;
pub(crate) mod scope;
pub(crate) mod walker;
