pub(crate) mod breadcrumbs;
pub(crate) mod def;
pub(crate) mod dsl;
pub(crate) mod kind;
pub(crate) mod resources;
pub(crate) mod snapshot;
pub(crate) mod tree;
