//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod tree;

pub(crate) use convert::ConvertArgs;
pub(crate) use tree::TreeArgs;
