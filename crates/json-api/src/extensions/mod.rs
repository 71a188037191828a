//! Extension traits

mod dates;
mod depot;
mod path;
mod result;

pub(crate) use dates::DateParamExt as _;
pub(crate) use depot::DepotExt as _;
pub(crate) use path::PathIdExt as _;
pub(crate) use result::{ResultExt as _, StoreResultExt as _};
