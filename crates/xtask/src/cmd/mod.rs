mod compare;
mod dump;

pub(crate) use compare::{canon_svg, compare_blueprint};
pub(crate) use dump::dump_blueprint;
