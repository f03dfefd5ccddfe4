mod lines;
mod metrics;

pub(crate) use self::lines::*;
pub(crate) use self::metrics::*;
