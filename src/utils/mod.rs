pub(crate) mod date;
pub(crate) mod logging;
pub(crate) mod timezone;

pub(crate) use date::parse_since;
pub(crate) use logging::init_tracing;
pub(crate) use timezone::Timezone;
