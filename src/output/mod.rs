mod format;
mod writer;

pub(crate) use format::format_record;
pub(crate) use writer::BufferedWriter;
