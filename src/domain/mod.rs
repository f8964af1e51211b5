mod assemble;
mod record;

pub use assemble::assemble_record;
pub use record::{PropertyRecord, UNKNOWN_LOCATION};
