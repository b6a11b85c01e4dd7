pub use label::Label;
pub use record::KmerRecord;

mod label;
mod record;
