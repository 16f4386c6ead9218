pub mod sample;
mod source;

pub use source::load_records;
