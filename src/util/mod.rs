mod convert;

pub use convert::{millis_to_minutes, percent};
