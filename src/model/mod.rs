pub mod entity;

mod de;
pub use de::{lenient_f64, lenient_u32, opt_string_or_number, string_or_number};
