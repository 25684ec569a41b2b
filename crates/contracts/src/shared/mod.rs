pub mod lenient;
pub mod period;
pub mod sales;
