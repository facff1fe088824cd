pub mod html;
pub mod lenient;
pub mod number;
