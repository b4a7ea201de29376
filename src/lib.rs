#![forbid(unsafe_code)]

pub mod background;
pub mod blur_cpu;
pub mod coeffs;
pub mod error;

pub use background::{Backdrop, BackdropJob, DEFAULT_AMOUNT, blur_image_bytes, encode_png, run_job};
pub use blur_cpu::blur_rgba8;
pub use coeffs::Coefficients;
pub use error::{FuzzyError, FuzzyResult};
