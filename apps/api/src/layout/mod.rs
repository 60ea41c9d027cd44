// One-page fitting: template-aware height estimation plus an ordered trimming
// pipeline. Estimation is CPU-bound; handlers run it inside spawn_blocking.

pub mod fitter;
pub mod handlers;
pub mod metrics;

pub use fitter::{fit_to_one_page, FitResult};
