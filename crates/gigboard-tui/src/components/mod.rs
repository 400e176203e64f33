pub mod progress_gauge;
pub mod spinner;
pub mod toast;

pub use progress_gauge::render_progress_gauge;
pub use spinner::Spinner;
pub use toast::{ToastKind, ToastManager};
