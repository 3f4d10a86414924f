pub mod app;
pub mod builder;
pub mod error;
pub mod model;
pub mod popup;
pub mod toggles;

pub use app::{wire_fieldsets, App, Fieldsets};
pub use builder::build_report;
pub use error::ReportError;
pub use model::{TestCase, TestPoint, TestReport, TestResult};
pub use popup::ImagePopup;
