mod assessment;
mod result;

pub use assessment::AssessmentView;
pub use result::ResultPanel;
