mod assessment_vm;

pub use assessment_vm::{AssessmentOutcome, AssessmentVm};
