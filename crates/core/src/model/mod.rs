mod answer;
mod dosha;
mod ids;
mod question;

pub use answer::{Answer, Intensity, IntensityError};
pub use dosha::{Dosha, DoshaScores};
pub use ids::QuestionId;
pub use question::{QuestionBank, QuestionError, QuestionRecord};
