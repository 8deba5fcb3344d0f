//! Concrete wizards built on [`crate::wizard`].

pub mod college_add;
pub mod predictor;
pub mod student_profile;

use std::fmt;

pub use college_add::{CollegeDraft, CourseOffering};
pub use predictor::{predict, PredictionSink, PredictorQuery};
pub use student_profile::{DesiredCollege, Experience, StudentProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    StudentProfile,
    Predictor,
    CollegeAdd,
}

impl Flow {
    pub const ALL: [Flow; 3] = [Flow::StudentProfile, Flow::Predictor, Flow::CollegeAdd];

    pub fn name(self) -> &'static str {
        match self {
            Flow::StudentProfile => student_profile::NAME,
            Flow::Predictor => predictor::NAME,
            Flow::CollegeAdd => college_add::NAME,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Flow::StudentProfile => "Student Profile",
            Flow::Predictor => "College Predictor",
            Flow::CollegeAdd => "Add College",
        }
    }

    /// Flows only reachable behind the admin login.
    pub fn requires_admin(self) -> bool {
        matches!(self, Flow::CollegeAdd)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|flow| flow.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
