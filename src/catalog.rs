//! Reference data behind the searchable selects and the admission predictor.
//!
//! All of it is static mock content; lists are small enough to filter on
//! every keystroke.

use serde::Serialize;

pub const COLLEGES: &[&str] = &[
    "IIT Bombay",
    "IIT Delhi",
    "IIT Madras",
    "IIT Kanpur",
    "NIT Trichy",
    "NIT Surathkal",
    "BITS Pilani",
    "IIIT Hyderabad",
    "VIT Vellore",
    "Manipal Institute of Technology",
    "AIIMS Delhi",
    "CMC Vellore",
    "Maulana Azad Medical College",
    "IIM Ahmedabad",
    "IIM Bangalore",
    "XLRI Jamshedpur",
    "COEP Pune",
    "Delhi Technological University",
];

pub const COURSES: &[&str] = &[
    "B.Tech Computer Science",
    "B.Tech Electrical Engineering",
    "B.Tech Mechanical Engineering",
    "B.Tech Civil Engineering",
    "MBBS",
    "BDS",
    "MBA",
    "PGDM",
    "BBA",
    "B.Com",
    "B.Sc Physics",
    "M.Tech Data Science",
    "BCA",
    "MCA",
];

pub const JOB_POSITIONS: &[&str] = &[
    "Software Engineer",
    "Data Analyst",
    "Product Manager",
    "Business Analyst",
    "Marketing Executive",
    "Sales Associate",
    "Teaching Assistant",
    "Research Intern",
    "Mechanical Design Engineer",
    "Civil Site Engineer",
];

pub const CITIES: &[&str] = &[
    "Mumbai",
    "Delhi",
    "Bengaluru",
    "Chennai",
    "Hyderabad",
    "Pune",
    "Kolkata",
    "Ahmedabad",
    "Jaipur",
    "Lucknow",
];

pub const STATES: &[&str] = &[
    "Maharashtra",
    "Delhi",
    "Tamil Nadu",
    "Uttar Pradesh",
    "Karnataka",
    "Rajasthan",
    "Telangana",
    "Gujarat",
    "Jharkhand",
    "West Bengal",
];

pub const QUALIFICATIONS: &[&str] = &["10th", "12th", "Diploma", "Graduate", "Postgraduate"];

pub const GENDERS: &[&str] = &["Female", "Male", "Other", "Prefer not to say"];

pub const COLLEGE_TYPES: &[&str] = &["Government", "Private", "Deemed", "Autonomous"];

pub const EXAMS: &[&str] = &["JEE Main", "JEE Advanced", "NEET", "CAT", "BITSAT"];

pub const CATEGORIES: &[&str] = &["General", "EWS", "OBC", "SC", "ST"];

/// A college with the last closing rank it admitted for one entrance exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollegeRecord {
    pub name: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub exam: &'static str,
    pub closing_rank: u32,
}

const fn record(
    name: &'static str,
    city: &'static str,
    state: &'static str,
    exam: &'static str,
    closing_rank: u32,
) -> CollegeRecord {
    CollegeRecord {
        name,
        city,
        state,
        exam,
        closing_rank,
    }
}

pub const COLLEGE_RECORDS: &[CollegeRecord] = &[
    record("IIT Bombay", "Mumbai", "Maharashtra", "JEE Advanced", 68),
    record("IIT Delhi", "Delhi", "Delhi", "JEE Advanced", 118),
    record("IIT Madras", "Chennai", "Tamil Nadu", "JEE Advanced", 160),
    record("IIT Kanpur", "Kanpur", "Uttar Pradesh", "JEE Advanced", 250),
    record("NIT Trichy", "Tiruchirappalli", "Tamil Nadu", "JEE Main", 1200),
    record("NIT Surathkal", "Mangaluru", "Karnataka", "JEE Main", 1800),
    record("IIIT Hyderabad", "Hyderabad", "Telangana", "JEE Main", 900),
    record("Delhi Technological University", "Delhi", "Delhi", "JEE Main", 5200),
    record("COEP Pune", "Pune", "Maharashtra", "JEE Main", 9000),
    record("BITS Pilani", "Pilani", "Rajasthan", "BITSAT", 350),
    record("VIT Vellore", "Vellore", "Tamil Nadu", "JEE Main", 25000),
    record("AIIMS Delhi", "Delhi", "Delhi", "NEET", 50),
    record("CMC Vellore", "Vellore", "Tamil Nadu", "NEET", 1500),
    record("Maulana Azad Medical College", "Delhi", "Delhi", "NEET", 600),
    record("IIM Ahmedabad", "Ahmedabad", "Gujarat", "CAT", 99),
    record("IIM Bangalore", "Bengaluru", "Karnataka", "CAT", 98),
    record("XLRI Jamshedpur", "Jamshedpur", "Jharkhand", "CAT", 95),
];

/// Multiplier applied to closing ranks for reserved categories.
pub fn category_relaxation(category: &str) -> f64 {
    match category {
        "EWS" => 1.4,
        "OBC" => 1.8,
        "SC" => 3.5,
        "ST" => 5.0,
        _ => 1.0,
    }
}

/// Whether an exam reports a percentile (higher is better) rather than a rank.
pub fn uses_percentile(exam: &str) -> bool {
    exam == "CAT"
}
