//! College predictor: exam, score, category. Submitting matches the query
//! against last year's closing ranks in the catalog.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::catalog::{
    category_relaxation, uses_percentile, CollegeRecord, CATEGORIES, COLLEGE_RECORDS, EXAMS,
    STATES,
};
use crate::wizard::validation::parse_number;
use crate::wizard::{
    resolve_choice, FieldDescriptor, FieldError, FormData, SinkError, StepDefinition, StepPanel,
    SubmissionSink, ValidationResult, WizardController, WizardOptions,
};

pub const NAME: &str = "predictor";

/// Percentile points granted per unit of category relaxation above 1.0.
const PERCENTILE_STEP: f64 = 2.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictorQuery {
    pub exam: String,
    pub rank: String,
    pub category: String,
    pub preferred_state: String,
}

impl PredictorQuery {
    pub fn new(exam: &str, rank: &str, category: &str) -> Self {
        Self {
            exam: exam.to_string(),
            rank: rank.to_string(),
            category: category.to_string(),
            preferred_state: String::new(),
        }
    }

    pub fn in_state(mut self, state: &str) -> Self {
        self.preferred_state = state.to_string();
        self
    }
}

impl FormData for PredictorQuery {
    fn field(&self, key: &str) -> Option<String> {
        let value = match key {
            "exam" => &self.exam,
            "rank" => &self.rank,
            "category" => &self.category,
            "preferred_state" => &self.preferred_state,
            _ => return None,
        };
        Some(value.clone())
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "exam" => self.exam = resolve_choice(key, value, EXAMS)?,
            "rank" => self.rank = value.trim().to_string(),
            "category" => self.category = resolve_choice(key, value, CATEGORIES)?,
            "preferred_state" => self.preferred_state = value.to_string(),
            _ => return Err(FieldError::UnknownField(key.to_string())),
        }
        Ok(())
    }
}

pub fn validate_exam(data: &PredictorQuery) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.require(&data.exam, "Select an entrance exam");
    result
}

pub fn validate_score(data: &PredictorQuery) -> ValidationResult {
    let mut result = ValidationResult::new();
    if uses_percentile(&data.exam) {
        let valid = parse_number(&data.rank).is_some_and(|value| (0.0..=100.0).contains(&value));
        result.ensure(valid, "Please enter a valid percentile between 0 and 100");
    } else {
        let valid = data.rank.trim().parse::<u32>().is_ok_and(|rank| rank > 0);
        result.ensure(valid, "Please enter a valid rank");
    }
    result
}

pub fn validate_preferences(data: &PredictorQuery) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.require(&data.category, "Select a category");
    result
}

/// Colleges the query is likely to get into, most selective first.
pub fn predict(query: &PredictorQuery) -> Vec<CollegeRecord> {
    let Some(score) = parse_number(&query.rank) else {
        return Vec::new();
    };
    let relaxation = category_relaxation(&query.category);
    let percentile = uses_percentile(&query.exam);
    let state = query.preferred_state.trim();

    let mut matches: Vec<CollegeRecord> = COLLEGE_RECORDS
        .iter()
        .filter(|record| record.exam == query.exam)
        .filter(|record| state.is_empty() || record.state.eq_ignore_ascii_case(state))
        .filter(|record| {
            let closing = f64::from(record.closing_rank);
            if percentile {
                score + (relaxation - 1.0) * PERCENTILE_STEP >= closing
            } else {
                score <= closing * relaxation
            }
        })
        .copied()
        .collect();

    if percentile {
        matches.sort_by(|a, b| b.closing_rank.cmp(&a.closing_rank));
    } else {
        matches.sort_by_key(|record| record.closing_rank);
    }
    matches
}

/// Prints the predicted colleges and keeps the latest result set.
pub struct PredictionSink<W: Write> {
    out: W,
    pub results: Vec<CollegeRecord>,
}

impl PredictionSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> PredictionSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            results: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SubmissionSink<PredictorQuery> for PredictionSink<W> {
    fn submit(&mut self, payload: &PredictorQuery) -> Result<(), SinkError> {
        self.results = predict(payload);
        tracing::info!(
            exam = %payload.exam,
            matches = self.results.len(),
            "prediction computed"
        );
        if self.results.is_empty() {
            writeln!(
                self.out,
                "No colleges matched. Try another state or check your score."
            )?;
        } else {
            writeln!(self.out, "Predicted colleges for {}:", payload.exam)?;
            for (index, record) in self.results.iter().enumerate() {
                writeln!(
                    self.out,
                    "  {}. {} ({}, {}) closing {}",
                    index + 1,
                    record.name,
                    record.city,
                    record.state,
                    record.closing_rank
                )?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

pub fn steps() -> Vec<Box<dyn StepPanel<PredictorQuery>>> {
    vec![
        Box::new(StepDefinition::new(
            "Entrance Exam",
            vec![FieldDescriptor::choice("exam", "Exam", EXAMS)],
            validate_exam,
        )),
        Box::new(StepDefinition::new(
            "Your Score",
            vec![FieldDescriptor::text("rank", "Rank or percentile")
                .with_help("CAT takes a percentile, every other exam a rank")],
            validate_score,
        )),
        Box::new(StepDefinition::new(
            "Preferences",
            vec![
                FieldDescriptor::choice("category", "Category", CATEGORIES),
                FieldDescriptor::searchable("preferred_state", "Preferred state", STATES)
                    .with_optional(),
            ],
            validate_preferences,
        )),
    ]
}

pub fn default_options() -> WizardOptions {
    WizardOptions {
        allow_direct_step_jump: true,
    }
}

pub fn wizard(options: WizardOptions) -> WizardController<PredictorQuery> {
    WizardController::new(NAME, steps(), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::SubmitOutcome;

    fn names(records: &[CollegeRecord]) -> Vec<&'static str> {
        records.iter().map(|record| record.name).collect()
    }

    #[test]
    fn rank_matches_sorted_by_closing_rank() {
        let query = PredictorQuery::new("JEE Advanced", "150", "General");
        assert_eq!(names(&predict(&query)), ["IIT Madras", "IIT Kanpur"]);
    }

    #[test]
    fn category_relaxation_widens_the_cutoff() {
        let general = PredictorQuery::new("JEE Main", "10000", "General");
        let obc = PredictorQuery::new("JEE Main", "10000", "OBC");
        assert_eq!(names(&predict(&general)), ["VIT Vellore"]);
        assert!(names(&predict(&obc)).contains(&"COEP Pune"));
    }

    #[test]
    fn state_filter_is_case_insensitive() {
        let query = PredictorQuery::new("NEET", "500", "General").in_state("delhi");
        assert_eq!(names(&predict(&query)), ["Maulana Azad Medical College"]);
    }

    #[test]
    fn percentile_exams_rank_higher_cutoffs_first() {
        let query = PredictorQuery::new("CAT", "99.2", "General");
        assert_eq!(
            names(&predict(&query)),
            ["IIM Ahmedabad", "IIM Bangalore", "XLRI Jamshedpur"]
        );
    }

    #[test]
    fn score_validation_depends_on_exam() {
        assert!(!validate_score(&PredictorQuery::new("CAT", "120", "General")).ok());
        assert!(validate_score(&PredictorQuery::new("CAT", "97.5", "General")).ok());
        assert!(!validate_score(&PredictorQuery::new("NEET", "0", "General")).ok());
        assert!(!validate_score(&PredictorQuery::new("NEET", "12.5", "General")).ok());
    }

    #[test]
    fn sink_prints_predictions() {
        let mut wizard = wizard(default_options())
            .with_data(PredictorQuery::new("BITSAT", "300", "General"));
        wizard.jump_to(2);
        let mut sink = PredictionSink::new(Vec::new());
        assert_eq!(wizard.submit(&mut sink), SubmitOutcome::Submitted);
        assert_eq!(names(&sink.results), ["BITS Pilani"]);
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.contains("1. BITS Pilani (Pilani, Rajasthan) closing 350"));
    }
}
