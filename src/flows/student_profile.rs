//! Student profile wizard: personal details, education, preferences and
//! work experience.

use serde::{Deserialize, Serialize};

use crate::catalog::{COLLEGES, COURSES, GENDERS, JOB_POSITIONS, QUALIFICATIONS};
use crate::wizard::validation::{
    is_valid_email, is_valid_mobile, is_valid_year, parse_number, EMAIL_MESSAGE, MOBILE_MESSAGE,
};
use crate::wizard::{
    resolve_choice, ColumnLookup, EntryListOps, EntryRow, FieldDescriptor, FieldError, FormData,
    RepeatableEntryList, StepDefinition, StepPanel, ValidationResult, Validator, WizardController,
    WizardOptions,
};

pub const NAME: &str = "student-profile";
pub const SUBMIT_NOTICE: &str = "Profile saved successfully!";

const DESIRED_COLLEGE_LOOKUPS: &[ColumnLookup] = &[("college", COLLEGES), ("course", COURSES)];
const EXPERIENCE_LOOKUPS: &[ColumnLookup] = &[("position", JOB_POSITIONS)];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesiredCollege {
    pub college: String,
    pub course: String,
}

impl EntryRow for DesiredCollege {
    const COLUMNS: &'static [&'static str] = &["college", "course"];

    fn value(&self, column: &str) -> Option<String> {
        match column {
            "college" => Some(self.college.clone()),
            "course" => Some(self.course.clone()),
            _ => None,
        }
    }

    fn set_value(&mut self, column: &str, value: &str) -> Result<(), FieldError> {
        match column {
            "college" => self.college = value.to_string(),
            "course" => self.course = value.to_string(),
            _ => {
                return Err(FieldError::UnknownColumn {
                    list: "desired_colleges".into(),
                    column: column.to_string(),
                })
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub years: String,
}

impl EntryRow for Experience {
    const COLUMNS: &'static [&'static str] = &["company", "position", "years"];

    fn value(&self, column: &str) -> Option<String> {
        match column {
            "company" => Some(self.company.clone()),
            "position" => Some(self.position.clone()),
            "years" => Some(self.years.clone()),
            _ => None,
        }
    }

    fn set_value(&mut self, column: &str, value: &str) -> Result<(), FieldError> {
        match column {
            "company" => self.company = value.to_string(),
            "position" => self.position = value.to_string(),
            "years" => self.years = value.trim().to_string(),
            _ => {
                return Err(FieldError::UnknownColumn {
                    list: "experience".into(),
                    column: column.to_string(),
                })
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub full_name: String,
    pub mobile_number: String,
    pub email: String,
    pub city_you_live_in: String,
    pub gender: String,
    pub highest_qualification: String,
    pub passing_year: String,
    pub percentage: String,
    pub stream: String,
    pub preferred_course: String,
    pub desired_colleges: RepeatableEntryList<DesiredCollege>,
    pub experience: RepeatableEntryList<Experience>,
}

impl StudentProfile {
    pub fn builder() -> StudentProfileBuilder {
        StudentProfileBuilder::default()
    }
}

impl FormData for StudentProfile {
    fn field(&self, key: &str) -> Option<String> {
        let value = match key {
            "full_name" => &self.full_name,
            "mobile_number" => &self.mobile_number,
            "email" => &self.email,
            "city_you_live_in" => &self.city_you_live_in,
            "gender" => &self.gender,
            "highest_qualification" => &self.highest_qualification,
            "passing_year" => &self.passing_year,
            "percentage" => &self.percentage,
            "stream" => &self.stream,
            "preferred_course" => &self.preferred_course,
            _ => return None,
        };
        Some(value.clone())
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "full_name" => self.full_name = value.to_string(),
            "mobile_number" => self.mobile_number = value.trim().to_string(),
            "email" => self.email = value.trim().to_string(),
            "city_you_live_in" => self.city_you_live_in = value.to_string(),
            "gender" => self.gender = resolve_choice(key, value, GENDERS)?,
            "highest_qualification" => {
                self.highest_qualification = resolve_choice(key, value, QUALIFICATIONS)?
            }
            "passing_year" => self.passing_year = value.trim().to_string(),
            "percentage" => self.percentage = value.trim().to_string(),
            "stream" => self.stream = value.to_string(),
            "preferred_course" => self.preferred_course = value.to_string(),
            _ => return Err(FieldError::UnknownField(key.to_string())),
        }
        Ok(())
    }

    fn entries(&self, key: &str) -> Option<&dyn EntryListOps> {
        match key {
            "desired_colleges" => Some(&self.desired_colleges),
            "experience" => Some(&self.experience),
            _ => None,
        }
    }

    fn entries_mut(&mut self, key: &str) -> Option<&mut dyn EntryListOps> {
        match key {
            "desired_colleges" => Some(&mut self.desired_colleges),
            "experience" => Some(&mut self.experience),
            _ => None,
        }
    }
}

/// Incremental construction of a [`StudentProfile`], one step's worth of
/// fields at a time.
#[derive(Debug, Default)]
pub struct StudentProfileBuilder {
    profile: StudentProfile,
    desired: Vec<DesiredCollege>,
    experience: Vec<Experience>,
}

impl StudentProfileBuilder {
    pub fn personal(mut self, full_name: &str, mobile_number: &str, city: &str) -> Self {
        self.profile.full_name = full_name.to_string();
        self.profile.mobile_number = mobile_number.to_string();
        self.profile.city_you_live_in = city.to_string();
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.profile.email = email.to_string();
        self
    }

    pub fn education(mut self, qualification: &str, passing_year: &str, percentage: &str) -> Self {
        self.profile.highest_qualification = qualification.to_string();
        self.profile.passing_year = passing_year.to_string();
        self.profile.percentage = percentage.to_string();
        self
    }

    pub fn preferred_course(mut self, course: &str) -> Self {
        self.profile.preferred_course = course.to_string();
        self
    }

    pub fn desired_college(mut self, college: &str, course: &str) -> Self {
        self.desired.push(DesiredCollege {
            college: college.to_string(),
            course: course.to_string(),
        });
        self
    }

    pub fn experience(mut self, company: &str, position: &str, years: &str) -> Self {
        self.experience.push(Experience {
            company: company.to_string(),
            position: position.to_string(),
            years: years.to_string(),
        });
        self
    }

    pub fn build(self) -> StudentProfile {
        StudentProfile {
            desired_colleges: RepeatableEntryList::from_rows(self.desired),
            experience: RepeatableEntryList::from_rows(self.experience),
            ..self.profile
        }
    }
}

pub fn validate_personal(data: &StudentProfile) -> ValidationResult {
    let mut result = ValidationResult::new();
    result
        .require(&data.full_name, "Full name is required")
        .ensure(is_valid_mobile(&data.mobile_number), MOBILE_MESSAGE)
        .optional(&data.email, is_valid_email, EMAIL_MESSAGE)
        .require(&data.city_you_live_in, "City is required");
    result
}

pub fn validate_education(data: &StudentProfile) -> ValidationResult {
    let mut result = ValidationResult::new();
    result
        .require(&data.highest_qualification, "Highest qualification is required")
        .ensure(
            is_valid_year(&data.passing_year),
            "Please enter a valid passing year",
        )
        .optional(
            &data.percentage,
            |value| parse_number(value).is_some_and(|number| (0.0..=100.0).contains(&number)),
            "Percentage must be between 0 and 100",
        );
    result
}

pub fn validate_preferences(data: &StudentProfile) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.require(&data.preferred_course, "Preferred course is required");

    let mut named = 0;
    for (index, entry) in data.desired_colleges.iter().enumerate() {
        if entry.row.is_blank() {
            continue;
        }
        if entry.row.college.trim().is_empty() {
            result.push(format!(
                "Desired college {}: college name is required",
                index + 1
            ));
        } else {
            named += 1;
        }
    }
    result.ensure(named > 0, "Add at least one desired college");
    result
}

pub fn validate_experience(data: &StudentProfile) -> ValidationResult {
    let mut result = ValidationResult::new();
    for (index, entry) in data.experience.iter().enumerate() {
        let row = &entry.row;
        if row.is_blank() {
            continue;
        }
        let n = index + 1;
        result
            .require(&row.company, format!("Experience {}: company is required", n))
            .require(&row.position, format!("Experience {}: position is required", n))
            .optional(
                &row.years,
                |value| parse_number(value).is_some_and(|years| years >= 0.0),
                format!("Experience {}: years must be a non-negative number", n),
            );
    }
    result
}

pub fn steps() -> Vec<Box<dyn StepPanel<StudentProfile>>> {
    vec![
        Box::new(StepDefinition::new(
            "Personal Details",
            vec![
                FieldDescriptor::text("full_name", "Full name"),
                FieldDescriptor::text("mobile_number", "Mobile number")
                    .with_validator(Validator::Mobile)
                    .with_help("10 digits, no country code"),
                FieldDescriptor::text("email", "Email")
                    .with_optional()
                    .with_validator(Validator::Email),
                FieldDescriptor::text("city_you_live_in", "City you live in"),
                FieldDescriptor::choice("gender", "Gender", GENDERS).with_optional(),
            ],
            validate_personal,
        )),
        Box::new(StepDefinition::new(
            "Education",
            vec![
                FieldDescriptor::choice(
                    "highest_qualification",
                    "Highest qualification",
                    QUALIFICATIONS,
                ),
                FieldDescriptor::text("passing_year", "Passing year").with_validator(Validator::Year),
                FieldDescriptor::text("percentage", "Percentage")
                    .with_optional()
                    .with_validator(Validator::Number {
                        min: Some(0.0),
                        max: Some(100.0),
                    }),
                FieldDescriptor::text("stream", "Stream").with_optional(),
            ],
            validate_education,
        )),
        Box::new(StepDefinition::new(
            "Preferences",
            vec![
                FieldDescriptor::searchable("preferred_course", "Preferred course", COURSES),
                FieldDescriptor::entries(
                    "desired_colleges",
                    "Desired colleges",
                    DESIRED_COLLEGE_LOOKUPS,
                )
                .with_help("Add one row per college you are interested in"),
            ],
            validate_preferences,
        )),
        Box::new(StepDefinition::new(
            "Experience",
            vec![FieldDescriptor::entries("experience", "Work experience", EXPERIENCE_LOOKUPS)
                .with_optional()
                .with_help("Leave blank if you have no work experience")],
            validate_experience,
        )),
    ]
}

pub fn default_options() -> WizardOptions {
    WizardOptions {
        allow_direct_step_jump: true,
    }
}

pub fn wizard(options: WizardOptions) -> WizardController<StudentProfile> {
    WizardController::new(NAME, steps(), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::StepChange;

    #[test]
    fn personal_step_reports_name_and_mobile() {
        let mut wizard = wizard(default_options());
        wizard.update_field("full_name", "").unwrap();
        wizard.update_field("mobile_number", "12345").unwrap();
        wizard.update_field("city_you_live_in", "Pune").unwrap();

        let change = wizard.advance();

        assert_eq!(
            change,
            StepChange::Blocked {
                step: 0,
                errors: vec![
                    "Full name is required".into(),
                    "Please enter a valid 10-digit mobile number".into(),
                ],
            }
        );
        assert_eq!(wizard.current_step(), 0);
    }

    #[test]
    fn personal_step_passes_with_valid_input() {
        let mut wizard = wizard(default_options());
        wizard.update_field("full_name", "Asha Rao").unwrap();
        wizard.update_field("mobile_number", "9876543210").unwrap();
        wizard.update_field("city_you_live_in", "Pune").unwrap();

        assert_eq!(wizard.advance(), StepChange::Moved { from: 0, to: 1 });
        assert!(wizard.errors_for(0).is_empty());
    }

    #[test]
    fn gender_resolves_to_canonical_choice() {
        let mut profile = StudentProfile::default();
        profile.set_field("gender", "female").unwrap();
        assert_eq!(profile.gender, "Female");
        assert!(profile.set_field("gender", "unknown").is_err());
    }

    #[test]
    fn preferences_require_a_named_college() {
        let profile = StudentProfile::builder()
            .preferred_course("MBA")
            .desired_college("", "MBA")
            .build();
        assert_eq!(
            validate_preferences(&profile).errors(),
            [
                "Desired college 1: college name is required",
                "Add at least one desired college"
            ]
        );
    }

    #[test]
    fn blank_experience_rows_are_ignored() {
        let profile = StudentProfile::default();
        assert!(validate_experience(&profile).ok());

        let profile = StudentProfile::builder()
            .experience("Acme", "", "two")
            .build();
        assert_eq!(
            validate_experience(&profile).errors(),
            [
                "Experience 1: position is required",
                "Experience 1: years must be a non-negative number"
            ]
        );
    }

    #[test]
    fn education_checks_year_and_percentage() {
        let profile = StudentProfile::builder()
            .education("12th", "20", "104")
            .build();
        assert_eq!(
            validate_education(&profile).errors(),
            [
                "Please enter a valid passing year",
                "Percentage must be between 0 and 100"
            ]
        );
    }
}
