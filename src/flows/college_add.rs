//! Admin "add college" wizard. Submission exports the draft as CSV.

use serde::{Deserialize, Serialize};

use crate::catalog::{CITIES, COLLEGE_TYPES, COURSES, STATES};
use crate::export::CsvRecord;
use crate::wizard::validation::{
    is_valid_email, is_valid_mobile, is_valid_pincode, is_valid_url, is_valid_year, parse_number,
    EMAIL_MESSAGE, MOBILE_MESSAGE, PINCODE_MESSAGE, URL_MESSAGE, YEAR_MESSAGE,
};
use crate::wizard::{
    resolve_choice, ColumnLookup, EntryListOps, EntryRow, FieldDescriptor, FieldError, FormData,
    RepeatableEntryList, StepDefinition, StepPanel, ValidationResult, Validator, WizardController,
    WizardOptions,
};

pub const NAME: &str = "college-add";

const COURSE_LOOKUPS: &[ColumnLookup] = &[("name", COURSES)];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseOffering {
    pub name: String,
    pub duration: String,
    pub annual_fees: String,
}

impl EntryRow for CourseOffering {
    const COLUMNS: &'static [&'static str] = &["name", "duration", "annual_fees"];

    fn value(&self, column: &str) -> Option<String> {
        match column {
            "name" => Some(self.name.clone()),
            "duration" => Some(self.duration.clone()),
            "annual_fees" => Some(self.annual_fees.clone()),
            _ => None,
        }
    }

    fn set_value(&mut self, column: &str, value: &str) -> Result<(), FieldError> {
        match column {
            "name" => self.name = value.to_string(),
            "duration" => self.duration = value.to_string(),
            "annual_fees" => self.annual_fees = value.trim().to_string(),
            _ => {
                return Err(FieldError::UnknownColumn {
                    list: "courses".into(),
                    column: column.to_string(),
                })
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollegeDraft {
    pub college_name: String,
    pub established_year: String,
    pub college_type: String,
    pub email: String,
    pub website: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub courses: RepeatableEntryList<CourseOffering>,
    pub highest_package: String,
    pub average_package: String,
    pub top_recruiters: String,
    pub facilities: String,
    pub description: String,
}

impl CollegeDraft {
    pub fn builder() -> CollegeDraftBuilder {
        CollegeDraftBuilder::default()
    }

    /// Scalar fields in form order, shared by lookups and the CSV layout.
    fn scalars(&self) -> [(&'static str, &String); 15] {
        [
            ("college_name", &self.college_name),
            ("established_year", &self.established_year),
            ("college_type", &self.college_type),
            ("email", &self.email),
            ("website", &self.website),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("pincode", &self.pincode),
            ("highest_package", &self.highest_package),
            ("average_package", &self.average_package),
            ("top_recruiters", &self.top_recruiters),
            ("facilities", &self.facilities),
            ("description", &self.description),
        ]
    }

    fn scalar_mut(&mut self, key: &str) -> Option<&mut String> {
        let slot = match key {
            "college_name" => &mut self.college_name,
            "established_year" => &mut self.established_year,
            "college_type" => &mut self.college_type,
            "email" => &mut self.email,
            "website" => &mut self.website,
            "phone" => &mut self.phone,
            "address" => &mut self.address,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "pincode" => &mut self.pincode,
            "highest_package" => &mut self.highest_package,
            "average_package" => &mut self.average_package,
            "top_recruiters" => &mut self.top_recruiters,
            "facilities" => &mut self.facilities,
            "description" => &mut self.description,
            _ => return None,
        };
        Some(slot)
    }
}

impl FormData for CollegeDraft {
    fn field(&self, key: &str) -> Option<String> {
        self.scalars()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.clone())
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        let value = match key {
            "college_type" => resolve_choice(key, value, COLLEGE_TYPES)?,
            _ => value.to_string(),
        };
        let slot = self
            .scalar_mut(key)
            .ok_or_else(|| FieldError::UnknownField(key.to_string()))?;
        *slot = value;
        Ok(())
    }

    fn entries(&self, key: &str) -> Option<&dyn EntryListOps> {
        if key == "courses" {
            Some(&self.courses)
        } else {
            None
        }
    }

    fn entries_mut(&mut self, key: &str) -> Option<&mut dyn EntryListOps> {
        if key == "courses" {
            Some(&mut self.courses)
        } else {
            None
        }
    }
}

impl CsvRecord for CollegeDraft {
    fn csv_columns(&self) -> Vec<(String, String)> {
        let mut columns: Vec<(String, String)> = self
            .scalars()
            .iter()
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        for (index, course) in self.courses.filled().enumerate() {
            let n = index + 1;
            columns.push((format!("course_{}_name", n), course.name.clone()));
            columns.push((format!("course_{}_duration", n), course.duration.clone()));
            columns.push((format!("course_{}_annual_fees", n), course.annual_fees.clone()));
        }
        columns
    }

    fn csv_label(&self) -> Option<String> {
        Some(self.college_name.clone())
    }
}

#[derive(Debug, Default)]
pub struct CollegeDraftBuilder {
    draft: CollegeDraft,
    courses: Vec<CourseOffering>,
}

impl CollegeDraftBuilder {
    pub fn basics(mut self, name: &str, college_type: &str, email: &str, phone: &str) -> Self {
        self.draft.college_name = name.to_string();
        self.draft.college_type = college_type.to_string();
        self.draft.email = email.to_string();
        self.draft.phone = phone.to_string();
        self
    }

    pub fn website(mut self, website: &str) -> Self {
        self.draft.website = website.to_string();
        self
    }

    pub fn location(mut self, address: &str, city: &str, state: &str, pincode: &str) -> Self {
        self.draft.address = address.to_string();
        self.draft.city = city.to_string();
        self.draft.state = state.to_string();
        self.draft.pincode = pincode.to_string();
        self
    }

    pub fn course(mut self, name: &str, duration: &str, annual_fees: &str) -> Self {
        self.courses.push(CourseOffering {
            name: name.to_string(),
            duration: duration.to_string(),
            annual_fees: annual_fees.to_string(),
        });
        self
    }

    pub fn packages(mut self, highest: &str, average: &str) -> Self {
        self.draft.highest_package = highest.to_string();
        self.draft.average_package = average.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.draft.description = description.to_string();
        self
    }

    pub fn build(self) -> CollegeDraft {
        CollegeDraft {
            courses: RepeatableEntryList::from_rows(self.courses),
            ..self.draft
        }
    }
}

pub fn validate_basics(data: &CollegeDraft) -> ValidationResult {
    let mut result = ValidationResult::new();
    result
        .require(&data.college_name, "College name is required")
        .optional(&data.established_year, is_valid_year, YEAR_MESSAGE)
        .require(&data.college_type, "College type is required")
        .ensure(is_valid_email(&data.email), EMAIL_MESSAGE)
        .optional(&data.website, is_valid_url, URL_MESSAGE)
        .ensure(is_valid_mobile(&data.phone), MOBILE_MESSAGE);
    result
}

pub fn validate_location(data: &CollegeDraft) -> ValidationResult {
    let mut result = ValidationResult::new();
    result
        .require(&data.address, "Address is required")
        .require(&data.city, "City is required")
        .require(&data.state, "State is required")
        .ensure(is_valid_pincode(&data.pincode), PINCODE_MESSAGE);
    result
}

pub fn validate_courses(data: &CollegeDraft) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut named = 0;
    for (index, entry) in data.courses.iter().enumerate() {
        let course = &entry.row;
        if course.is_blank() {
            continue;
        }
        let n = index + 1;
        if course.name.trim().is_empty() {
            result.push(format!("Course {}: name is required", n));
        } else {
            named += 1;
        }
        result.optional(
            &course.annual_fees,
            |value| parse_number(value).is_some_and(|fees| fees >= 0.0),
            format!("Course {}: annual fees must be a non-negative number", n),
        );
    }
    result.ensure(named > 0, "Add at least one course");
    result
}

pub fn validate_placements(data: &CollegeDraft) -> ValidationResult {
    let mut result = ValidationResult::new();
    let is_amount = |value: &str| parse_number(value).is_some_and(|amount| amount >= 0.0);
    result
        .optional(
            &data.highest_package,
            is_amount,
            "Highest package must be a non-negative number",
        )
        .optional(
            &data.average_package,
            is_amount,
            "Average package must be a non-negative number",
        );
    if let (Some(highest), Some(average)) = (
        parse_number(&data.highest_package),
        parse_number(&data.average_package),
    ) {
        result.ensure(
            average <= highest,
            "Average package cannot exceed the highest package",
        );
    }
    result
}

pub fn steps() -> Vec<Box<dyn StepPanel<CollegeDraft>>> {
    vec![
        Box::new(StepDefinition::new(
            "Basic Information",
            vec![
                FieldDescriptor::text("college_name", "College name"),
                FieldDescriptor::text("established_year", "Established year")
                    .with_optional()
                    .with_validator(Validator::Year),
                FieldDescriptor::choice("college_type", "College type", COLLEGE_TYPES),
                FieldDescriptor::text("email", "Contact email").with_validator(Validator::Email),
                FieldDescriptor::text("website", "Website")
                    .with_optional()
                    .with_validator(Validator::Url),
                FieldDescriptor::text("phone", "Phone").with_validator(Validator::Mobile),
            ],
            validate_basics,
        )),
        Box::new(StepDefinition::new(
            "Location",
            vec![
                FieldDescriptor::text("address", "Address"),
                FieldDescriptor::searchable("city", "City", CITIES),
                FieldDescriptor::searchable("state", "State", STATES),
                FieldDescriptor::text("pincode", "Pincode").with_validator(Validator::Pincode),
            ],
            validate_location,
        )),
        Box::new(StepDefinition::new(
            "Courses",
            vec![FieldDescriptor::entries("courses", "Courses offered", COURSE_LOOKUPS)],
            validate_courses,
        )),
        Box::new(StepDefinition::new(
            "Placements & Facilities",
            vec![
                FieldDescriptor::text("highest_package", "Highest package (LPA)")
                    .with_optional()
                    .with_validator(Validator::Number {
                        min: Some(0.0),
                        max: None,
                    }),
                FieldDescriptor::text("average_package", "Average package (LPA)")
                    .with_optional()
                    .with_validator(Validator::Number {
                        min: Some(0.0),
                        max: None,
                    }),
                FieldDescriptor::text("top_recruiters", "Top recruiters")
                    .with_optional()
                    .with_help("Comma separated"),
                FieldDescriptor::text("facilities", "Facilities").with_optional(),
                FieldDescriptor::text("description", "Description").with_optional(),
            ],
            validate_placements,
        )),
    ]
}

pub fn default_options() -> WizardOptions {
    WizardOptions {
        allow_direct_step_jump: false,
    }
}

pub fn wizard(options: WizardOptions) -> WizardController<CollegeDraft> {
    WizardController::new(NAME, steps(), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::StepChange;

    fn valid_draft() -> CollegeDraft {
        CollegeDraft::builder()
            .basics("Test College", "Private", "admin@test.edu", "9876543210")
            .location("1 Main Road", "Pune", "Maharashtra", "411001")
            .course("MBA", "2 years", "250000")
            .packages("24", "9.5")
            .build()
    }

    #[test]
    fn basics_require_name_email_and_phone() {
        let errors = validate_basics(&CollegeDraft::default()).into_errors();
        assert_eq!(
            errors,
            [
                "College name is required",
                "College type is required",
                EMAIL_MESSAGE,
                MOBILE_MESSAGE
            ]
        );
    }

    #[test]
    fn optional_website_is_checked_only_when_present() {
        let draft = CollegeDraft::builder()
            .basics("Test College", "Private", "admin@test.edu", "9876543210")
            .website("not a url")
            .build();
        assert_eq!(validate_basics(&draft).into_errors(), [URL_MESSAGE]);
    }

    #[test]
    fn courses_need_at_least_one_named_row() {
        let errors = validate_courses(&CollegeDraft::default()).into_errors();
        assert_eq!(errors, ["Add at least one course"]);

        let draft = CollegeDraft::builder().course("", "3 years", "lots").build();
        assert_eq!(
            validate_courses(&draft).into_errors(),
            [
                "Course 1: name is required",
                "Course 1: annual fees must be a non-negative number",
                "Add at least one course"
            ]
        );
    }

    #[test]
    fn average_package_cannot_exceed_highest() {
        let draft = CollegeDraft::builder().packages("5", "7").build();
        assert_eq!(
            validate_placements(&draft).into_errors(),
            ["Average package cannot exceed the highest package"]
        );
    }

    #[test]
    fn jumping_is_disabled_for_admins() {
        let mut wizard = wizard(default_options());
        assert_eq!(wizard.jump_to(3), StepChange::JumpDisabled);
    }

    #[test]
    fn complete_draft_walks_every_step() {
        let mut wizard = wizard(default_options()).with_data(valid_draft());
        for expected in 1..4 {
            assert_eq!(
                wizard.advance(),
                StepChange::Moved {
                    from: expected - 1,
                    to: expected
                }
            );
        }
        assert!(wizard.is_final_step());
    }

    #[test]
    fn csv_columns_flatten_filled_courses() {
        let draft = CollegeDraft::builder()
            .basics("Test College", "Private", "a@b.co", "9876543210")
            .course("MBA", "2 years", "250000")
            .course("BBA", "3 years", "120000")
            .build();
        let columns = draft.csv_columns();
        let headers: Vec<&str> = columns.iter().map(|(header, _)| header.as_str()).collect();
        assert_eq!(headers[0], "college_name");
        assert!(headers.contains(&"course_2_annual_fees"));
        assert_eq!(columns.len(), 15 + 6);
    }

    #[test]
    fn college_type_resolves_case_insensitively() {
        let mut draft = CollegeDraft::default();
        draft.set_field("college_type", "deemed").unwrap();
        assert_eq!(draft.college_type, "Deemed");
        assert_eq!(draft.field("college_type").as_deref(), Some("Deemed"));
        assert!(draft.field("nope").is_none());
    }
}
