use college_forms::catalog::COURSES;
use college_forms::export::{to_csv_string, CsvExportSink};
use college_forms::flows::{
    college_add, predictor, student_profile, CollegeDraft, DesiredCollege, PredictorQuery,
};
use college_forms::session::AdminSession;
use college_forms::wizard::{
    filter_options, Direction, MemorySink, RepeatableEntryList, SearchableSelect, StepChange,
    SubmissionStatus, SubmitOutcome, WizardOptions,
};

fn college(name: &str) -> DesiredCollege {
    DesiredCollege {
        college: name.into(),
        course: String::new(),
    }
}

#[test]
fn retreat_from_first_step_stays_put() {
    let mut wizard = predictor::wizard(predictor::default_options());
    assert_eq!(wizard.retreat(), StepChange::Unchanged);
    assert_eq!(wizard.current_step(), 0);
}

#[test]
fn advance_on_final_step_keeps_index() {
    let mut wizard = predictor::wizard(predictor::default_options());
    wizard.jump_to(2);
    wizard.update_field("category", "General").unwrap();
    assert_eq!(wizard.advance(), StepChange::Unchanged);
    assert_eq!(wizard.current_step(), 2);

    wizard.update_field("category", "").unwrap();
    assert!(matches!(wizard.advance(), StepChange::Blocked { step: 2, .. }));
    assert_eq!(wizard.current_step(), 2);
}

#[test]
fn only_entry_cannot_be_removed() {
    let list = RepeatableEntryList::from_rows([college("IIT Delhi")]);
    let id = list.ids()[0];
    let after = list.without(id);
    assert_eq!(after.len(), 1);
    assert_eq!(after, list);
}

#[test]
fn moving_down_then_up_restores_order() {
    let list =
        RepeatableEntryList::from_rows([college("A"), college("B"), college("C")]);
    let middle = list.ids()[1];
    let restored = list.moved(middle, Direction::Down).moved(middle, Direction::Up);
    assert_eq!(restored, list);
}

#[test]
fn unmatched_search_keeps_raw_text() {
    let mut bound = String::new();
    let mut select = SearchableSelect::new(COURSES);
    let matches = select.input("Underwater Basket Weaving", |value| bound = value.to_string());
    assert!(matches.is_empty());
    assert_eq!(bound, "Underwater Basket Weaving");
    assert!(select.dropdown().is_none());
    assert!(filter_options(COURSES, "zzz").is_empty());
}

#[test]
fn personal_step_reports_exactly_two_errors() {
    let mut wizard = student_profile::wizard(student_profile::default_options());
    wizard.update_field("full_name", "").unwrap();
    wizard.update_field("mobile_number", "12345").unwrap();
    wizard.update_field("city_you_live_in", "Pune").unwrap();
    match wizard.advance() {
        StepChange::Blocked { step, errors } => {
            assert_eq!(step, 0);
            assert_eq!(
                errors,
                [
                    "Full name is required",
                    "Please enter a valid 10-digit mobile number"
                ]
            );
        }
        other => panic!("expected a blocked step, got {:?}", other),
    }
    assert_eq!(wizard.current_step(), 0);
}

#[test]
fn valid_personal_step_advances() {
    let mut wizard = student_profile::wizard(student_profile::default_options());
    wizard.update_field("full_name", "Asha Rao").unwrap();
    wizard.update_field("mobile_number", "9876543210").unwrap();
    wizard.update_field("city_you_live_in", "Pune").unwrap();
    assert_eq!(wizard.advance(), StepChange::Moved { from: 0, to: 1 });
    assert!(wizard.current_errors().is_empty());
}

fn ready_draft() -> CollegeDraft {
    CollegeDraft::builder()
        .basics("Test College", "Private", "info@test.edu", "9876543210")
        .location("1 <b>Main</b> Road", "Pune", "Maharashtra", "411001")
        .course("MBA", "2 years", "900000")
        .description(r#"He said "hi""#)
        .build()
}

#[test]
fn csv_cells_are_quoted_doubled_and_stripped() {
    let csv = to_csv_string(&ready_draft()).unwrap();
    assert!(csv.contains(r#""Test College""#));
    assert!(csv.contains(r#""He said ""hi""""#));
    assert!(csv.contains(r#""1 bMain/b Road""#));
    assert!(!csv.contains('<') && !csv.contains('>'));
}

#[test]
fn college_wizard_exports_on_submit() {
    let dir = tempfile::tempdir().unwrap();
    let mut wizard =
        college_add::wizard(college_add::default_options()).with_data(ready_draft());
    let mut sink = CsvExportSink::new(dir.path().join("exports"));
    for _ in 0..3 {
        assert!(matches!(wizard.advance(), StepChange::Moved { .. }));
    }
    assert_eq!(wizard.submit(&mut sink), SubmitOutcome::Submitted);
    assert_eq!(wizard.status(), &SubmissionStatus::Submitted);
    let path = sink.last_export().unwrap();
    assert!(path.starts_with(dir.path()));
    assert_eq!(wizard.submit(&mut sink), SubmitOutcome::AlreadySubmitted);
}

#[test]
fn failed_submission_can_be_retried() {
    let mut wizard = predictor::wizard(WizardOptions {
        allow_direct_step_jump: true,
    })
    .with_data(PredictorQuery::new("NEET", "40", "General"));
    wizard.jump_to(2);

    let mut failing = MemorySink::<PredictorQuery>::failing("network down");
    assert_eq!(
        wizard.submit(&mut failing),
        SubmitOutcome::Failed("Submission rejected: network down".into())
    );
    let mut sink = MemorySink::<PredictorQuery>::new();
    assert_eq!(wizard.submit(&mut sink), SubmitOutcome::Submitted);
    assert_eq!(sink.received.len(), 1);
}

#[test]
fn admin_login_checks_both_credentials() {
    let mut session = AdminSession::in_memory();
    assert!(!session.login("admin", "wrong").unwrap());
    assert!(!session.is_logged_in());
    assert!(session.login("admin", "admin123").unwrap());
    assert!(session.is_logged_in());
}
