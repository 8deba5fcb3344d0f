use college_forms::flows::{predictor, student_profile, PredictorQuery};
use college_forms::wizard::StepNavigator;
use insta::assert_snapshot;

#[test]
fn profile_navigator_after_first_step() {
    let navigator = StepNavigator::new(
        vec!["Personal Details", "Education", "Preferences", "Experience"],
        1,
        true,
    );
    assert_snapshot!(
        navigator.render(),
        @"(✓ 1 Personal Details) ━━ (● 2 Education) ── (○ 3 Preferences) ── (○ 4 Experience)"
    );
    assert_snapshot!(navigator.header(), @"Step 2 of 4 – Education");
}

#[test]
fn fresh_wizard_renders_first_step_active() {
    let wizard = student_profile::wizard(student_profile::default_options());
    assert_snapshot!(
        wizard.navigator().render(),
        @"(● 1 Personal Details) ── (○ 2 Education) ── (○ 3 Preferences) ── (○ 4 Experience)"
    );
}

#[test]
fn predictor_summary_marks_blank_fields() {
    let wizard = predictor::wizard(predictor::default_options())
        .with_data(PredictorQuery::new("NEET", "40", "General"));
    assert_snapshot!(wizard.summary().join("\n"), @r###"
    1. Entrance Exam
       Exam: NEET
    2. Your Score
       Rank or percentile: 40
    3. Preferences
       Category: General
       Preferred state: [unfilled]
    "###);
}
