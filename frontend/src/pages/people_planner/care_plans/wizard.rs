//! Step-by-step questionnaire: one section per step.

use crate::{
    api::{
        questionnaires::{sections, Question, QuestionnaireKind},
        ApiClient, CarePlanPayload, HrRecord, RiskAssessment, SupportPlan,
    },
    pages::crud::SubmitError,
    utils::forms::{optional_string, FieldErrors},
};

use super::answers::AnswerMap;

pub const SERVICE_USER_FIELD: &str = "service_user_id";

#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    questions: Vec<Question>,
    sections: Vec<String>,
    step: usize,
}

impl Wizard {
    pub fn new(questions: Vec<Question>) -> Self {
        let sections = sections(&questions);
        Self {
            questions,
            sections,
            step: 0,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_first(&self) -> bool {
        self.step == 0
    }

    pub fn is_last(&self) -> bool {
        self.step + 1 >= self.sections.len()
    }

    pub fn current_section(&self) -> Option<&str> {
        self.sections.get(self.step).map(String::as_str)
    }

    pub fn current_questions(&self) -> Vec<Question> {
        let Some(section) = self.current_section() else {
            return Vec::new();
        };
        self.questions
            .iter()
            .filter(|q| q.section == section)
            .cloned()
            .collect()
    }

    /// Moves on only when the current step's required questions are answered.
    pub fn next(&mut self, answers: &AnswerMap) -> Result<(), FieldErrors> {
        let errors = answers.missing(&self.current_questions());
        if !errors.is_empty() {
            return Err(errors);
        }
        if !self.is_last() {
            self.step += 1;
        }
        Ok(())
    }

    pub fn back(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    /// Jumps to the first step holding one of `errors`, if any.
    pub fn focus_first_error(&mut self, errors: &FieldErrors) {
        let section = self
            .questions
            .iter()
            .find(|q| errors.has(&q.id))
            .map(|q| q.section.clone());
        if let Some(step) = section.and_then(|s| self.sections.iter().position(|x| *x == s)) {
            self.step = step;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardDraft {
    pub service_user_id: String,
    pub title: String,
    pub answers: AnswerMap,
}

impl WizardDraft {
    /// Validates every step plus the service user and builds the body.
    pub fn validate(
        &self,
        kind: QuestionnaireKind,
        questions: &[Question],
    ) -> Result<CarePlanPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require(SERVICE_USER_FIELD, &self.service_user_id, "Choose a service user");
        errors.merge(self.answers.missing(questions));
        errors.into_result(|| CarePlanPayload {
            service_user_id: self.service_user_id.trim().to_string(),
            title: optional_string(&self.title).unwrap_or_else(|| kind.title().to_string()),
            answers: self.answers.to_answers(),
        })
    }
}

async fn post_care_plan<T: HrRecord<Payload = CarePlanPayload>>(
    api: &ApiClient,
    payload: &CarePlanPayload,
) -> Result<String, SubmitError> {
    let record = api.create_record::<T>(payload).await?;
    Ok(record.id().to_string())
}

/// Posts the questionnaire and returns the new record id.
pub async fn submit_care_plan(
    api: &ApiClient,
    kind: QuestionnaireKind,
    questions: &[Question],
    draft: &WizardDraft,
) -> Result<String, SubmitError> {
    let payload = draft
        .validate(kind, questions)
        .map_err(SubmitError::Invalid)?;
    match kind {
        QuestionnaireKind::RiskAssessment => post_care_plan::<RiskAssessment>(api, &payload).await,
        QuestionnaireKind::SupportPlan => post_care_plan::<SupportPlan>(api, &payload).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::questionnaires::default_questions;

    fn risk_wizard() -> Wizard {
        Wizard::new(default_questions(QuestionnaireKind::RiskAssessment))
    }

    #[test]
    fn one_step_per_section() {
        let wizard = risk_wizard();
        assert_eq!(wizard.sections().len(), 3);
        assert_eq!(wizard.current_section(), Some("Environment"));
        let ids: Vec<_> = wizard.current_questions().into_iter().map(|q| q.id).collect();
        assert_eq!(ids, vec!["home_access", "home_hazards"]);
    }

    #[test]
    fn next_is_blocked_until_the_step_is_answered() {
        let mut wizard = risk_wizard();
        let mut answers = AnswerMap::new();

        let errors = wizard.next(&answers).unwrap_err();
        assert!(errors.has("home_access"));
        assert_eq!(errors.len(), 1);
        assert_eq!(wizard.step(), 0);

        answers.choose("home_access", "Key safe");
        wizard.next(&answers).unwrap();
        assert_eq!(wizard.current_section(), Some("Mobility"));
    }

    #[test]
    fn back_stops_at_the_first_step() {
        let mut wizard = risk_wizard();
        wizard.back();
        assert!(wizard.is_first());
    }

    #[test]
    fn focus_jumps_to_the_earliest_failing_section() {
        let mut wizard = risk_wizard();
        let mut answers = AnswerMap::new();
        answers.choose("home_access", "Key safe");
        wizard.next(&answers).unwrap();
        answers.choose("mobility_level", "Independent");
        wizard.next(&answers).unwrap();
        assert!(wizard.is_last());

        let mut errors = FieldErrors::new();
        errors.add("mobility_level", "missing");
        wizard.focus_first_error(&errors);
        assert_eq!(wizard.current_section(), Some("Mobility"));
    }

    #[test]
    fn submit_needs_a_service_user_and_every_required_answer() {
        let questions = default_questions(QuestionnaireKind::SupportPlan);
        let errors = WizardDraft::default()
            .validate(QuestionnaireKind::SupportPlan, &questions)
            .unwrap_err();
        assert_eq!(errors.get(SERVICE_USER_FIELD), Some("Choose a service user"));
        assert!(errors.has("about_me"));
        assert!(errors.has("outcomes"));
        assert!(!errors.has("meals"));
    }

    #[test]
    fn blank_title_falls_back_to_the_kind() {
        let questions = default_questions(QuestionnaireKind::SupportPlan);
        let mut draft = WizardDraft {
            service_user_id: "su-1".into(),
            ..WizardDraft::default()
        };
        draft.answers.set_text("about_me", "Music".into());
        draft.answers.toggle("communication", "Verbal", true);
        draft.answers.choose("personal_care", "Some");
        draft.answers.set_text("outcomes", "Walk to the shop".into());

        let payload = draft
            .validate(QuestionnaireKind::SupportPlan, &questions)
            .unwrap();
        assert_eq!(payload.title, "Support Plan");
        assert_eq!(payload.answers.len(), 4);
    }
}
