use leptos::*;

use crate::{
    api::{
        questionnaires::{Question, QuestionType, QuestionnaireKind},
        ApiClient, ApiError,
    },
    components::{
        common::ButtonVariant,
        error::InlineErrorMessage,
        layout::{LoadingSpinner, PageHeader},
        option_select::OptionSelect,
        validation_popover::ValidationPopover,
    },
    fixtures,
    pages::crud::{
        input_class,
        options::{record_options, use_static_options},
        text_input, Field, SubmitError,
    },
    state::toast::{use_toasts, ToastState},
    utils::{browser, forms::FieldErrors},
};

use super::{
    list::list_path,
    wizard::{submit_care_plan, Wizard, WizardDraft, SERVICE_USER_FIELD},
};

pub fn apply_wizard_result(
    result: Result<String, SubmitError>,
    kind: QuestionnaireKind,
    wizard: RwSignal<Wizard>,
    errors: RwSignal<FieldErrors>,
    api_error: RwSignal<Option<ApiError>>,
    toasts: ToastState,
) {
    match result {
        Ok(id) => {
            log::info!("{} {} saved", kind.slug(), id);
            toasts.success(format!("{} saved", kind.title()));
            errors.set(FieldErrors::default());
            api_error.set(None);
            browser::navigate_in_app(list_path(kind));
        }
        Err(SubmitError::Invalid(field_errors)) => {
            wizard.update(|w| w.focus_first_error(&field_errors));
            errors.set(field_errors);
        }
        Err(SubmitError::Api(err)) => {
            toasts.error(err.error.clone());
            api_error.set(Some(err));
        }
    }
}

fn question_error(errors: Signal<FieldErrors>, id: String) -> impl IntoView {
    move || {
        errors
            .with(|e| e.get(&id).map(str::to_string))
            .map(|message| view! { <p class="mt-1 text-xs text-status-error-text">{message}</p> })
    }
}

fn choice_input(
    draft: RwSignal<WizardDraft>,
    question_id: String,
    option: String,
    multiple: bool,
) -> View {
    let checked = {
        let (id, option) = (question_id.clone(), option.clone());
        move || draft.with(|d| d.answers.is_selected(&id, &option))
    };
    let on_change = {
        let (id, option) = (question_id.clone(), option.clone());
        move |ev: ev::Event| {
            let on = event_target_checked(&ev);
            draft.update(|d| {
                if multiple {
                    d.answers.toggle(&id, &option, on);
                } else if on {
                    d.answers.choose(&id, &option);
                }
            });
        }
    };
    view! {
        <label class="flex items-center gap-2 text-sm text-fg">
            <input
                type=if multiple { "checkbox" } else { "radio" }
                name=question_id
                value=option.clone()
                prop:checked=checked
                on:change=on_change
            />
            {option}
        </label>
    }
    .into_view()
}

fn question_view(question: Question, draft: RwSignal<WizardDraft>, errors: Signal<FieldErrors>) -> View {
    let id = question.id.clone();
    let invalid = {
        let id = id.clone();
        move || errors.with(|e| e.has(&id))
    };
    let control = match question.kind {
        QuestionType::Text => {
            let value_id = id.clone();
            let input_id = id.clone();
            view! {
                <textarea
                    id=id.clone()
                    rows="3"
                    class=move || input_class(invalid())
                    prop:value=move || draft.with(|d| d.answers.text(&value_id))
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.answers.set_text(&input_id, value));
                    }
                ></textarea>
            }
            .into_view()
        }
        QuestionType::Radio | QuestionType::Checkbox => {
            let multiple = question.kind == QuestionType::Checkbox;
            view! {
                <div class="space-y-1">
                    {question
                        .options
                        .iter()
                        .map(|option| choice_input(draft, id.clone(), option.clone(), multiple))
                        .collect_view()}
                </div>
            }
            .into_view()
        }
    };

    view! {
        <fieldset class="space-y-2" data-question=id.clone()>
            <legend class="text-sm font-medium text-fg">
                {question.text.clone()}
                {question.required.then(|| view! { <span class="text-status-error-text">" *"</span> })}
            </legend>
            {control}
            {question_error(errors, id)}
        </fieldset>
    }
    .into_view()
}

fn stepper(wizard: RwSignal<Wizard>) -> impl IntoView {
    move || {
        wizard.with(|w| {
            let current = w.step();
            w.sections()
                .iter()
                .enumerate()
                .map(|(index, section)| {
                    let class = if index == current {
                        "rounded-full px-3 py-1 text-xs font-semibold bg-action-primary-bg text-action-primary-text"
                    } else if index < current {
                        "rounded-full px-3 py-1 text-xs font-medium bg-status-success-bg text-status-success-text"
                    } else {
                        "rounded-full px-3 py-1 text-xs font-medium bg-surface-muted text-fg-muted"
                    };
                    view! {
                        <li class=class aria-current=(index == current).then_some("step")>
                            {format!("{}. {}", index + 1, section)}
                        </li>
                    }
                })
                .collect_view()
        })
    }
}

/// The questionnaire itself, once its questions are known.
#[component]
pub fn WizardForm(kind: QuestionnaireKind, questions: Vec<Question>) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let toasts = use_toasts();
    let wizard = create_rw_signal(Wizard::new(questions.clone()));
    let draft = create_rw_signal(WizardDraft::default());
    let errors = create_rw_signal(FieldErrors::default());
    let api_error = create_rw_signal(None::<ApiError>);
    let error_signal: Signal<FieldErrors> = errors.into();
    let service_users = use_static_options(record_options(&fixtures::service_users()));

    let save = create_action(move |draft: &WizardDraft| {
        let api = api.clone();
        let questions = questions.clone();
        let draft = draft.clone();
        async move { submit_care_plan(&api, kind, &questions, &draft).await }
    });

    create_effect(move |_| {
        if let Some(result) = save.value().get() {
            apply_wizard_result(result, kind, wizard, errors, api_error, toasts);
        }
    });

    let go_next = move || {
        let answers = draft.with_untracked(|d| d.answers.clone());
        let mut next = wizard.get_untracked();
        match next.next(&answers) {
            Ok(()) => {
                errors.set(FieldErrors::default());
                wizard.set(next);
            }
            Err(field_errors) => errors.set(field_errors),
        }
    };
    let go_back = move |_| {
        errors.set(FieldErrors::default());
        wizard.update(Wizard::back);
    };
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if !wizard.with_untracked(Wizard::is_last) {
            go_next();
            return;
        }
        let current = draft.get_untracked();
        let checked = wizard.with_untracked(|w| current.validate(kind, w.questions()));
        match checked {
            Ok(_) => {
                errors.set(FieldErrors::default());
                save.dispatch(current);
            }
            Err(field_errors) => {
                wizard.update(|w| w.focus_first_error(&field_errors));
                errors.set(field_errors);
            }
        }
    };

    let is_first = move || wizard.with(Wizard::is_first);
    let is_last = move || wizard.with(Wizard::is_last);

    view! {
        <form
            class="space-y-6 rounded-lg border border-border bg-surface-elevated p-6"
            novalidate=true
            on:submit=on_submit
        >
            <InlineErrorMessage error=api_error/>
            <div class="grid gap-4 md:grid-cols-2">
                <Field label="Service user" id="service_user" errors=error_signal field=SERVICE_USER_FIELD required=true>
                    <OptionSelect
                        id="service_user"
                        options=service_users
                        value=Signal::derive(move || draft.with(|d| d.service_user_id.clone()))
                        on_change=Callback::new(move |value| draft.update(|d| d.service_user_id = value))
                        placeholder="Choose service user"
                        invalid=Signal::derive(move || errors.with(|e| e.has(SERVICE_USER_FIELD)))
                    />
                </Field>
                <Field label="Title" id="title" errors=error_signal field="title">
                    {text_input(draft, error_signal, "title", |d| d.title.clone(), |d, v| d.title = v)}
                </Field>
            </div>
            <ol class="flex flex-wrap gap-2">{stepper(wizard)}</ol>
            <div class="space-y-5">
                {move || {
                    wizard
                        .with(Wizard::current_questions)
                        .into_iter()
                        .map(|question| question_view(question, draft, error_signal))
                        .collect_view()
                }}
            </div>
            <div class="flex justify-between">
                <button
                    type="button"
                    class=ButtonVariant::Secondary.button_class()
                    disabled=is_first
                    on:click=go_back
                >
                    "Back"
                </button>
                <Show
                    when=is_last
                    fallback=move || view! {
                        <button
                            type="button"
                            class=ButtonVariant::Primary.button_class()
                            on:click=move |_| go_next()
                        >
                            "Next"
                        </button>
                    }
                >
                    <button
                        type="submit"
                        class=ButtonVariant::Primary.button_class()
                        disabled=move || save.pending().get()
                    >
                        {format!("Save {}", kind.title().to_lowercase())}
                    </button>
                </Show>
            </div>
            <ValidationPopover
                errors=error_signal
                on_close=Callback::new(move |_| errors.set(FieldErrors::default()))
            />
        </form>
    }
}

#[component]
pub fn CarePlanWizardPage(kind: QuestionnaireKind) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let questions = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { api.questionnaire_or_default(kind).await }
        },
    );
    let back = view! {
        <a href=list_path(kind) class="text-sm text-link hover:underline">"Back to list"</a>
    }
    .into_view();

    view! {
        <section class="max-w-3xl space-y-4">
            <PageHeader title=format!("New {}", kind.title()) actions=back/>
            {move || match questions.get() {
                None => view! { <LoadingSpinner/> }.into_view(),
                Some(questions) => view! { <WizardForm kind=kind questions=questions/> }.into_view(),
            }}
        </section>
    }
}

#[component]
pub fn NewRiskAssessmentPage() -> impl IntoView {
    view! { <CarePlanWizardPage kind=QuestionnaireKind::RiskAssessment/> }
}

#[component]
pub fn NewSupportPlanPage() -> impl IntoView {
    view! { <CarePlanWizardPage kind=QuestionnaireKind::SupportPlan/> }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{api::questionnaires::default_questions, test_support::ssr::render_to_string};

    #[test]
    fn first_step_shows_only_its_section() {
        let html = render_to_string(|| {
            view! {
                <WizardForm
                    kind=QuestionnaireKind::RiskAssessment
                    questions=default_questions(QuestionnaireKind::RiskAssessment)
                />
            }
        });
        assert!(html.contains("How is the property accessed?"));
        assert!(html.contains("Key safe"));
        assert!(!html.contains("mobility level"));
        assert!(html.contains("Next"));
        assert!(html.contains("1. Environment"));
    }

    #[test]
    fn page_waits_for_the_template() {
        let html = render_to_string(|| view! { <NewSupportPlanPage/> });
        assert!(html.contains("New Support Plan"));
        assert!(html.contains("Loading"));
    }
}
