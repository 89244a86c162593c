use leptos::*;

use crate::{
    api::{ApiClient, ApiError, Role, Schedule},
    components::{
        common::{Button, ButtonVariant},
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{ErrorMessage, LoadingSpinner, PageHeader},
        option_select::OptionSelect,
        side_nav::BACK_OFFICE,
        time_picker::TimePicker,
        validation_popover::ValidationPopover,
    },
    fixtures,
    pages::crud::{
        input_class,
        options::{record_options, use_employee_options, use_static_options},
        text_input, Field, SubmitError,
    },
    router::paths,
    state::{
        session::use_session,
        toast::{use_toasts, ToastState},
    },
    utils::{
        forms::FieldErrors,
        time::{format_date, format_hhmm, format_long_date},
    },
};

use super::{
    extra_call::{create_extra_call, ExtraCallForm, COLOR_PRESETS},
    timeline::{build_lanes, entry_color, hour_marks, placement, summarize, LaneGrouping},
    view_model::{use_planner_view_model, PlannerViewModel},
};

#[component]
fn DateNavigator(vm: PlannerViewModel) -> impl IntoView {
    view! {
        <div class="flex flex-wrap items-center gap-2">
            <Button variant=ButtonVariant::Secondary on:click=move |_| vm.previous_day()>
                <i class="fas fa-chevron-left" aria-hidden="true"></i>
                <span class="sr-only">"Previous day"</span>
            </Button>
            <Button variant=ButtonVariant::Secondary on:click=move |_| vm.today()>"Today"</Button>
            <Button variant=ButtonVariant::Secondary on:click=move |_| vm.next_day()>
                <i class="fas fa-chevron-right" aria-hidden="true"></i>
                <span class="sr-only">"Next day"</span>
            </Button>
            <input
                type="date"
                aria-label="Planner date"
                class="rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm"
                prop:value=move || format_date(vm.date.get())
                on:change=move |ev| vm.set_date_input(&event_target_value(&ev))
            />
            <span class="text-sm font-medium text-fg">{move || format_long_date(vm.date.get())}</span>
        </div>
    }
}

#[component]
fn GroupingToggle(vm: PlannerViewModel) -> impl IntoView {
    view! {
        <div class="inline-flex rounded-md border border-border" role="group" aria-label="Group lanes by">
            {[LaneGrouping::ServiceUser, LaneGrouping::Carer]
                .into_iter()
                .map(|grouping| {
                    view! {
                        <button
                            type="button"
                            class=move || {
                                if vm.grouping.get() == grouping {
                                    "px-3 py-1.5 text-sm font-medium bg-action-primary-bg text-action-primary-text"
                                } else {
                                    "px-3 py-1.5 text-sm font-medium text-fg hover:bg-action-ghost-bg-hover"
                                }
                            }
                            aria-pressed=move || (vm.grouping.get() == grouping).to_string()
                            on:click=move |_| vm.set_grouping(grouping)
                        >
                            {grouping.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

fn summary_bar(schedules: &[Schedule]) -> View {
    let summary = summarize(schedules);
    let stat = |label: &'static str, value: usize, class: &'static str| {
        view! {
            <div class="rounded-lg border border-border bg-surface-elevated px-4 py-2">
                <p class="text-xs uppercase text-fg-muted">{label}</p>
                <p class=format!("text-xl font-semibold {}", class)>{value}</p>
            </div>
        }
    };
    view! {
        <div class="grid grid-cols-3 gap-3">
            {stat("Total", summary.total, "text-fg")}
            {stat("Allocated", summary.allocated, "text-status-success-text")}
            {stat("Unallocated", summary.unallocated, "text-status-error-text")}
        </div>
    }
    .into_view()
}

fn visit_block(entry: Schedule) -> View {
    let style = placement(entry.start_time, entry.end_time).style(&entry_color(&entry));
    let times = format!("{}–{}", format_hhmm(entry.start_time), format_hhmm(entry.end_time));
    let who = entry
        .employee_name
        .clone()
        .unwrap_or_else(|| entry.status.label().to_string());
    let title = format!("{} {} ({})", times, entry.activity, who);
    view! {
        <div
            class="absolute top-1 bottom-1 overflow-hidden rounded px-1 text-xs text-white shadow-sm"
            style=style
            title=title
        >
            <span class="font-semibold">{times}</span>
            " "
            {entry.activity}
        </div>
    }
    .into_view()
}

fn timeline_grid(schedules: &[Schedule], grouping: LaneGrouping) -> View {
    let lanes = build_lanes(schedules, grouping);
    view! {
        <div class="overflow-x-auto rounded-lg border border-border bg-surface-elevated">
            <div class="min-w-[960px]">
                <div class="flex border-b border-border">
                    <div class="w-48 shrink-0 px-3 py-2 text-xs font-semibold text-fg-muted">
                        {grouping.label()}
                    </div>
                    <div class="relative h-8 flex-1">
                        {hour_marks()
                            .into_iter()
                            .map(|(label, left)| {
                                view! {
                                    <span
                                        class="absolute top-2 -translate-x-1/2 text-[10px] text-fg-muted"
                                        style=format!("left: {:.3}%;", left)
                                    >
                                        {label}
                                    </span>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
                {lanes
                    .into_iter()
                    .map(|lane| {
                        view! {
                            <div class="flex border-b border-border last:border-b-0" data-lane=lane.key.clone().unwrap_or_default()>
                                <div class="w-48 shrink-0 px-3 py-3 text-sm font-medium text-fg">
                                    {lane.title}
                                    <span class="ml-1 text-xs text-fg-muted">{format!("({})", lane.entries.len())}</span>
                                </div>
                                <div class="relative h-12 flex-1 bg-surface-muted">
                                    {lane.entries.into_iter().map(visit_block).collect_view()}
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
    .into_view()
}

/// Summary plus lanes for the view model's day.
#[component]
pub fn DayTimeline(vm: PlannerViewModel) -> impl IntoView {
    view! {
        {move || match vm.schedules.get() {
            None => view! { <LoadingSpinner/> }.into_view(),
            Some(Err(err)) => view! { <ErrorMessage message=err.error/> }.into_view(),
            Some(Ok(schedules)) if schedules.is_empty() => {
                view! {
                    <EmptyState
                        title="No visits scheduled"
                        description="Pick another day or add an extra call."
                    />
                }
                .into_view()
            }
            Some(Ok(schedules)) => {
                let grouping = vm.grouping.get();
                view! {
                    <div class="space-y-4">
                        {summary_bar(&schedules)}
                        {timeline_grid(&schedules, grouping)}
                    </div>
                }
                .into_view()
            }
        }}
    }
}

#[component]
pub fn DayPlannerPage() -> impl IntoView {
    let vm = use_planner_view_model();
    let (session, _) = use_session();
    let can_add = move || {
        session.with(|s| s.role().map(|role| BACK_OFFICE.contains(&role)).unwrap_or(false))
    };
    let actions = view! {
        <Show when=can_add>
            <a
                href=paths::EXTRA_CALL
                class=ButtonVariant::Primary.button_class()
            >
                <i class="fas fa-plus mr-2" aria-hidden="true"></i>
                "Extra call"
            </a>
        </Show>
    }
    .into_view();

    view! {
        <section class="space-y-4">
            <PageHeader title="Day Planner" actions=actions/>
            <div class="flex flex-wrap items-center justify-between gap-3">
                <DateNavigator vm=vm/>
                <GroupingToggle vm=vm/>
            </div>
            <DayTimeline vm=vm/>
        </section>
    }
}

/// Applies the outcome of an extra call submission.
pub fn apply_extra_call_result(
    result: Result<Schedule, SubmitError>,
    draft: RwSignal<ExtraCallForm>,
    errors: RwSignal<FieldErrors>,
    api_error: RwSignal<Option<ApiError>>,
    toasts: ToastState,
    vm: PlannerViewModel,
) {
    match result {
        Ok(schedule) => {
            toasts.success(format!("Extra call added ({})", schedule.status.label()));
            errors.set(FieldErrors::default());
            api_error.set(None);
            draft.set(ExtraCallForm::for_day(schedule.date));
            vm.set_date(schedule.date);
            vm.refetch();
        }
        Err(SubmitError::Invalid(field_errors)) => errors.set(field_errors),
        Err(SubmitError::Api(err)) => {
            toasts.error(err.error.clone());
            api_error.set(Some(err));
        }
    }
}

fn extra_call_fields(
    draft: RwSignal<ExtraCallForm>,
    errors: Signal<FieldErrors>,
    vm: PlannerViewModel,
) -> View {
    let service_users = use_static_options(record_options(&fixtures::service_users()));
    let carers = use_employee_options(Role::Carer);
    view! {
        <Field label="Service user" id="service_user" errors=errors field="service_user_id" required=true>
            <OptionSelect
                id="service_user"
                options=service_users
                value=Signal::derive(move || draft.with(|d| d.service_user_id.clone()))
                on_change=Callback::new(move |value| draft.update(|d| d.service_user_id = value))
                placeholder="Choose service user"
                invalid=Signal::derive(move || errors.with(|e| e.has("service_user_id")))
            />
        </Field>
        <Field label="Carer" id="carer" errors=errors field="employee_id">
            <OptionSelect
                id="carer"
                options=carers
                value=Signal::derive(move || draft.with(|d| d.employee_id.clone()))
                on_change=Callback::new(move |value| draft.update(|d| d.employee_id = value))
                placeholder="Leave unallocated"
            />
        </Field>
        <Field label="Date" id="call_date" errors=errors field="date" required=true>
            <input
                id="call_date"
                type="date"
                class=move || input_class(errors.with(|e| e.has("date")))
                prop:value=move || draft.with(|d| d.date.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    vm.set_date_input(&value);
                    draft.update(|d| d.date = value);
                }
            />
        </Field>
        <div class="grid grid-cols-2 gap-4">
            <Field label="Start time" id="start_time" errors=errors field="start_time" required=true>
                <TimePicker
                    id="start_time"
                    value=Signal::derive(move || draft.with(|d| d.start_time.clone()))
                    on_change=Callback::new(move |value| draft.update(|d| d.start_time = value))
                    invalid=Signal::derive(move || errors.with(|e| e.has("start_time")))
                />
            </Field>
            <Field label="End time" id="end_time" errors=errors field="end_time" required=true>
                <TimePicker
                    id="end_time"
                    value=Signal::derive(move || draft.with(|d| d.end_time.clone()))
                    on_change=Callback::new(move |value| draft.update(|d| d.end_time = value))
                    invalid=Signal::derive(move || errors.with(|e| e.has("end_time")))
                />
            </Field>
        </div>
        <Field label="Activity" id="activity" errors=errors field="activity" required=true>
            {text_input(draft, errors, "activity", |d| d.activity.clone(), |d, v| d.activity = v)}
        </Field>
        <Field label="Colour" id="color" errors=errors field="color">
            <select
                id="color"
                class=move || input_class(errors.with(|e| e.has("color")))
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| d.color = value);
                }
            >
                {COLOR_PRESETS
                    .iter()
                    .map(|&(value, label)| {
                        view! {
                            <option value=value selected=move || draft.with(|d| d.color == value)>
                                {label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </Field>
        <p class="text-xs text-fg-muted">
            {move || format!("Will be saved as {}.", draft.with(|d| d.status().label().to_lowercase()))}
        </p>
    }
    .into_view()
}

#[component]
pub fn ExtraCallPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let toasts = use_toasts();
    let vm = use_planner_view_model();
    let draft = create_rw_signal(ExtraCallForm::for_day(vm.date.get_untracked()));
    let errors = create_rw_signal(FieldErrors::default());
    let api_error = create_rw_signal(None::<ApiError>);

    let save = create_action(move |form: &ExtraCallForm| {
        let api = api.clone();
        let form = form.clone();
        async move { create_extra_call(&api, &form).await }
    });

    create_effect(move |_| {
        if let Some(result) = save.value().get() {
            apply_extra_call_result(result, draft, errors, api_error, toasts, vm);
        }
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = draft.get_untracked();
        match form.validate() {
            Ok(_) => {
                errors.set(FieldErrors::default());
                save.dispatch(form);
            }
            Err(field_errors) => errors.set(field_errors),
        }
    };
    let error_signal: Signal<FieldErrors> = errors.into();

    view! {
        <section class="space-y-4">
            <PageHeader title="Extra Call"/>
            <div class="grid gap-6 lg:grid-cols-3">
                <form
                    class="space-y-4 rounded-lg border border-border bg-surface-elevated p-6 lg:col-span-1"
                    novalidate=true
                    on:submit=on_submit
                >
                    <InlineErrorMessage error=api_error/>
                    {extra_call_fields(draft, error_signal, vm)}
                    <div class="flex justify-end">
                        <button
                            type="submit"
                            class=ButtonVariant::Primary.button_class()
                            disabled=move || save.pending().get()
                        >
                            "Add extra call"
                        </button>
                    </div>
                </form>
                <div class="space-y-3 lg:col-span-2">
                    <div class="flex items-center justify-between">
                        <h3 class="text-sm font-semibold text-fg">
                            {move || format!("Visits on {}", format_long_date(vm.date.get()))}
                        </h3>
                        <GroupingToggle vm=vm/>
                    </div>
                    <DayTimeline vm=vm/>
                </div>
            </div>
            <ValidationPopover
                errors=error_signal
                on_close=Callback::new(move |_| errors.set(FieldErrors::default()))
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::ScheduleStatus,
        pages::people_planner::planner::timeline::tests::visit,
        test_support::ssr::with_runtime,
    };
    use chrono::NaiveDate;

    #[test]
    fn saved_call_resets_the_form_and_refetches_its_day() {
        with_runtime(|| {
            let vm = PlannerViewModel::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
            let draft = create_rw_signal(ExtraCallForm {
                activity: "Tea call".into(),
                ..ExtraCallForm::for_day(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap())
            });
            let errors = create_rw_signal(FieldErrors::default());
            let api_error = create_rw_signal(None);
            let toasts = ToastState::new();

            let saved = visit("v1", (9, 0), (10, 0), Some(("su-1", "Margaret")), None);
            apply_extra_call_result(Ok(saved), draft, errors, api_error, toasts, vm);

            assert_eq!(draft.get_untracked().activity, "");
            assert_eq!(draft.get_untracked().date, "2025-03-04");
            assert_eq!(vm.date.get_untracked(), NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
            assert_eq!(vm.reload.get_untracked(), 1);
            let toast = toasts.items().get_untracked();
            assert_eq!(toast[0].message, format!("Extra call added ({})", ScheduleStatus::Unallocated.label()));
        });
    }

    #[test]
    fn api_failure_keeps_the_draft() {
        with_runtime(|| {
            let vm = PlannerViewModel::new(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
            let draft = create_rw_signal(ExtraCallForm {
                activity: "Tea call".into(),
                ..ExtraCallForm::for_day(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap())
            });
            let errors = create_rw_signal(FieldErrors::default());
            let api_error = create_rw_signal(None);
            let toasts = ToastState::new();

            apply_extra_call_result(
                Err(SubmitError::Api(ApiError::request_failed("Server unavailable"))),
                draft,
                errors,
                api_error,
                toasts,
                vm,
            );

            assert_eq!(draft.get_untracked().activity, "Tea call");
            assert_eq!(vm.reload.get_untracked(), 0);
            assert!(api_error.get_untracked().is_some());
        });
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{
        helpers::{admin_user, carer_user, provide_session},
        ssr::render_to_string,
    };

    #[test]
    fn planner_offers_extra_call_to_back_office() {
        let html = render_to_string(|| {
            provide_session(Some(admin_user()));
            view! { <DayPlannerPage/> }
        });
        assert!(html.contains("Day Planner"));
        assert!(html.contains("Today"));
        assert!(html.contains(paths::EXTRA_CALL));
    }

    #[test]
    fn carers_get_no_extra_call_link() {
        let html = render_to_string(|| {
            provide_session(Some(carer_user()));
            view! { <DayPlannerPage/> }
        });
        assert!(!html.contains(paths::EXTRA_CALL));
    }

    #[test]
    fn extra_call_page_renders_the_form() {
        let html = render_to_string(|| {
            provide_session(Some(admin_user()));
            view! { <ExtraCallPage/> }
        });
        assert!(html.contains("id=\"service_user\""));
        assert!(html.contains("Add extra call"));
        assert!(html.contains("Will be saved as unallocated."));
    }
}
