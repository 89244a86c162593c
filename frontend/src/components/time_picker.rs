use leptos::*;

use crate::utils::time::parse_clock;

pub fn minute_options(step: u32) -> Vec<u32> {
    let step = step.clamp(1, 30);
    (0..60).step_by(step as usize).collect()
}

/// Splits an `HH:MM` (or `HH:MM:SS`) value into the hour and minute shown by the selects.
pub fn split_hhmm(value: &str) -> (Option<u32>, Option<u32>) {
    use chrono::Timelike;
    match parse_clock(value) {
        Some(time) => (Some(time.hour()), Some(time.minute())),
        None => (None, None),
    }
}

pub fn join_hhmm(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour.min(23), minute.min(59))
}

#[component]
pub fn TimePicker(
    #[prop(into)] id: String,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(default = 5)] minute_step: u32,
    #[prop(optional, into)] invalid: MaybeSignal<bool>,
) -> impl IntoView {
    let hour = move || split_hhmm(&value.get()).0;
    let minute = move || split_hhmm(&value.get()).1;
    let minutes = minute_options(minute_step);
    let select_class = move || {
        if invalid.get() {
            "rounded-md border border-status-error-border bg-form-control-bg px-2 py-1"
        } else {
            "rounded-md border border-form-control-border bg-form-control-bg px-2 py-1"
        }
    };

    view! {
        <div class="flex items-center gap-1" id=id.clone()>
            <select
                aria-label="Hour"
                id=format!("{}-hour", id)
                class=select_class
                on:change=move |ev| {
                    if let Ok(h) = event_target_value(&ev).parse::<u32>() {
                        on_change.call(join_hhmm(h, minute().unwrap_or(0)));
                    }
                }
            >
                <option value="" selected=move || hour().is_none()>"--"</option>
                {(0..24u32)
                    .map(|h| view! {
                        <option value=h.to_string() selected=move || hour() == Some(h)>
                            {format!("{:02}", h)}
                        </option>
                    })
                    .collect_view()}
            </select>
            <span>":"</span>
            <select
                aria-label="Minute"
                id=format!("{}-minute", id)
                class=select_class
                on:change=move |ev| {
                    if let Ok(m) = event_target_value(&ev).parse::<u32>() {
                        on_change.call(join_hhmm(hour().unwrap_or(0), m));
                    }
                }
            >
                <option value="" selected=move || minute().is_none()>"--"</option>
                {minutes
                    .into_iter()
                    .map(|m| view! {
                        <option value=m.to_string() selected=move || minute() == Some(m)>
                            {format!("{:02}", m)}
                        </option>
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minute_options_follow_step() {
        assert_eq!(minute_options(15), vec![0, 15, 30, 45]);
        assert_eq!(minute_options(5).len(), 12);
        assert_eq!(minute_options(0), (0..60).collect::<Vec<_>>());
    }

    #[test]
    fn split_and_join_hhmm() {
        assert_eq!(split_hhmm("09:05"), (Some(9), Some(5)));
        assert_eq!(split_hhmm(""), (None, None));
        assert_eq!(split_hhmm("18:45:00"), (Some(18), Some(45)));
        assert_eq!(join_hhmm(7, 30), "07:30");
    }
}
