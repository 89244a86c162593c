pub mod common;
pub mod confirm_dialog;
pub mod empty_state;
pub mod error;
pub mod form_dialog;
pub mod guard;
pub mod layout;
pub mod option_select;
pub mod pagination;
pub mod search_box;
pub mod side_nav;
pub mod status_toggle;
pub mod time_picker;
pub mod toast;
pub mod validation_popover;
