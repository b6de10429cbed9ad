//! Selection menu derivation
//!
//! Which bulk actions are legal for the current selection is a pure
//! projection of the selected alerts' attributes. It is recomputed in full
//! after every selection change and every list replacement; nothing here
//! touches the network or caches across mutations.

use serde::Serialize;
use triage_core::{AlertStatus, AlertSummary};

/// Enabled/disabled state of the bulk-action menu.
///
/// `select_all` is carried alongside the derived flags: it is an input
/// (the header checkbox), not a projection of the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MenuState {
    pub follow: bool,
    pub unfollow: bool,
    pub mark_as_read: bool,
    pub mark_as_unread: bool,
    pub delete: bool,
    pub create_new_case: bool,
    pub merge_in_case: bool,
    pub select_all: bool,
}

/// A read alert cannot be marked read again
pub fn can_mark_as_read(alert: &AlertSummary) -> bool {
    !matches!(alert.status, AlertStatus::Ignored | AlertStatus::Imported)
}

/// An unread alert cannot be marked unread again
pub fn can_mark_as_unread(alert: &AlertSummary) -> bool {
    !matches!(alert.status, AlertStatus::New | AlertStatus::Updated)
}

/// Derive the menu from the current selection. O(selection), no I/O.
///
/// An empty selection disables everything. Follow/unfollow require a
/// selection homogeneous in `follow`; a mixed selection enables neither.
pub fn derive_menu(selection: &[AlertSummary]) -> MenuState {
    if selection.is_empty() {
        return MenuState::default();
    }

    let all_followed = selection.iter().all(|a| a.follow);
    let none_followed = selection.iter().all(|a| !a.follow);

    let any_read = selection.iter().any(|a| !can_mark_as_read(a));
    let any_unread = selection.iter().any(|a| !can_mark_as_unread(a));
    let any_imported = selection
        .iter()
        .any(|a| a.status == AlertStatus::Imported);
    let any_in_case = selection.iter().any(|a| a.case_id.is_some());

    MenuState {
        follow: none_followed,
        unfollow: all_followed,
        mark_as_read: !any_read,
        mark_as_unread: !any_unread,
        delete: !any_in_case,
        create_new_case: !any_imported,
        merge_in_case: !any_imported,
        select_all: false,
    }
}
