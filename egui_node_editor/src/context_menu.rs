//! Filterable node-creation menu.

use egui::{Key, RichText, ScrollArea, TextEdit, Ui};

/// Text typed into the filter box plus the keyboard highlight.
#[derive(Clone, Debug, Default)]
pub struct ModelMenuState {
    pub filter: String,
    pub selected_index: usize,
    /// Set when the highlight moved and its entry should be scrolled into view.
    pub scroll_to_selected: bool,
}

/// Result of one frame of the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    Open,
    Picked(String),
    Closed,
}

/// Names containing `filter`, ignoring case. An empty filter keeps everything.
pub fn filter_model_names<'a>(names: &'a [String], filter: &str) -> Vec<&'a str> {
    let needle = filter.to_lowercase();
    names
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

/// Render the filter box followed by the matching model names.
pub fn show_model_menu(ui: &mut Ui, state: &mut ModelMenuState, names: &[String]) -> MenuOutcome {
    if ui.input(|i| i.key_pressed(Key::Escape)) {
        *state = ModelMenuState::default();
        return MenuOutcome::Closed;
    }

    let text_res = ui
        .horizontal(|ui| {
            let res = ui.add(
                TextEdit::singleline(&mut state.filter)
                    .hint_text("Filter")
                    .desired_width(160.0),
            );
            if !state.filter.is_empty() && ui.small_button("\u{2715}").clicked() {
                state.filter.clear();
                state.selected_index = 0;
            }
            res
        })
        .inner;
    if !ui.memory(|m| m.has_focus(text_res.id)) && state.filter.is_empty() {
        text_res.request_focus();
    }
    if text_res.changed() {
        state.selected_index = 0;
    }

    ui.separator();

    let visible = filter_model_names(names, &state.filter);
    let mut picked: Option<String> = None;

    if !visible.is_empty() {
        state.selected_index = state.selected_index.min(visible.len() - 1);
        let previous = state.selected_index;
        if ui.input(|i| i.key_pressed(Key::ArrowDown)) {
            state.selected_index = (state.selected_index + 1).min(visible.len() - 1);
        }
        if ui.input(|i| i.key_pressed(Key::ArrowUp)) {
            state.selected_index = state.selected_index.saturating_sub(1);
        }
        if state.selected_index != previous {
            state.scroll_to_selected = true;
        }
        if ui.input(|i| i.key_pressed(Key::Enter)) {
            picked = visible.get(state.selected_index).map(|s| s.to_string());
        }
    }

    ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
        for (i, name) in visible.iter().enumerate() {
            let is_selected = i == state.selected_index;
            let label = if is_selected {
                RichText::new(*name).strong()
            } else {
                RichText::new(*name)
            };
            let response = ui.selectable_label(is_selected, label);
            if response.clicked() {
                picked = Some(name.to_string());
            }
            if is_selected && state.scroll_to_selected {
                response.scroll_to_me(Some(egui::Align::Center));
            }
        }
    });
    state.scroll_to_selected = false;

    match picked {
        Some(name) => {
            *state = ModelMenuState::default();
            MenuOutcome::Picked(name)
        }
        None => MenuOutcome::Open,
    }
}
