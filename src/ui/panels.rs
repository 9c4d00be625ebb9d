use eframe::egui::{self, Color32, RichText, Ui};

use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar – title and the two filter dropdowns
// ---------------------------------------------------------------------------

/// Render the title bar with the city and gender dropdowns.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    let cities = state.dashboard.dataset().cities.clone();
    let genders: Vec<String> = state
        .dashboard
        .dataset()
        .genders
        .iter()
        .map(|g| g.to_string())
        .collect();

    ui.horizontal(|ui: &mut Ui| {
        ui.label(
            RichText::new("Tableau de bord des ventes du supermarché")
                .color(Color32::WHITE)
                .size(25.0)
                .strong(),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            let gender = dropdown(ui, "gender_filter", "Choisissez un sexe", &genders, &state.filters.gender);
            if let Some(choice) = gender {
                state.set_gender(choice);
            }
            let city = dropdown(ui, "city_filter", "Choisissez une ville", &cities, &state.filters.city);
            if let Some(choice) = city {
                state.set_city(choice);
            }
        });
    });
}

/// A combo box with a clearing entry. Returns `Some(new selection)` when the
/// user picked something.
fn dropdown(
    ui: &mut Ui,
    id: &str,
    placeholder: &str,
    options: &[String],
    current: &Option<String>,
) -> Option<Option<String>> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .width(200.0)
        .selected_text(current.as_deref().unwrap_or(placeholder))
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "(tous)").clicked() {
                picked = Some(None);
            }
            for option in options {
                let selected = current.as_deref() == Some(option.as_str());
                if ui.selectable_label(selected, option).clicked() {
                    picked = Some(Some(option.clone()));
                }
            }
        });
    picked
}

// ---------------------------------------------------------------------------
// Indicator cards
// ---------------------------------------------------------------------------

/// Render the total amount and purchase count cards side by side.
pub fn indicator_cards(ui: &mut Ui, state: &AppState) {
    ui.columns(2, |cols| {
        card(
            &mut cols[0],
            "Montant total des achats",
            &state.snapshot.total_amount,
            color::TOTAL_CARD,
        );
        card(
            &mut cols[1],
            "Nombre total d'achats",
            &state.snapshot.purchase_count,
            color::COUNT_CARD,
        );
    });
}

fn card(ui: &mut Ui, title: &str, value: &str, fill: Color32) {
    egui::Frame::default()
        .fill(fill)
        .corner_radius(10.0)
        .inner_margin(10.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).color(Color32::WHITE).size(16.0));
            ui.label(RichText::new(value).color(Color32::WHITE).size(24.0).strong());
        });
}
