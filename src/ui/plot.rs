use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color;
use crate::data::aggregate::format_amount;
use crate::data::model::Gender;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;

fn chart_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).color(color::TITLE).size(22.0));
}

fn empty_hint(ui: &mut Ui) {
    ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new("Aucune vente pour cette sélection").color(color::TEXT));
        });
    });
}

// ---------------------------------------------------------------------------
// Histogram of line totals, stacked by gender
// ---------------------------------------------------------------------------

pub fn amount_histogram(ui: &mut Ui, state: &AppState) {
    chart_title(ui, "Répartition des montants totaux des achats par sexe");
    let bins = &state.snapshot.histogram;
    if bins.is_empty() {
        empty_hint(ui);
        return;
    }

    let chart_for = |gender: Gender| {
        let bars: Vec<Bar> = bins
            .iter()
            .map(|b| Bar::new(b.center(), b.count(gender) as f64).width(b.width()))
            .collect();
        BarChart::new(bars)
            .name(gender.as_str())
            .color(color::gender_color(gender).gamma_multiply(0.85))
    };
    let female = chart_for(Gender::Female);
    let male = chart_for(Gender::Male).stack_on(&[&female]);

    Plot::new("amount_histogram")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Montant total des achats")
        .y_axis_label("Nombre")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(female);
            plot_ui.bar_chart(male);
        });
}

// ---------------------------------------------------------------------------
// Share of sales per product line
// ---------------------------------------------------------------------------

/// Angular extent of one pie slice, in radians, clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice<'a> {
    pub label: &'a str,
    pub value: f64,
    pub share: f64,
    pub start: f64,
    pub sweep: f64,
}

/// Lay out slices proportionally to their values. Non-positive totals give
/// no slices.
pub fn pie_slices(categories: &BTreeMap<String, f64>) -> Vec<PieSlice<'_>> {
    let total: f64 = categories.values().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut start = -FRAC_PI_2;
    categories
        .iter()
        .filter(|(_, v)| **v > 0.0)
        .map(|(label, &value)| {
            let share = value / total;
            let slice = PieSlice {
                label,
                value,
                share,
                start,
                sweep: share * TAU,
            };
            start += slice.sweep;
            slice
        })
        .collect()
}

fn arc_point(center: Pos2, radius: f32, angle: f64) -> Pos2 {
    center + egui::vec2(angle.cos() as f32, angle.sin() as f32) * radius
}

/// Split wide slices so every polygon stays convex.
fn slice_shapes(center: Pos2, radius: f32, slice: &PieSlice<'_>, fill: Color32) -> Vec<Shape> {
    let pieces = (slice.sweep / FRAC_PI_4).ceil().max(1.0) as usize;
    let piece_sweep = slice.sweep / pieces as f64;
    (0..pieces)
        .map(|p| {
            let from = slice.start + p as f64 * piece_sweep;
            let steps = 12;
            let mut points = vec![center];
            points.extend((0..=steps).map(|s| {
                arc_point(center, radius, from + piece_sweep * s as f64 / steps as f64)
            }));
            Shape::convex_polygon(points, fill, Stroke::NONE)
        })
        .collect()
}

pub fn category_pie(ui: &mut Ui, state: &AppState) {
    chart_title(ui, "Répartition des ventes par catégorie de produit");
    let slices = pie_slices(&state.snapshot.categories);
    if slices.is_empty() {
        empty_hint(ui);
        return;
    }

    let side = ui.available_width().min(CHART_HEIGHT - 80.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), side), Sense::hover());
    let center = rect.center();
    let radius = side / 2.0 - 4.0;
    let painter = ui.painter_at(rect);

    for slice in &slices {
        painter.extend(slice_shapes(center, radius, slice, state.color_map.color_for(slice.label)));
    }
    if slices.len() > 1 {
        for slice in &slices {
            painter.line_segment(
                [center, arc_point(center, radius, slice.start)],
                Stroke::new(1.0, Color32::WHITE),
            );
        }
    }
    for slice in slices.iter().filter(|s| s.share >= 0.04) {
        painter.text(
            arc_point(center, radius * 0.65, slice.start + slice.sweep / 2.0),
            Align2::CENTER_CENTER,
            format!("{:.1}%", slice.share * 100.0),
            FontId::proportional(12.0),
            Color32::WHITE,
        );
    }

    ui.add_space(6.0);
    let currency = &state.dashboard.units().currency_symbol;
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder())
        .column(Column::auto())
        .column(Column::auto())
        .body(|mut body| {
            for slice in &slices {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            let (swatch, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), Sense::hover());
                            ui.painter().rect_filled(swatch, 2.0, state.color_map.color_for(slice.label));
                            ui.label(slice.label);
                        });
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_amount(slice.value, currency));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.1}%", slice.share * 100.0));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Weekly trend
// ---------------------------------------------------------------------------

pub fn weekly_trend(ui: &mut Ui, state: &AppState) {
    chart_title(ui, "Évolution du montant total des achats par semaine");
    let weeks = &state.snapshot.weekly;
    if weeks.is_empty() {
        empty_hint(ui);
        return;
    }

    let series: Vec<[f64; 2]> = weeks.iter().map(|w| [w.week as f64, w.total]).collect();
    let line = Line::new(PlotPoints::from(series.clone()))
        .color(color::TREND_LINE)
        .width(3.0);
    let markers = Points::new(PlotPoints::from(series))
        .color(color::TREND_MARKER)
        .radius(4.0);

    Plot::new("weekly_trend")
        .height(CHART_HEIGHT)
        .x_axis_label("Semaine")
        .y_axis_label("Montant total des achats")
        .x_axis_formatter(|mark, _range| format!("{:02}", mark.value.round() as i64))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(line);
            plot_ui.points(markers);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_the_full_circle() {
        let mut cats = BTreeMap::new();
        cats.insert("Food".to_string(), 30.0);
        cats.insert("Health".to_string(), 10.0);
        cats.insert("Sports".to_string(), 60.0);

        let slices = pie_slices(&cats);
        assert_eq!(slices.len(), 3);
        let swept: f64 = slices.iter().map(|s| s.sweep).sum();
        assert!((swept - TAU).abs() < 1e-12);
        assert!((slices[0].start + FRAC_PI_2).abs() < 1e-12);
        assert!((slices[2].share - 0.6).abs() < 1e-12);
        // Each slice starts where the previous one ended.
        for pair in slices.windows(2) {
            assert!((pair[0].start + pair[0].sweep - pair[1].start).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_breakdown_has_no_slices() {
        assert!(pie_slices(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn wide_slice_is_split_into_convex_pieces() {
        let slice = PieSlice {
            label: "All",
            value: 1.0,
            share: 1.0,
            start: -FRAC_PI_2,
            sweep: TAU,
        };
        let shapes = slice_shapes(Pos2::new(50.0, 50.0), 40.0, &slice, Color32::RED);
        assert_eq!(shapes.len(), 8);
    }
}
