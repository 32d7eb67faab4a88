use eframe::egui;

use super::charts::{self, AFTER_COLOR, BEFORE_COLOR};
use crate::{
    detail::{DetailState, FinancePanel},
    route::Route,
};

/// Draws the company profile. Returns the route to go back to when asked.
pub fn show(ui: &mut egui::Ui, state: &DetailState) -> Option<Route> {
    let mut route: Option<Route> = None;

    match state {
        DetailState::Loading => {
            ui.horizontal(|ui| {
                ui.heading("Loading...");
                ui.spinner();
            });
        }
        DetailState::Failed(message) => {
            ui.heading(message);
            if ui.link("← Back to Search").clicked() {
                route = Some(Route::Search);
            }
        }
        DetailState::Loaded(detail) => {
            let company = &detail.company;

            if ui.link("← Back to Search").clicked() {
                route = Some(Route::Search);
            }
            ui.add_space(8.0);

            ui.heading(egui::RichText::new(&company.name).size(28.0).strong());
            ui.label(&company.description);
            ui.label(
                egui::RichText::new(format!("Event Date: {}", company.event_date()))
                    .color(egui::Color32::DARK_GRAY),
            );
            if let Some(link) = &company.link {
                ui.hyperlink_to(
                    format!(
                        "Visit Source: {}",
                        company.source.as_deref().unwrap_or("Official Site")
                    ),
                    link,
                );
            }

            ui.add_space(16.0);
            ui.separator();

            match &detail.finance {
                FinancePanel::Unavailable(message) => {
                    ui.label(message);
                }
                FinancePanel::Charts(finance_charts) => {
                    ui.columns(2, |columns| {
                        charts::stock_chart(
                            &mut columns[0],
                            "before_chart",
                            &finance_charts.before,
                            BEFORE_COLOR,
                            "Before",
                        );
                        charts::stock_chart(
                            &mut columns[1],
                            "after_chart",
                            &finance_charts.after,
                            AFTER_COLOR,
                            "After",
                        );
                    });

                    ui.add_space(16.0);
                    charts::revenue_chart(ui, "revenue_chart", &finance_charts.revenue);
                }
            }
        }
    }

    route
}
