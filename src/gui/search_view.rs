use eframe::egui;

use crate::{route::Route, search::SearchSession};

/// Draws the search section. Returns the route of a clicked company card.
pub fn show(ui: &mut egui::Ui, session: &mut SearchSession) -> Option<Route> {
    let mut route: Option<Route> = None;

    ui.add_space(12.0);
    ui.heading("SEARCH COMPANIES");
    ui.label(
        egui::RichText::new("Find details about companies and their impact")
            .color(egui::Color32::DARK_GRAY),
    );
    ui.add_space(8.0);

    let mut query = session.state().query.clone();
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("Search for a company... eg. PepsiCo, Nestlé")
                .desired_width(350.0),
        );

        if response.gained_focus() {
            session.focus();
        }
        if response.changed() {
            session.input(&query);
        }
        if response.lost_focus() {
            if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                session.submit();
            } else {
                session.blur();
            }
        }

        if ui.button("Search").clicked() {
            session.submit();
        }

        if session.is_loading_companies() {
            ui.spinner();
        }
    });

    let suggestions = session.visible_suggestions().to_vec();
    if !suggestions.is_empty() {
        let mut selected: Option<String> = None;

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_max_width(350.0);
            egui::ScrollArea::vertical()
                .id_salt("suggestions")
                .max_height(240.0)
                .show(ui, |ui| {
                    for suggestion in &suggestions {
                        if ui.selectable_label(false, suggestion).clicked() {
                            selected = Some(suggestion.clone());
                        }
                    }
                });
        });

        if let Some(name) = selected {
            session.select_suggestion(&name);
        }
    }

    ui.add_space(16.0);

    let state = session.state();
    if state.companies.is_empty() {
        ui.vertical_centered(|ui| {
            ui.label("No companies found");
        });
    } else {
        for company in &state.companies {
            let response = egui::Frame::group(ui.style())
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new(&company.name).strong().size(18.0));
                    ui.label(&company.description);

                    let event_date = company.event_date();
                    if !event_date.is_empty() {
                        ui.label(
                            egui::RichText::new(event_date)
                                .color(egui::Color32::DARK_GRAY)
                                .italics(),
                        );
                    }
                })
                .response
                .interact(egui::Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand);

            if response.clicked() {
                route = Some(Route::Company(company.name.clone()));
            }
            ui.add_space(6.0);
        }
    }

    ui.add_space(12.0);
    let (page, pages) = (state.page, state.pages);
    ui.horizontal(|ui| {
        if ui.add_enabled(page > 1, egui::Button::new("Prev")).clicked() {
            session.prev_page();
        }
        ui.label(format!("Page {page} of {pages}"));
        if ui.add_enabled(page < pages, egui::Button::new("Next")).clicked() {
            session.next_page();
        }
    });

    route
}
