use std::{sync::Arc, time::Duration};

use eframe::egui;
use log::debug;

use crate::{detail::DetailSession, ds::DirectoryApi, route::Route, search::SearchSession};

use super::{detail_view, search_view};

pub struct InsightsApp {
    source: Arc<dyn DirectoryApi>,
    api_base: String,

    route: Option<Route>,
    search: Option<SearchSession>,
    detail: DetailSession,
}

impl InsightsApp {
    pub fn new(
        cc: &eframe::CreationContext,
        source: Arc<dyn DirectoryApi>,
        api_base: &str,
        route: Route,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let mut app = Self {
            source: source.clone(),
            api_base: api_base.to_string(),

            route: None,
            search: None,
            detail: DetailSession::new(source),
        };
        app.navigate(Some(route));

        app
    }

    /// Mounts the view of `route` and tears down the one being left.
    fn navigate(&mut self, route: Option<Route>) {
        debug!(
            "[Navigate] {}",
            route.as_ref().map(|r| r.path()).unwrap_or_default()
        );

        match &route {
            Some(Route::Search) => {
                if self.search.is_none() {
                    let mut search = SearchSession::new(self.source.clone());
                    search.mount();
                    self.search = Some(search);
                }
                self.detail.close();
            }
            Some(Route::Company(name)) => {
                self.search = None;
                if self.detail.company_name() != Some(name.as_str()) {
                    self.detail.open(name);
                }
            }
            None => {
                self.search = None;
                self.detail.close();
            }
        }

        self.route = route;
    }
}

impl eframe::App for InsightsApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        let mut busy = false;
        if let Some(search) = &mut self.search {
            search.poll();
            busy |= search.is_busy();
        }
        self.detail.poll();
        busy |= self.detail.company_name().is_some() && self.detail.is_loading();

        if busy {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        let mut next_route: Option<Route> = None;

        egui::TopBottomPanel::top("header_panel").show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                if ui
                    .add(
                        egui::Label::new(
                            egui::RichText::new("IMPACT INSIGHTS").strong().size(20.0),
                        )
                        .sense(egui::Sense::click()),
                    )
                    .on_hover_cursor(egui::CursorIcon::PointingHand)
                    .clicked()
                {
                    next_route = Some(Route::Search);
                }
            });
        });

        egui::TopBottomPanel::bottom("status_panel")
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!("🖧 {}", self.api_base))
                            .color(egui::Color32::DARK_GRAY)
                            .size(12.0),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(
                                self.route.as_ref().map(|r| r.path()).unwrap_or_default(),
                            )
                            .color(egui::Color32::DARK_GRAY)
                            .size(12.0),
                        );
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match (&self.route, &mut self.search) {
                    (Some(Route::Search), Some(search)) => {
                        if let Some(route) = search_view::show(ui, search) {
                            next_route = Some(route);
                        }
                    }
                    (Some(Route::Company(_)), _) => {
                        if let Some(route) = detail_view::show(ui, self.detail.state()) {
                            next_route = Some(route);
                        }
                    }
                    _ => {
                        ui.heading("Page not found");
                        if ui.link("← Back to Search").clicked() {
                            next_route = Some(Route::Search);
                        }
                    }
                });
        });

        if let Some(route) = next_route {
            self.navigate(Some(route));
        }
    }
}
