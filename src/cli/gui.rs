use colored::Colorize;
use directories::ProjectDirs;
use eframe::egui;
use impact_insights::{VERSION, api, gui::app::InsightsApp, route::Route};

#[derive(clap::Args)]
pub struct GuiCommand {
    #[arg(
        short = 'c',
        long = "company",
        help = "Open the profile of this company instead of the search page"
    )]
    company: Option<String>,

    #[arg(
        short = 'r',
        long = "route",
        conflicts_with = "company",
        help = "Open this page, e.g. / or /company/PepsiCo"
    )]
    route: Option<String>,
}

impl GuiCommand {
    pub async fn exec(&self) {
        let route = match (&self.company, &self.route) {
            (Some(company), _) => Route::Company(company.to_string()),
            (None, Some(path)) => match path.parse::<Route>() {
                Ok(route) => route,
                Err(err) => {
                    println!("[!] {}", err.to_string().red());
                    return;
                }
            },
            (None, None) => Route::Search,
        };

        let api_base = match api::get_config().await {
            Ok(config) => config.api_base,
            Err(err) => {
                println!("[!] {}", err.to_string().red());
                return;
            }
        };
        let source = api::directory().await;

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 800.0]),
            persistence_path: ProjectDirs::from("", "", env!("CARGO_PKG_NAME"))
                .map(|dirs| dirs.data_dir().join("gui")),
            ..Default::default()
        };

        if let Err(err) = eframe::run_native(
            &format!("Impact Insights {VERSION}"),
            options,
            Box::new(|cc| Ok(Box::new(InsightsApp::new(cc, source, &api_base, route)))),
        ) {
            println!("[!] {}", err.to_string().red());
        }
    }
}
