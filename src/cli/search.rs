use colored::Colorize;
use impact_insights::api;
use tabled::settings::{
    Color, Width,
    measurement::Percent,
    object::{Columns, Object, Rows},
    peaker::Priority,
};

#[derive(clap::Args)]
pub struct SearchCommand {
    #[arg(help = "Text matched against company names and descriptions; omit to list all")]
    query: Option<String>,

    #[arg(short = 'p', long = "page", default_value_t = 1, help = "Page number, from 1")]
    page: u32,
}

impl SearchCommand {
    pub async fn exec(&self) {
        let query = self.query.as_deref().unwrap_or_default();

        match api::search_companies(query, self.page).await {
            Ok(companies_page) => {
                let (page, pages) = companies_page.page_bounds();

                if companies_page.results.is_empty() {
                    println!("[!] No companies found");
                    return;
                }

                let mut table_data: Vec<Vec<String>> = vec![vec![
                    "".to_string(),
                    "Event Date".to_string(),
                    "Ticker".to_string(),
                    "Description".to_string(),
                ]];
                for company in &companies_page.results {
                    table_data.push(vec![
                        company.name.to_string(),
                        company.event_date(),
                        company.ticker.clone().unwrap_or("-".to_string()),
                        company.description.to_string(),
                    ]);
                }

                let mut table = tabled::builder::Builder::from_iter(&table_data).build();
                table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
                table.modify(Columns::first().not(Rows::first()), Color::FG_CYAN);
                table.with(Width::wrap(Percent(100)).priority(Priority::max(true)));
                println!("\n{table}");
                println!("Page {page} of {pages}");
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}
