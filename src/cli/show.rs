use colored::Colorize;
use impact_insights::{
    api,
    detail::{FinancePanel, RevenueChart, StockChart},
    model::Trend,
    utils::{datetime::date_to_str, text::compact_number},
};
use indicatif::{ProgressBar, ProgressStyle};
use tabled::settings::{
    Alignment, Color, Width,
    measurement::Percent,
    object::{Columns, Object, Rows},
    peaker::Priority,
};
use tokio::time::Duration;

#[derive(clap::Args)]
pub struct ShowCommand {
    #[arg(help = "Company name, e.g. PepsiCo")]
    name: String,
}

impl ShowCommand {
    pub async fn exec(&self) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{msg}[{elapsed}] {spinner:.cyan}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = api::company_detail(&self.name).await;
        spinner.finish_and_clear();

        match result {
            Err(message) => {
                println!("[!] {}", message.red());
            }
            Ok(detail) => {
                let company = &detail.company;

                let mut table_data: Vec<Vec<String>> = vec![
                    vec!["Name".to_string(), company.name.to_string()],
                    vec!["Description".to_string(), company.description.to_string()],
                    vec!["Event Date".to_string(), company.event_date()],
                    vec![
                        "Ticker".to_string(),
                        company.ticker.clone().unwrap_or("-".to_string()),
                    ],
                ];
                if let Some(link) = &company.link {
                    table_data.push(vec![
                        company
                            .source
                            .clone()
                            .unwrap_or("Official Site".to_string()),
                        link.to_string(),
                    ]);
                }

                let mut table = tabled::builder::Builder::from_iter(&table_data).build();
                table.modify(Columns::first(), Color::FG_CYAN);
                table.with(Width::wrap(Percent(100)).priority(Priority::max(true)));
                println!("\n{table}");

                match &detail.finance {
                    FinancePanel::Unavailable(message) => {
                        println!("\n{}", message.yellow());
                    }
                    FinancePanel::Charts(charts) => {
                        print_stock_chart(&charts.before);
                        print_stock_chart(&charts.after);
                        print_revenue_chart(&charts.revenue);
                    }
                }
            }
        }
    }
}

fn print_stock_chart(chart: &StockChart) {
    println!("\n{}", chart.title.bold());

    let (Some(first), Some(last), Some((min, max))) =
        (chart.points.first(), chart.points.last(), chart.value_range())
    else {
        println!("{}", chart.fallback.yellow());
        return;
    };

    let table_data: Vec<Vec<String>> = vec![
        vec![
            "From".to_string(),
            "To".to_string(),
            "Days".to_string(),
            "Open".to_string(),
            "Close".to_string(),
            "Low".to_string(),
            "High".to_string(),
        ],
        vec![
            date_to_str(&first.date),
            date_to_str(&last.date),
            format!("{}", chart.points.len()),
            format!("{:.2}", first.value),
            format!("{:.2}", last.value),
            format!("{min:.2}"),
            format!("{max:.2}"),
        ],
    ];

    let mut table = tabled::builder::Builder::from_iter(&table_data).build();
    table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
    table.modify(Columns::new(2..), Alignment::right());
    println!("{table}");

    let trend = chart.trend.to_string();
    let trend = match chart.trend {
        Trend::Increase => trend.green(),
        Trend::Decrease => trend.red(),
        Trend::Flat | Trend::NotAvailable => trend.bright_black(),
    };
    println!("Overall Trend: {trend}");
}

fn print_revenue_chart(chart: &RevenueChart) {
    println!("\n{}", chart.title.bold());

    if !chart.is_available() {
        println!("{}", chart.fallback.yellow());
        return;
    }

    let mut table_data: Vec<Vec<String>> = vec![vec!["".to_string(), "Revenue".to_string()]];
    for point in &chart.points {
        table_data.push(vec![point.label.to_string(), compact_number(point.value)]);
    }

    let mut table = tabled::builder::Builder::from_iter(&table_data).build();
    table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
    table.modify(Columns::first().not(Rows::first()), Color::FG_CYAN);
    table.modify(Columns::new(1..), Alignment::right());
    println!("{table}");
}
