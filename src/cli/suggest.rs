use colored::Colorize;
use impact_insights::api;

#[derive(clap::Args)]
pub struct SuggestCommand {
    #[arg(help = "Beginning or part of a company name; omit for the default suggestions")]
    text: Option<String>,
}

impl SuggestCommand {
    pub async fn exec(&self) {
        match api::suggestions(self.text.as_deref().unwrap_or_default()).await {
            Ok(names) => {
                if names.is_empty() {
                    println!("[!] No suggestion");
                } else {
                    for name in names {
                        println!("{}", name.cyan());
                    }
                }
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}
