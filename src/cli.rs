use clap::Subcommand;

mod config;
mod gui;
mod search;
mod show;
mod suggest;

#[derive(Subcommand)]
pub enum Commands {
    #[command(subcommand, about = "Show or change configurations")]
    Config(config::ConfigCommand),

    #[command(about = "Open the directory in a desktop window")]
    #[clap(visible_aliases = &["ui"])]
    Gui(Box<gui::GuiCommand>),

    #[command(about = "Search companies by name or description")]
    #[clap(visible_aliases = &["s"])]
    Search(Box<search::SearchCommand>),

    #[command(about = "Show a company with its stock and revenue around the event date")]
    Show(Box<show::ShowCommand>),

    #[command(about = "List company name suggestions")]
    Suggest(Box<suggest::SuggestCommand>),
}
