use clap::Subcommand;

mod set;
mod show;

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Persist one configuration value")]
    Set(Box<set::ConfigSetCommand>),

    #[command(about = "Show the configuration in effect")]
    #[clap(visible_aliases = &["ls"])]
    Show(Box<show::ConfigShowCommand>),
}

impl ConfigCommand {
    pub async fn exec(&self) {
        match self {
            ConfigCommand::Set(cmd) => cmd.exec().await,
            ConfigCommand::Show(cmd) => cmd.exec().await,
        }
    }
}
