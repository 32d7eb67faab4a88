use std::{path::PathBuf, sync::Arc};

use url::Url;

use crate::{
    CONFIG, Config, PER_PAGE,
    detail::{self, CompanyDetail},
    ds::{DirectoryApi, backend::Backend},
    error::{IiError, IiResult},
    model::CompaniesPage,
};

/// The configured backend as a shareable data source.
pub async fn directory() -> Arc<dyn DirectoryApi> {
    Arc::new(Backend::from_config().await)
}

pub async fn search_companies(query: &str, page: u32) -> IiResult<CompaniesPage> {
    Backend::from_config()
        .await
        .companies(query, page.max(1), PER_PAGE)
        .await
}

pub async fn suggestions(text: &str) -> IiResult<Vec<String>> {
    Backend::from_config().await.suggestions(text).await
}

pub async fn company_detail(name: &str) -> Result<CompanyDetail, String> {
    let backend = Backend::from_config().await;
    detail::load_company_detail(&backend, name).await
}

pub fn config_path() -> IiResult<PathBuf> {
    Ok(confy::get_configuration_file_path(
        env!("CARGO_PKG_NAME"),
        None,
    )?)
}

pub async fn get_config() -> IiResult<Config> {
    Ok(CONFIG.read().await.clone())
}

/// Persists one configuration value and applies it to the running process.
pub async fn set_config(key: &str, value: &str) -> IiResult<()> {
    let mut stored: Config = confy::load(env!("CARGO_PKG_NAME"), None)?;
    apply_config(&mut stored, key, value)?;
    confy::store(env!("CARGO_PKG_NAME"), None, &stored)?;

    let mut config = CONFIG.write().await;
    apply_config(&mut config, key, value)?;

    Ok(())
}

fn apply_config(config: &mut Config, key: &str, value: &str) -> IiResult<()> {
    match key.to_lowercase().as_str() {
        "api_base" => {
            Url::parse(value)?;
            config.api_base = value.to_string();
        }
        "timeout_secs" => {
            let timeout_secs = value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| IiError::Invalid {
                    code: "INVALID_CONFIG_VALUE",
                    message: format!("'{value}' is not a positive number of seconds"),
                })?;
            config.timeout_secs = timeout_secs;
        }
        _ => {
            return Err(IiError::Invalid {
                code: "INVALID_CONFIG_KEY",
                message: format!("Unknown configuration '{key}'"),
            });
        }
    }

    Ok(())
}
