//! Metadata command.

use crate::config::Settings;
use crate::services::Annotator;

/// Print the app metadata as served at `GET /`.
pub fn cmd_metadata(settings: &Settings, pretty: bool) -> anyhow::Result<()> {
    let annotator = Annotator::from_settings(settings);
    println!("{}", annotator.metadata().to_json(pretty || settings.pretty));
    Ok(())
}
