//! Offline annotation of an MMIF file, bypassing the server.

use std::path::Path;

use console::style;

use crate::config::Settings;
use crate::models::Mmif;
use crate::services::{Annotator, ProcessingFailure, RuntimeParams};

/// Runtime switches given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flags {
    pub pretokenized: bool,
    pub uncased: bool,
    pub link: bool,
    pub overwrite: bool,
}

impl Flags {
    fn to_params(self) -> RuntimeParams {
        let mut pairs = Vec::new();
        for (name, set) in [
            ("pretokenized", self.pretokenized),
            ("uncased", self.uncased),
            ("link", self.link),
            ("overwrite", self.overwrite),
        ] {
            if set {
                pairs.push((name, "true"));
            }
        }
        RuntimeParams::from_pairs(pairs)
    }
}

/// Annotate `infile` and write the pretty-printed result to `outfile`.
pub async fn cmd_test(
    settings: &Settings,
    infile: &Path,
    outfile: &Path,
    flags: Flags,
) -> anyhow::Result<()> {
    let annotator = Annotator::from_settings(settings);
    println!("{}", annotator.metadata().to_json(true));

    let input = tokio::fs::read_to_string(infile).await?;
    let mmif = Mmif::parse(&input)?;

    let (output, failure) = match annotator.process(mmif, &flags.to_params()).await {
        Ok(mmif) => (mmif, None),
        Err(ProcessingFailure { mmif, error }) => (mmif, Some(error)),
    };

    tokio::fs::write(outfile, output.to_json(true)?).await?;

    for view in &output.views {
        println!(
            "<View id={} annotations={} app={}>",
            view.id,
            view.annotations.len(),
            view.metadata.app
        );
    }

    match failure {
        Some(error) => {
            eprintln!("{} {}", style("✗").red(), error);
            Err(error.into())
        }
        None => Ok(()),
    }
}
