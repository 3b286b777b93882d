use std::sync::Arc;

use anyhow::Result;
use churn_ingest::SqliteConnector;
use churn_io::{CachedConfigReader, FsConfigReader};
use churn_pipeline::{Pipeline, PipelineContext, PipelineRun};
use tracing::{info, info_span};

use churn_cli::settings::Settings;

use crate::cli::Cli;

/// Resolves settings, wires the SQLite source and runs the requested stages.
pub fn run_pipeline(cli: &Cli) -> Result<(Settings, PipelineRun)> {
    let settings = Settings::load(cli.config.as_deref())?;
    let span = info_span!("pipeline", dataset = %settings.dataset_name);
    let _guard = span.enter();
    info!(
        project_root = %settings.project_root.display(),
        database = %settings.database_path.display(),
        schema = %settings.schema_file.display(),
        "settings resolved"
    );

    let connector = Arc::new(SqliteConnector::new(settings.database_path.clone()));
    let ctx = PipelineContext::new(settings.project_root.clone(), settings.dataset(), connector)
        .with_config_reader(Arc::new(CachedConfigReader::new(FsConfigReader)));
    let pipeline = match cli.through {
        Some(stage) => Pipeline::through(stage.into()),
        None => Pipeline::default(),
    };

    let run = pipeline.run_all(&ctx)?;
    Ok((settings, run))
}
