//! End-to-end tests for the ingestion stage against a scratch SQLite database.

use std::fs;
use std::path::{Path, PathBuf};

use churn_ingest::{ConnectorError, DataIngestion, SourceConnector, SqliteConnector};
use churn_io::{FsArtifactStore, FsConfigReader, read_csv};
use churn_model::{DataIngestionConfig, DatasetSpec, PipelineError, StageKind};
use polars::prelude::DataFrame;
use rusqlite::Connection;
use tempfile::TempDir;

const SCHEMA: &str = "insignificant_columns:\n  - RowNumber\n  - Surname\n  - NotAColumn\n";

struct Fixture {
    dir: TempDir,
    database: PathBuf,
    schema: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let database = dir.path().join("data").join("projects_db.sqlite");
        fs::create_dir_all(database.parent().unwrap()).unwrap();
        let schema = dir.path().join("settings").join("schema.yaml");
        fs::create_dir_all(schema.parent().unwrap()).unwrap();
        fs::write(&schema, SCHEMA).unwrap();

        let conn = Connection::open(&database).unwrap();
        conn.execute_batch(
            r"
            CREATE TABLE bank_churn (
                RowNumber INTEGER,
                Surname TEXT,
                CreditScore INTEGER,
                Balance REAL,
                Exited INTEGER
            );
            INSERT INTO bank_churn VALUES (1, 'Hargrave', 619, 0.0, 1);
            INSERT INTO bank_churn VALUES (2, 'Hill', 608, 83807.86, 0);
            INSERT INTO bank_churn VALUES (3, 'Onio', 502, 159660.8, 1);
            ",
        )
        .unwrap();

        Self {
            dir,
            database,
            schema,
        }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn dataset(&self) -> DatasetSpec {
        DatasetSpec::new("bank_churn", &self.schema).with_target_column("Exited")
    }

    fn run(&self) -> Result<churn_model::DataIngestionArtifact, PipelineError> {
        let connector = SqliteConnector::new(&self.database);
        let ingestion = DataIngestion::new(
            DataIngestionConfig::new(self.root()),
            self.dataset(),
            &connector,
            &FsConfigReader,
            &FsArtifactStore,
        )?;
        ingestion.run()
    }
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

fn files_under(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

#[test]
fn ingestion_writes_raw_and_interim_artifacts() {
    let fixture = Fixture::new();
    let config = DataIngestionConfig::new(fixture.root());

    let artifact = fixture.run().unwrap();

    assert_eq!(artifact.data_file_path(), config.data_file_path());
    let mut expected = vec![
        config.raw_file_path().to_path_buf(),
        config.data_file_path().to_path_buf(),
    ];
    expected.sort();
    assert_eq!(files_under(&fixture.root().join("artifacts")), expected);

    let raw = read_csv(config.raw_file_path()).unwrap();
    assert_eq!(
        column_names(&raw),
        ["RowNumber", "Surname", "CreditScore", "Balance", "Exited"]
    );

    let cleaned = read_csv(artifact.data_file_path()).unwrap();
    assert_eq!(column_names(&cleaned), ["CreditScore", "Balance", "Exited"]);
    assert_eq!(cleaned.height(), 3);
}

#[test]
fn rerun_overwrites_previous_artifacts() {
    let fixture = Fixture::new();
    let config = DataIngestionConfig::new(fixture.root());
    fixture.run().unwrap();

    let conn = Connection::open(&fixture.database).unwrap();
    conn.execute("DELETE FROM bank_churn WHERE RowNumber > 1", [])
        .unwrap();
    drop(conn);
    fixture.run().unwrap();

    assert_eq!(read_csv(config.raw_file_path()).unwrap().height(), 1);
    let interim = fs::read_to_string(config.data_file_path()).unwrap();
    assert_eq!(interim.lines().count(), 2);
    assert_eq!(interim.lines().next(), Some("CreditScore,Balance,Exited"));
}

#[test]
fn missing_table_is_a_connector_error() {
    let fixture = Fixture::new();
    let connector = SqliteConnector::new(&fixture.database);
    let ingestion = DataIngestion::new(
        DataIngestionConfig::new(fixture.root()),
        DatasetSpec::new("hotel_booking", &fixture.schema),
        &connector,
        &FsConfigReader,
        &FsArtifactStore,
    )
    .unwrap();

    let err = ingestion.run().unwrap_err();

    assert!(matches!(err, PipelineError::Connector { .. }));
    assert_eq!(err.operation(), Some("export_raw"));
    assert!(err.to_string().contains("hotel_booking"));
}

struct FailingConnector;

impl SourceConnector for FailingConnector {
    fn location(&self) -> String {
        "unreachable".to_string()
    }

    fn fetch(&self, dataset_name: &str) -> Result<DataFrame, ConnectorError> {
        Err(ConnectorError::DatasetNotFound {
            dataset: dataset_name.to_string(),
            location: self.location(),
        })
    }
}

#[test]
fn connector_failure_leaves_no_interim_file() {
    let fixture = Fixture::new();
    let config = DataIngestionConfig::new(fixture.root());
    let ingestion = DataIngestion::new(
        config.clone(),
        fixture.dataset(),
        &FailingConnector,
        &FsConfigReader,
        &FsArtifactStore,
    )
    .unwrap();

    let err = ingestion.run().unwrap_err();

    assert_eq!(err.stage(), StageKind::DataIngestion);
    assert!(matches!(err, PipelineError::Connector { .. }));
    assert!(!config.data_file_path().exists());
    assert!(!config.raw_file_path().exists());
}

#[test]
fn broken_schema_fails_before_fetching() {
    let fixture = Fixture::new();
    fs::write(&fixture.schema, "insignificant_columns: {RowNumber: true}\n").unwrap();

    let err = fixture.run().unwrap_err();

    assert!(matches!(err, PipelineError::Schema { .. }));
    assert!(!fixture.root().join("artifacts").exists());
}

struct EmptyConnector;

impl SourceConnector for EmptyConnector {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn fetch(&self, _dataset_name: &str) -> Result<DataFrame, ConnectorError> {
        Ok(polars::df!(
            "id" => Vec::<i64>::new(),
            "Exited" => Vec::<i64>::new(),
        )
        .unwrap())
    }
}

#[test]
fn empty_fetch_writes_no_artifacts() {
    let fixture = Fixture::new();
    let config = DataIngestionConfig::new(fixture.root());
    let ingestion = DataIngestion::new(
        config.clone(),
        fixture.dataset(),
        &EmptyConnector,
        &FsConfigReader,
        &FsArtifactStore,
    )
    .unwrap();

    let err = ingestion.export_raw("bank_churn").unwrap_err();
    assert!(matches!(err, PipelineError::Connector { .. }));
    assert_eq!(err.operation(), Some("export_raw"));
    assert!(err.to_string().contains("is empty"));
    assert!(!config.raw_file_path().exists());

    let err = ingestion.run().unwrap_err();
    assert!(matches!(err, PipelineError::Connector { .. }));
    assert!(!config.raw_file_path().exists());
    assert!(!config.data_file_path().exists());
}

#[test]
fn empty_table_is_a_connector_error() {
    let fixture = Fixture::new();
    let config = DataIngestionConfig::new(fixture.root());
    let conn = Connection::open(&fixture.database).unwrap();
    conn.execute("DELETE FROM bank_churn", []).unwrap();
    drop(conn);

    let err = fixture.run().unwrap_err();

    assert!(matches!(err, PipelineError::Connector { .. }));
    assert_eq!(err.operation(), Some("export_raw"));
    assert!(!config.raw_file_path().exists());
    assert!(!config.data_file_path().exists());
}
