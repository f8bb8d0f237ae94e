use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use polars::prelude::DataFrame;
use ride_eda::config::PipelineConfig;
use ride_eda::pipeline::{import_file, load_rides, process_rides, profile_rides, run_pipeline};
use ride_eda::store::{ParquetTableStore, TableStore as _};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ride-eda", about = "Taxi ride profiling, cleaning and zone statistics")]
pub struct Cli {
    /// Warehouse directory holding one Parquet file per table
    #[arg(long, global = true, env = "RIDE_EDA_WAREHOUSE", default_value = "./warehouse")]
    pub warehouse: PathBuf,

    /// Path to a JSON pipeline configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean the source table and write the cleaned and zone statistics tables
    Run {
        /// Print the source table profile before running
        #[arg(long)]
        profile: bool,
    },
    /// Print a profile of the source table
    Profile,
    /// Seed a table from a CSV or Parquet file
    Import {
        /// Path to the file to import (CSV, Parquet)
        #[arg(short, long)]
        file: PathBuf,

        /// Target table name. Defaults to the configured source table.
        #[arg(short, long)]
        table: Option<String>,
    },
    /// List the tables in the warehouse
    Tables,
    /// Print the shape and first rows of a table
    Show {
        /// Table name, optionally namespaced (`ns.table`)
        #[arg(short, long)]
        table: String,

        /// Number of rows to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
}

impl Cli {
    fn load_config(&self) -> Result<PipelineConfig> {
        match &self.config {
            Some(path) => {
                println!("Loading config from {}...", path.display());
                Ok(PipelineConfig::from_file(path)?)
            }
            None => Ok(PipelineConfig::default()),
        }
    }
}

pub fn run_command(cli: Cli) -> Result<()> {
    let config = cli.load_config()?;
    let store = ParquetTableStore::new(&cli.warehouse)
        .with_context(|| format!("Failed to open warehouse {}", cli.warehouse.display()))?
        .with_default_namespace(config.namespace.clone());

    match cli.command {
        Commands::Run { profile } => handle_run(&store, &config, profile),
        Commands::Profile => handle_profile(&store, &config),
        Commands::Import { file, table } => handle_import(&store, &config, file, table),
        Commands::Tables => handle_tables(&store),
        Commands::Show { table, limit } => handle_show(&store, &table, limit),
    }
}

fn handle_run(store: &ParquetTableStore, config: &PipelineConfig, profile: bool) -> Result<()> {
    let report = if profile {
        let raw = load_rides(store, &config.source_table)?;
        println!("{}", profile_rides(&raw, config.top_n)?);
        process_rides(store, config, raw)?
    } else {
        run_pipeline(store, config)?
    };

    println!("{}", report.summary());
    println!(
        "Wrote {} ({} rows) and {} ({} rows) to {}",
        config.cleaned_table,
        report.rows_after,
        config.zone_stats_table,
        report.zone_rows,
        store.root().display()
    );
    Ok(())
}

fn handle_profile(store: &ParquetTableStore, config: &PipelineConfig) -> Result<()> {
    let raw = load_rides(store, &config.source_table)?;
    println!("{}", profile_rides(&raw, config.top_n)?);
    Ok(())
}

fn handle_import(
    store: &ParquetTableStore,
    config: &PipelineConfig,
    file: PathBuf,
    table: Option<String>,
) -> Result<()> {
    let table = table.unwrap_or_else(|| config.source_table.clone());
    println!("Importing {} into {table}...", file.display());

    let rows = import_file(store, &file, &table)?;
    println!("Successfully imported {rows} rows.");
    Ok(())
}

fn handle_tables(store: &ParquetTableStore) -> Result<()> {
    let tables = store.list_tables()?;
    if tables.is_empty() {
        println!("No tables in {}", store.root().display());
    }
    for table in tables {
        println!("{table}");
    }
    Ok(())
}

fn handle_show(store: &ParquetTableStore, table: &str, limit: usize) -> Result<()> {
    let df: DataFrame = store
        .read_table(table)
        .with_context(|| format!("Failed to read {table}"))?;
    let (rows, cols) = df.shape();
    println!("{table}: {rows} rows x {cols} columns");
    println!("{}", df.head(Some(limit)));
    Ok(())
}
