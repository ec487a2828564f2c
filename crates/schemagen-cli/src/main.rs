//! schemagen CLI - Code generator for protobuf and SQL schemas
//!
//! Commands:
//! - `schemagen proto` - Generate from `.proto` service definitions
//! - `schemagen sql` - Generate from SQL `CREATE TABLE` scripts

use anyhow::Context;
use clap::Parser;
use schemagen_cli::{Cli, generate};
use schemagen_logging::{LogLevel, init_logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let level = match cli.log_level {
        Some(level) => level,
        None => config
            .log_level
            .parse::<LogLevel>()
            .context("invalid log_level in configuration")?,
    };
    init_logging(level);

    let report = generate::run(cli.kind(), &config)?;
    tracing::info!(
        "Generated {} file(s) from {} {} source(s)",
        report.written.len(),
        report.sources.len(),
        cli.kind()
    );

    Ok(())
}
