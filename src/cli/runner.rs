//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, SourceArgs};
use crate::decode::{decoder_for, DecoderFormat};
use crate::error::{Error, Result};
use crate::pagination::{strategies, PagedIterator, RunContext, StopResult};
use crate::settings::IteratorSettings;
use serde_json::{json, Value};
use std::fs;
use std::io::Write;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Iterator over decoded records with an offset cursor
pub type RecordIterator = PagedIterator<u64, Value, Error>;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing to stdout; Ctrl-C stops at the next page
    pub async fn run(&self) -> Result<()> {
        let token = CancellationToken::new();
        let on_interrupt = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, stopping at the next page boundary");
                on_interrupt.cancel();
            }
        });

        let ctx = RunContext::new().with_cancellation(token);
        let mut stdout = std::io::stdout();
        self.run_with(&ctx, &mut stdout).await
    }

    /// Run the CLI command with an explicit context and output
    pub async fn run_with<W: Write + Send>(&self, ctx: &RunContext, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::Walk { source, batch } => self.walk(ctx, source, *batch, out).await,
            Commands::Count { source } => self.count(ctx, source, out).await,
        }
    }

    async fn walk<W: Write + Send>(
        &self,
        ctx: &RunContext,
        source: &SourceArgs,
        batch: bool,
        out: &mut W,
    ) -> Result<()> {
        let iterator = self.iterator(source)?;

        let stats = if batch {
            iterator
                .for_each_page(ctx, |page: &[Value]| {
                    serde_json::to_writer(&mut *out, page)?;
                    out.write_all(b"\n")?;
                    Ok(StopResult::Continue)
                })
                .await?
        } else {
            iterator
                .for_each(ctx, |item: &Value| {
                    serde_json::to_writer(&mut *out, item)?;
                    out.write_all(b"\n")?;
                    Ok(StopResult::Continue)
                })
                .await?
        };
        out.flush()?;

        info!(
            "Walked {} items in {} pages ({})",
            stats.items_dispatched, stats.pages_fetched, stats.stop_reason
        );
        Ok(())
    }

    async fn count<W: Write + Send>(
        &self,
        ctx: &RunContext,
        source: &SourceArgs,
        out: &mut W,
    ) -> Result<()> {
        let iterator = self.iterator(source)?;
        let stats = iterator
            .for_each_page(ctx, |_page: &[Value]| Ok(StopResult::Continue))
            .await?;

        let summary = json!({
            "pages": stats.pages_fetched,
            "items": stats.items_dispatched,
            "stop_reason": stats.stop_reason.as_str(),
        });
        writeln!(out, "{summary}")?;
        Ok(())
    }

    /// Load settings, records and build the iterator for a source
    fn iterator(&self, source: &SourceArgs) -> Result<RecordIterator> {
        if source.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than zero"));
        }
        let settings = self.settings(source)?;
        let records = load_records(source)?;
        debug!(
            "Loaded {} records from {}",
            records.len(),
            source.input.display()
        );
        Ok(build_iterator(Arc::new(records), source.page_size, &settings))
    }

    fn settings(&self, source: &SourceArgs) -> Result<IteratorSettings> {
        let base = match &self.cli.settings {
            Some(path) => IteratorSettings::from_file(path)?,
            None => IteratorSettings::default(),
        };
        let overrides = IteratorSettings {
            max_pages: source.max_pages,
            timeout_ms: source.timeout_ms,
        };
        let settings = base.merge(&overrides);
        settings.validate()?;
        Ok(settings)
    }
}

/// Read and decode the input file
fn load_records(source: &SourceArgs) -> Result<Vec<Value>> {
    let path = &source.input;
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    let format = source
        .format
        .unwrap_or_else(|| DecoderFormat::from_path(path));
    decoder_for(format, source.record_path.as_deref()).decode(&content)
}

/// Page over in-memory records, `page_size` at a time
pub fn build_iterator(
    records: Arc<Vec<Value>>,
    page_size: u64,
    settings: &IteratorSettings,
) -> RecordIterator {
    PagedIterator::builder()
        .fetch_page(move |offset: u64| {
            let records = Arc::clone(&records);
            async move {
                let start = (offset as usize).min(records.len());
                let end = start.saturating_add(page_size as usize).min(records.len());
                Ok(records[start..end].to_vec())
            }
        })
        .advance(strategies::offset(page_size))
        .with_settings(settings)
        .build()
}
