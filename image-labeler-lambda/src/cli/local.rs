use anyhow::Context;
use aws_lambda_events::event::s3::S3Event;
use image_labeler_lambda::{store::MemoryStore, Handler, Settings};
use lambda_runtime::Error;
use std::path::PathBuf;

/// Handles one S3 notification read from a file, outside of Lambda.
#[derive(Debug, clap::Args)]
pub struct Cmd {
    /// S3 event notification JSON
    #[clap(long)]
    event: PathBuf,
    /// Write records to memory and print them instead of the table
    #[clap(long)]
    dry_run: bool,
}

impl Cmd {
    pub async fn run(&self, settings: &Settings) -> Result<(), Error> {
        let event = self.read_event()?;

        if self.dry_run {
            let handler = Handler::with_store(settings.clone(), MemoryStore::new()).await;
            handler.handle(&event).await?;

            let table = handler.settings().table()?;
            let records = handler.store().records(table);
            println!("{}", serde_json::to_string_pretty(&records)?);
        } else {
            let handler = Handler::from_settings(settings.clone()).await;
            handler.handle(&event).await?;
        }

        Ok(())
    }

    fn read_event(&self) -> anyhow::Result<S3Event> {
        let contents = std::fs::read_to_string(&self.event)
            .with_context(|| format!("reading {}", self.event.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing S3 event from {}", self.event.display()))
    }
}
