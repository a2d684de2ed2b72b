use aws_lambda_events::event::s3::S3Event;
use image_labeler_lambda::{recognition::Rekognition, store::DynamoStore, Handler, Settings};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;

/// Runs the Lambda runtime loop with one handler shared by every invocation.
#[derive(Debug, Default, clap::Args)]
pub struct Cmd {}

impl Cmd {
    pub async fn run(&self, settings: &Settings) -> Result<(), Error> {
        let handler = Arc::new(Handler::from_settings(settings.clone()).await);

        let service_fn = service_fn(move |event| {
            let handler = Arc::clone(&handler);
            async move { handler_fn(event, handler).await }
        });
        run(service_fn).await?;

        Ok(())
    }
}

async fn handler_fn(
    event: LambdaEvent<S3Event>,
    handler: Arc<Handler<Rekognition, DynamoStore>>,
) -> Result<(), Error> {
    tracing::debug!(request_id = %event.context.request_id, "invocation");
    handler.as_ref().handle(&event.payload).await?;
    Ok(())
}
