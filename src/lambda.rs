use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use maritime_ops::config::lambda::{LambdaConfig, S3PortTable};
use maritime_ops::utils::{logger, validation::Validate};
use maritime_ops::{PortRegistry, RouteRequest, RouteResponse, RouteService};
use std::sync::Arc;

async fn load_registry(config: &LambdaConfig) -> Result<PortRegistry, Error> {
    let Some(bucket) = &config.port_table_bucket else {
        tracing::info!("PORT_TABLE_BUCKET not set, using built-in ports");
        return Ok(PortRegistry::builtin());
    };

    let aws = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let s3_config = aws_sdk_s3::config::Builder::from(&aws)
        .region(Region::new(config.s3_region.clone()))
        .force_path_style(true)
        .build();
    let source = S3PortTable::new(
        S3Client::from_conf(s3_config),
        bucket.clone(),
        config.port_table_key.clone(),
    );

    Ok(PortRegistry::load(&source).await?)
}

async fn function_handler(
    service: &RouteService,
    event: LambdaEvent<RouteRequest>,
) -> Result<RouteResponse, Error> {
    tracing::info!(
        request_id = %event.context.request_id,
        origin = %event.payload.origin_port_code,
        destination = %event.payload.destination_port_code,
        "Route request"
    );
    Ok(service.handle(&event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // cold start: the table is loaded once and shared by every invocation
    let config = LambdaConfig::from_env()?;
    config.validate()?;
    let registry = Arc::new(load_registry(&config).await?);
    let service = RouteService::new(registry, config.estimator_config())?;
    let service = &service;

    run(service_fn(move |event: LambdaEvent<RouteRequest>| async move {
        function_handler(service, event).await
    }))
    .await
}
