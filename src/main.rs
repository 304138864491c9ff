use futures::future;
use moodboard::{
    AnalysisService, AppError, MoodAnalyzer, Settings, pipeline::AnalysisRequest,
};
use std::{path::PathBuf, sync::Arc};
use tower::{ServiceBuilder, ServiceExt};
use tracing::{Level, info};

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config_name =
        std::env::var("MOODBOARD_CONFIG").unwrap_or_else(|_| "moodboard".to_string());
    let settings = Settings::load(&config_name)?;
    init_logging(settings.tracing_level()?);

    let catalog = Arc::new(settings.load_catalog()?);
    info!("Loaded {} emotion palettes", catalog.len());

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        println!("{}", serde_json::to_string_pretty(&*catalog)?);
        return Ok(());
    }

    let analyzer = MoodAnalyzer::new(catalog, settings.extraction_config());
    let service = ServiceBuilder::new()
        .concurrency_limit(settings.max_concurrency)
        .service(AnalysisService::new(analyzer));

    let reports = future::join_all(
        paths
            .into_iter()
            .map(|path| service.clone().oneshot(AnalysisRequest::from_path(path))),
    )
    .await;

    for report in reports {
        println!("{}", serde_json::to_string(&report?)?);
    }
    Ok(())
}
