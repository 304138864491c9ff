use crate::{
    error::AppError,
    pipeline::analyzer::{Analysis, ImageSource, MoodAnalyzer},
};
use serde::Serialize;
use std::{
    future::Future,
    path::PathBuf,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tower::Service;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    id: Uuid,
    source: ImageSource,
}

impl AnalysisRequest {
    pub fn new(source: ImageSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::new(ImageSource::Bytes(bytes))
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(ImageSource::Path(path.into()))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub source: String,
    #[serde(flatten)]
    pub analysis: Analysis,
}

/// Runs each analysis on the blocking pool so independent requests proceed in parallel.
#[derive(Debug, Clone)]
pub struct AnalysisService {
    analyzer: Arc<MoodAnalyzer>,
}

impl AnalysisService {
    pub fn new(analyzer: MoodAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

impl Service<AnalysisRequest> for AnalysisService {
    type Response = AnalysisReport;
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), AppError>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: AnalysisRequest) -> Self::Future {
        let analyzer = self.analyzer.clone();
        let span = tracing::info_span!("analysis", id = %request.id);

        Box::pin(async move {
            let AnalysisRequest { id, source } = request;
            let description = source.to_string();
            let analysis = tokio::task::spawn_blocking(move || {
                let _entered = span.enter();
                tracing::debug!("Analyzing {}", source);
                analyzer.analyze(&source)
            })
            .await?;

            Ok(AnalysisReport {
                id,
                source: description,
                analysis,
            })
        })
    }
}
