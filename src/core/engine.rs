use crate::core::Pipeline;
use crate::domain::model::ValidationReport;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct AuditEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AuditEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<ValidationReport> {
        tracing::info!("Starting breach audit...");

        // Fetch
        let raw = self.pipeline.fetch().await?;
        tracing::info!("Fetched {} records", raw.len());
        self.monitor.log_stats("fetch");

        // Normalize
        let normalized = self.pipeline.normalize(raw).await?;
        tracing::info!("Kept {} records after normalization", normalized.len());
        self.monitor.log_stats("normalize");

        // Validate
        let report = self.pipeline.validate(normalized).await?;
        tracing::info!(
            "Audit complete: {} violations across {} records",
            report.error_count(),
            report.checked
        );
        self.monitor.log_final_stats();

        Ok(report)
    }
}
