use breach_audit::utils::error::ErrorSeverity;
use breach_audit::utils::logger;
use breach_audit::{AuditEngine, BreachPipeline, CliArgs};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting breach-audit CLI");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // 解析並驗證配置
    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let monitor_enabled = args.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 建立管線（含一次性的 schema 編譯）
    let pipeline = match BreachPipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("❌ Failed to initialize the audit pipeline: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(3);
        }
    };

    let engine = AuditEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(report) if report.is_clean() => {
            // 全數通過：stdout 保持靜默
            tracing::info!("✅ Audit passed: all {} records conform", report.checked);
        }
        Ok(report) => {
            // 違規明細送 stderr，一行計數摘要送 stdout
            eprintln!("{}", report.render());
            println!("{}", report.summary());
            std::process::exit(1);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Audit failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
