use anyhow::Context;
use helm_launcher::utils::{logger, validation::Validate};
use helm_launcher::{
    parse_lenient, resolve, Launcher, LauncherError, OutputFormat, StepCommand, TokioProcessRunner,
    TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (args, ignored) = parse_lenient(std::env::args_os());

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    for arg in &ignored {
        tracing::warn!("⚠️  Ignoring unrecognized argument: {}", arg);
    }
    tracing::debug!("CLI args: {:?}", args);

    let file_config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            match TomlConfig::from_file(path) {
                Ok(config) => Some(config),
                Err(e) => exit_with(&e),
            }
        }
        None => None,
    };

    let base_dir = std::env::current_dir().context("cannot determine current directory")?;
    let config = resolve(&args.overrides(), file_config.as_ref(), &base_dir);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    tracing::info!(
        "🔧 suite={} port={} framework={}",
        config.suite_name,
        config.port,
        config.framework_root.display()
    );

    let launcher = Launcher::new(config, TokioProcessRunner::new());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be executed");
        let plan = match launcher.plan() {
            Ok(plan) => plan,
            Err(e) => exit_with(&e),
        };
        print_plan(&plan, args.format)?;
        return Ok(());
    }

    match launcher.run().await {
        Ok(report) => {
            tracing::info!("✅ All steps finished");
            tracing::debug!("Launch report: {:?}", report);
            Ok(())
        }
        Err(e) => exit_with(&e),
    }
}

fn print_plan(plan: &[StepCommand], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(plan)?);
        }
        OutputFormat::Text => {
            for step in plan {
                println!("# {} (cwd: {})", step.name, step.current_dir.display());
                for (key, value) in &step.env {
                    println!("{}={} \\", key, value.to_string_lossy());
                }
                println!("  {}", step.display_line());
            }
        }
    }
    Ok(())
}

/// 以錯誤對應的退出碼結束程序
fn exit_with(e: &LauncherError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}
