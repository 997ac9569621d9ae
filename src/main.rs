use anyhow::{Context, Result};
use run_checks::cli::commands::{ListCommand, RunCommand, ValidateCommand};
use run_checks::cli::output::*;
use run_checks::cli::{Cli, Command};
use run_checks::command::SubprocessRunner;
use run_checks::core::config::PipelineConfig;
use run_checks::execution::{ExecutionEngine, ExecutionEvent};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Bare invocation runs the built-in check list
    let command = cli
        .command
        .clone()
        .unwrap_or_else(|| Command::Run(RunCommand::default()));

    match command {
        Command::Run(cmd) => run_pipeline(&cmd, &cli).await?,
        Command::Validate(cmd) => validate_pipeline(&cmd)?,
        Command::List(cmd) => list_steps(&cmd)?,
    }

    Ok(())
}

/// Load the configured pipeline, or the built-in check list when no file is given
fn load_config(cmd: &RunCommand) -> Result<PipelineConfig> {
    match &cmd.file {
        Some(path) => {
            PipelineConfig::from_file(path).with_context(|| format!("Failed to load {}", path))
        }
        None => Ok(PipelineConfig::builtin(cmd.coverage_policy.into())),
    }
}

async fn run_pipeline(cmd: &RunCommand, cli: &Cli) -> Result<()> {
    let config = load_config(cmd)?;
    let pipeline = config.to_pipeline();
    debug!("Loaded pipeline: {} ({} steps)", pipeline.name, pipeline.len());

    let engine = ExecutionEngine::new(SubprocessRunner::new());

    // Ctrl-C kills the running step and abandons the rest
    let cancel = engine.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let quiet = cli.quiet;
    engine.add_event_handler(move |event| match &event {
        // Tool output streams through unchanged
        ExecutionEvent::StepOutput { line, .. } => {
            if !quiet {
                println!("{}", line);
            }
        }
        ExecutionEvent::PipelineCompleted { .. } => {}
        _ => println!("{}", format_execution_event(&event)),
    });

    let result = engine.execute(&pipeline).await?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    // Silence implies pass; only a failed or cancelled run gets a summary line
    if !result.succeeded() {
        eprintln!("{}", format_run_summary(&result));
        std::process::exit(result.exit_code());
    }

    Ok(())
}

fn validate_pipeline(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating pipeline...", INFO);

    match PipelineConfig::from_file(&cmd.file) {
        Ok(config) => {
            println!("{} Pipeline configuration is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Steps: {}", style(config.steps.len()).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}

fn list_steps(cmd: &ListCommand) -> Result<()> {
    let config = match &cmd.file {
        Some(path) => {
            PipelineConfig::from_file(path).with_context(|| format!("Failed to load {}", path))?
        }
        None => PipelineConfig::builtin(Default::default()),
    };

    if cmd.json {
        let steps: Vec<_> = config
            .steps
            .iter()
            .map(|s| {
                serde_json::json!({
                    "name": s.name,
                    "command": s.command,
                    "continue_on_failure": s.continue_on_failure,
                })
            })
            .collect();
        let data = serde_json::json!({ "name": config.name, "steps": steps });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    let pipeline = config.to_pipeline();
    println!("{} {}", INFO, style(&pipeline.name).bold());
    for step in &pipeline.steps {
        println!(
            "  {} - {}",
            style(&step.name).cyan(),
            style(step.command.to_string()).dim()
        );
    }

    Ok(())
}
