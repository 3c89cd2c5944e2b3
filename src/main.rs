use clap::Parser;
use pet_classifier_lib::commands::panel::{classify_image, select_image};
use pet_classifier_lib::services::render::render_text;
use pet_classifier_lib::{telemetry, AppError, ClassifierConfig, PanelHandle, PanelPhase, DEFAULT_ENDPOINT};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Classify a pet photo as cat or dog using the remote classification API.
#[derive(Parser, Debug)]
#[command(name = "pet-classifier", version, about)]
struct Args {
    /// Image file to classify
    image: PathBuf,

    /// Classification endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Print the panel view as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Keep the base64 preview in the JSON output
    #[arg(long, requires = "json")]
    include_preview: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    telemetry::init_tracing(args.verbose);

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "pet-classifier failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, AppError> {
    let config = ClassifierConfig::default().with_endpoint(args.endpoint);
    let handle = PanelHandle::from_config(&config)?;

    let mut view = select_image(&handle, &args.image).await?;
    if view.can_submit {
        view = classify_image(&handle).await?;
    }

    if args.json {
        if !args.include_preview {
            view.preview = None;
        }
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_text(&view));
    }

    Ok(if view.phase == PanelPhase::Failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
