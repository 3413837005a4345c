use crate::analyzer::{ensure_image_exists, request_analysis};
use crate::cli::args::Cli;
use crate::config::{self, ConfigError};
use crate::error::AnalyzeError;
use crate::types::{AnalysisRequest, ClientConfig};
use std::process::ExitCode;
use std::time::Duration;

/// Run one analysis from parsed arguments.
///
/// A missing image is reported and yields a failure exit code. Errors while
/// talking to Ollama or saving the record are printed together with a hint
/// and still exit successfully. Only a broken config file is returned as an
/// error.
pub async fn run(cli: Cli) -> Result<ExitCode, ConfigError> {
    let app_config = config::load_config(&cli.config)?;

    let model = config::resolve_model(cli.model.as_deref(), &app_config);
    let prompt = config::resolve_prompt(cli.prompt.as_deref());
    let endpoint = config::resolve_endpoint(cli.host.as_deref(), &app_config);
    let mut client_config = ClientConfig::with_endpoint(endpoint);
    if let Some(secs) = cli.timeout {
        client_config = client_config.timeout(Duration::from_secs(secs));
    }

    let request = AnalysisRequest::new(cli.image_path, model, prompt);

    if let Err(e) = ensure_image_exists(&request.image_path) {
        eprintln!("Error: {}", e);
        return Ok(ExitCode::FAILURE);
    }

    println!(
        "Analyzing '{}' with model '{}'...",
        request.image_path.display(),
        request.model
    );
    println!("Prompt: {}\n", request.prompt);

    let client = reqwest::Client::new();
    let analysis = match request_analysis(&client, &client_config, &request).await {
        Ok(analysis) => analysis,
        Err(e) => {
            report_failure(&e, &request.model);
            return Ok(ExitCode::SUCCESS);
        }
    };

    println!("Model response:");
    println!("{}", analysis.record.description);

    match analysis.save(&cli.output_dir) {
        Ok(output_path) => {
            println!(
                "\nAnalysis complete, result saved to: {}",
                output_path.display()
            );
        }
        Err(e) => report_failure(&e, &request.model),
    }

    Ok(ExitCode::SUCCESS)
}

fn report_failure(err: &AnalyzeError, model: &str) {
    println!("\nAn error occurred while communicating with Ollama: {}", err);
    println!("{}", remediation_hint(model));
}

fn remediation_hint(model: &str) -> String {
    format!(
        "Check that Ollama is running and the model has been pulled (e.g. 'ollama pull {}').",
        model
    )
}
