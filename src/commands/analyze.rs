use crate::cli::{Cli, Commands};
use crate::domain::models::{AnalysisState, RiskAssessment};
use crate::services::controller::AnalysisController;
use crate::services::output::print_one;
use std::path::Path;

pub fn handle_analyze_commands(
    cli: &Cli,
    controller: &mut AnalysisController,
) -> anyhow::Result<()> {
    let outcome = match &cli.command {
        Commands::Coordinates {
            latitude,
            longitude,
        } => controller.submit_coordinates(latitude, longitude),
        Commands::Image { path } => match controller.select_image(path) {
            Ok(()) => {
                let outcome = controller.submit_image();
                if outcome.is_ok() {
                    // The single-shot flow releases the selection once its
                    // analysis has resolved.
                    controller.clear_image();
                }
                outcome
            }
            Err(err) => Err(err),
        },
        Commands::Preview { path } => return handle_preview(cli, controller, path),
    };

    // The alert channel is drained once per command, before the outcome is
    // reported.
    if let Some(alert) = controller.take_alert() {
        eprintln!("{alert}");
    }
    outcome?;

    let AnalysisState::Success(assessment) = controller.state() else {
        anyhow::bail!("analysis finished without a result");
    };
    print_one(cli.json, assessment, |a| render_assessment(a))
}

fn handle_preview(
    cli: &Cli,
    controller: &mut AnalysisController,
    path: &Path,
) -> anyhow::Result<()> {
    let outcome = controller.select_image(path);
    if let Some(alert) = controller.take_alert() {
        eprintln!("{alert}");
    }
    outcome?;

    let Some(image) = controller.selected_image() else {
        anyhow::bail!("no image selected");
    };
    let text = format!(
        "file: {}\nmime type: {}\nsize: {} bytes\npreview: {}",
        image.file_name, image.mime_type, image.size_bytes, image.preview
    );
    let summary = serde_json::json!({
        "file_name": image.file_name,
        "mime_type": image.mime_type,
        "size_bytes": image.size_bytes,
        "preview": image.preview
    });
    print_one(cli.json, summary, |_| text.clone())
}

fn render_assessment(a: &RiskAssessment) -> String {
    let mut lines = Vec::new();
    if let Some(location) = &a.location_name {
        lines.push(format!("location: {}", location));
    }
    lines.push(format!("risk level: {}", a.risk_level));
    lines.push(format!("description: {}", a.description));
    lines.push(format!("elevation: {} m", a.elevation_m));
    lines.push(format!("distance from water: {} m", a.distance_from_water_m));
    if let Some(features) = &a.geographic_features {
        lines.push(format!("geographic features: {}", features));
    }
    if !a.ai_narrative.is_empty() {
        lines.push(format!("ai analysis: {}", a.ai_narrative));
    }
    if !a.recommendations.is_empty() {
        lines.push("recommendations:".to_string());
        for rec in &a.recommendations {
            lines.push(format!("  - {}", rec));
        }
    }
    lines.join("\n")
}
