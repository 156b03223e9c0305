//! Check command implementation

use crate::artifacts::{ArtifactBundle, ArtifactPaths};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{resolve_check_config, CheckArgs};
use crate::features::FeatureSchema;
use crate::model::{DenseNetwork, Regressor};

/// Format model information as a string
pub fn format_model_info(model: &DenseNetwork) -> String {
    let mut lines = vec![
        format!("  Model: {}", model.name()),
        format!("  Inputs: {}", model.input_dim()),
        format!("  Parameters: {}", model.param_count()),
    ];
    for (i, layer) in model.layers().iter().enumerate() {
        lines.push(format!(
            "    dense_{i}: {} -> {} ({})",
            layer.input_dim(),
            layer.output_dim(),
            layer.activation()
        ));
    }
    lines.join("\n")
}

/// Format feature schema information as a string
pub fn format_schema_info(schema: &FeatureSchema) -> String {
    let mut lines = vec![format!("  Trained columns: {}", schema.len())];
    if !schema.has_weight() {
        lines.push("  Warning: no weight column".to_string());
    }
    if !schema.missing_origin().is_empty() {
        lines.push(format!(
            "  Warning: origin cities without a column: {}",
            schema.missing_origin().join(", ")
        ));
    }
    if !schema.missing_destination().is_empty() {
        lines.push(format!(
            "  Warning: destination cities without a column: {}",
            schema.missing_destination().join(", ")
        ));
    }
    lines.join("\n")
}

/// Load the artifacts and report their contents.
pub fn run_check(args: CheckArgs, level: LogLevel) -> Result<(), String> {
    let config = resolve_check_config(&args).map_err(|e| e.to_string())?;
    let paths = ArtifactPaths::in_dir(&config.artifacts_dir);

    let dir = config.artifacts_dir.display();
    log(level, LogLevel::Normal, &format!("Checking artifacts in {dir}"));
    let bundle = ArtifactBundle::load(&paths).map_err(|e| e.to_string())?;

    log(level, LogLevel::Normal, &format_model_info(&bundle.model));
    log(level, LogLevel::Normal, &format_schema_info(&bundle.schema));
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Origin classes: {}\n  Destination classes: {}",
            bundle.origin_encoder.classes().join(", "),
            bundle.destination_encoder.classes().join(", ")
        ),
    );
    log(level, LogLevel::Normal, "✓ Artifacts OK");

    Ok(())
}
