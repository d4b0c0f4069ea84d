//! colorwiz - color diagram elements by property value
//!
//! This is the main entry point for the colorwiz command line.

use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use colorwiz::input::{load_properties, load_scheme};
use colorwiz::report::ColorMapReport;
use colorwiz::{
    init_tracing, log_error, log_operation_end, log_operation_start, log_timed_operation,
    ColorModel, ColorwizError, Config, OutputFormat, Result,
};

fn main() -> Result<()> {
    // Load configuration
    let (config, input_path) = Config::load()?;

    // Validate configuration
    config.validate()?;

    init_tracing(&config.log_level);
    info!("Starting colorwiz v{}", env!("CARGO_PKG_VERSION"));

    run(&config, &input_path).map_err(|e| {
        log_error(&e, "colorwiz");
        e
    })
}

fn run(config: &Config, input_path: &Path) -> Result<()> {
    info!("Loading input document: {:?}", input_path);
    let collected = load_properties(input_path)?;

    let mut model = log_timed_operation("build_model", || ColorModel::new(collected))?;
    model.register_observer(|changed| {
        debug!(
            property = changed.name(),
            labels = ?changed.labels(),
            "Labels changed"
        );
    });

    if let Some(property) = &config.model.default_property {
        if !model.set_property(property) {
            return Err(ColorwizError::InvalidParameter {
                param: "property".to_string(),
                message: format!(
                    "Unknown property '{}'. Collected: {}",
                    property,
                    model.properties().join(", ")
                ),
            });
        }
    }
    info!("Coloring by property {}", model.property());

    let colormap = model.colormap_mut();
    if let Some(path) = &config.model.scheme_file {
        let start = Instant::now();
        log_operation_start("apply_scheme", path.to_str());
        let scheme = load_scheme(path)?;
        let applied = colormap.load_color_scheme(&scheme);
        log_operation_end("apply_scheme", start, applied.is_ok());
        applied?;
    }
    if let Some(kind) = config.model.scale {
        colormap.set_scale_kind(kind)?;
    }
    if let Some(reset_default) = config.model.reset_default {
        colormap.set_reset_default(reset_default);
    }

    let output = match config.output.format {
        OutputFormat::Table => ColorMapReport::from_colormap(colormap).render_table(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&ColorMapReport::from_colormap(colormap))?
        }
        OutputFormat::Scheme => colormap.color_scheme()?.to_json_pretty()?,
    };
    println!("{}", output.trim_end());

    Ok(())
}
