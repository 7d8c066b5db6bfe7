use clap::Parser;
use std::io::Read;
use tabaudit::domain::ports::{ConfigProvider, Storage};
use tabaudit::utils::{logger, validation::Validate};
use tabaudit::{
    AuditError, AuditOutcome, AuditSession, CliConfig, ImageUpload, LocalStorage, MediaType,
    OpenAiVisionClient, TableMode, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();
    config.resolve_api_key();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting tabaudit");
    if config.verbose {
        tracing::debug!(
            "Endpoint: {}, model: {}, image: {}",
            config.api_endpoint,
            config.model,
            config.image
        );
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    // The TOML config, when given, decides the client-facing settings; CLI
    // flags keep deciding the inputs.
    let (client, model_id) = match build_client(&config) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("❌ Could not set up the model client: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let storage = LocalStorage::new();

    let pasted_text = match &config.table_file {
        Some(path) => {
            tracing::debug!("Reading table text from {}", path);
            String::from_utf8_lossy(&storage.read_file(path).await?).into_owned()
        }
        None => {
            tracing::info!("Paste the table text, then close stdin (Ctrl+D):");
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let media_type = media_type_for(&config.image)?;
    let image_bytes = storage.read_file(&config.image).await?;
    tracing::debug!("Loaded image ({} bytes, {})", image_bytes.len(), media_type.mime());

    let mut session = AuditSession::new(client, model_id);

    match session.set_table_text(&pasted_text) {
        TableMode::Structured => {
            tracing::info!("✅ Table identified and parsed");
            if config.verbose {
                if let Some(rendered) = session.rendered_table() {
                    tracing::debug!("Table as sent:\n{}", rendered);
                }
            }
        }
        // The degraded-mode advisory is logged by the session itself.
        TableMode::Degraded | TableMode::Empty => {}
    }
    session.set_image(ImageUpload::new(image_bytes, media_type));

    match session.run_audit().await {
        Ok(AuditOutcome::Report(report)) => {
            println!(
                "📋 Audit report ({})",
                chrono::Local::now().format("%Y-%m-%d %H:%M")
            );
            println!("{}", report);
        }
        Ok(AuditOutcome::Failed(message)) => {
            eprintln!("❌ {}", message);
            eprintln!("💡 Nothing was retried; run the audit again to retry");
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}

fn build_client(config: &CliConfig) -> tabaudit::Result<(OpenAiVisionClient, String)> {
    match &config.config {
        Some(path) => {
            let toml_config = TomlConfig::from_file(path)?;
            toml_config.validate()?;
            let model = toml_config.model().to_string();
            Ok((OpenAiVisionClient::new(&toml_config)?, model))
        }
        None => Ok((OpenAiVisionClient::new(config)?, config.model.clone())),
    }
}

fn media_type_for(path: &str) -> tabaudit::Result<MediaType> {
    std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(MediaType::from_extension)
        .ok_or_else(|| AuditError::UnsupportedImageFormatError {
            path: path.to_string(),
        })
}
