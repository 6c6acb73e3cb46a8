use anyhow::{Context, Result};
use housing_gbm::{confirm, Config, HousingError, Pipeline, CONFIG_FILE, SAVE_PROMPT};
use std::io;
use std::path::Path;

fn banner() {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                                                               ║");
    println!("║ Housing Price Predictor using a Gradient Boosted Machine      ║");
    println!("║                                                               ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
}

fn load_config() -> Result<Config> {
    let path = Path::new(CONFIG_FILE);
    if path.is_file() {
        log::info!("Using configuration from {}", path.display());
        Config::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    } else {
        Ok(Config::default())
    }
}

fn main() -> Result<()> {
    housing_gbm::init();

    run().map_err(|err| {
        if let Some(cause) = err.downcast_ref::<HousingError>() {
            log::error!("Run aborted by a {} error", cause.category());
        }
        err
    })
}

fn run() -> Result<()> {
    banner();

    let config = load_config()?;
    let mut pipeline = Pipeline::new(config)?;

    println!("Loading data into memory ...");
    pipeline.load().context("Failed to load the dataset")?;
    pipeline.transform()?;
    pipeline.split()?;

    pipeline.train().context("Training failed")?;
    pipeline.evaluate()?;
    pipeline.report()?;

    let config = pipeline.config();
    println!("Progress saved to {}", config.progress_path.display());
    println!("Report saved to {}", config.report_path.display());

    let save = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        confirm(&mut stdin.lock(), &mut stdout.lock(), SAVE_PROMPT)?
    };

    if save {
        pipeline.persist()?;
        println!("Model saved to {}", pipeline.config().model_path.display());
    }

    Ok(())
}
