//! Babel commands - build or refresh the translation catalog.

use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use lamia_tools::{CatalogConfig, CatalogPipeline, StageInvocation};

pub fn build(
    project_root: PathBuf,
    timeout: Duration,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = pipeline(project_root, timeout);
    println!("{} translation catalog", "Building".cyan().bold());
    let done = pipeline.build()?;
    report(&done, verbose);
    Ok(())
}

pub fn update(
    project_root: PathBuf,
    timeout: Duration,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = pipeline(project_root, timeout);
    println!("{} translation catalog", "Updating".cyan().bold());
    let done = pipeline.update()?;
    report(&done, verbose);
    Ok(())
}

fn pipeline(project_root: PathBuf, timeout: Duration) -> CatalogPipeline {
    CatalogPipeline::from_config(
        CatalogConfig::default()
            .with_project_root(project_root)
            .with_timeout(timeout),
    )
}

fn report(done: &[StageInvocation], verbose: bool) {
    for invocation in done {
        println!(
            "  {} {:8} {}",
            "ok".green(),
            invocation.stage.to_string(),
            invocation.output.display().to_string().white()
        );
        if verbose {
            println!("     {}", invocation.args.join(" ").dimmed());
        }
    }
}
