//! Translation catalog pipeline.
//!
//! `build` runs extract, init and compile; `update` runs update alone. Stages
//! depend on each other through the template file, so they run strictly in
//! order and the first failing stage stops the pipeline.

mod stage;

use crate::config::CatalogConfig;
use crate::error::Result;
use crate::process::ExternalCommand;

pub use stage::{BUILD_STAGES, CatalogStage, StageInvocation, UPDATE_STAGES};

/// Runs one catalog compiler invocation to completion.
pub trait CatalogCompiler {
    fn run_stage(&self, invocation: &StageInvocation) -> Result<()>;
}

/// The `pybabel` command line tool.
pub struct Pybabel {
    command: ExternalCommand,
}

impl Pybabel {
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(
            ExternalCommand::new(&config.program)
                .current_dir(&config.project_root)
                .timeout(config.timeout),
        )
    }
}

impl CatalogCompiler for Pybabel {
    fn run_stage(&self, invocation: &StageInvocation) -> Result<()> {
        self.command
            .clone()
            .args(invocation.args.iter().cloned())
            .run_checked(invocation.stage.name())?;
        Ok(())
    }
}

/// Fixed stage sequences over a catalog compiler.
pub struct CatalogPipeline {
    config: CatalogConfig,
    compiler: Box<dyn CatalogCompiler>,
}

impl CatalogPipeline {
    pub fn new(config: CatalogConfig, compiler: Box<dyn CatalogCompiler>) -> Self {
        Self { config, compiler }
    }

    /// Pipeline over `pybabel` as configured.
    pub fn from_config(config: CatalogConfig) -> Self {
        let compiler = Box::new(Pybabel::from_config(&config));
        Self::new(config, compiler)
    }

    /// Extract, init, compile. Returns the invocations that ran.
    pub fn build(&self) -> Result<Vec<StageInvocation>> {
        self.run(&BUILD_STAGES)
    }

    /// Refresh the existing locale catalog from the template.
    pub fn update(&self) -> Result<Vec<StageInvocation>> {
        self.run(&UPDATE_STAGES)
    }

    fn run(&self, stages: &[CatalogStage]) -> Result<Vec<StageInvocation>> {
        let mut done = Vec::with_capacity(stages.len());
        for stage in stages {
            let invocation = stage.invocation(&self.config);
            tracing::info!(stage = %stage, output = %invocation.output.display(), "running catalog stage");
            self.compiler.run_stage(&invocation)?;
            done.push(invocation);
        }
        Ok(done)
    }
}
