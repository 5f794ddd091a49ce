//! Catalog stages and their argument templates.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::CatalogConfig;

/// One step of the translation catalog pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogStage {
    /// Scan sources for translatable strings into the template.
    Extract,
    /// Create the locale catalog from the template.
    Init,
    /// Compile the locale catalog, replacing any previous build.
    Compile,
    /// Merge template changes into the existing locale catalog.
    Update,
}

/// Stages run by `build`.
pub const BUILD_STAGES: [CatalogStage; 3] =
    [CatalogStage::Extract, CatalogStage::Init, CatalogStage::Compile];

/// Stages run by `update`.
pub const UPDATE_STAGES: [CatalogStage; 1] = [CatalogStage::Update];

impl CatalogStage {
    pub fn name(self) -> &'static str {
        match self {
            CatalogStage::Extract => "extract",
            CatalogStage::Init => "init",
            CatalogStage::Compile => "compile",
            CatalogStage::Update => "update",
        }
    }

    /// Concrete invocation of this stage for `config`.
    pub fn invocation(self, config: &CatalogConfig) -> StageInvocation {
        let path = |p: &PathBuf| p.to_string_lossy().into_owned();
        let locale_args = |args: &mut Vec<String>| {
            args.extend([
                "-l".to_string(),
                config.locale.clone(),
                "-D".to_string(),
                config.domain.clone(),
            ]);
        };

        let (input, output) = match self {
            CatalogStage::Extract => (config.source_dir.clone(), config.template.clone()),
            CatalogStage::Init | CatalogStage::Update => {
                (config.template.clone(), config.locale_catalog())
            }
            CatalogStage::Compile => (config.locale_catalog(), config.compiled_catalog()),
        };

        let mut args = vec![self.name().to_string()];
        match self {
            CatalogStage::Extract => {
                args.extend([
                    "-F".to_string(),
                    path(&config.mapping_file),
                    "-o".to_string(),
                    path(&output),
                    path(&input),
                ]);
            }
            CatalogStage::Init | CatalogStage::Update => {
                args.extend([
                    "-i".to_string(),
                    path(&input),
                    "-d".to_string(),
                    path(&config.catalog_dir),
                ]);
                locale_args(&mut args);
            }
            CatalogStage::Compile => {
                args.extend([
                    "-i".to_string(),
                    path(&input),
                    "-o".to_string(),
                    path(&output),
                ]);
                locale_args(&mut args);
            }
        }

        StageInvocation {
            stage: self,
            args,
            input,
            output,
        }
    }
}

impl fmt::Display for CatalogStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Arguments for one compiler call plus the files it reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageInvocation {
    pub stage: CatalogStage,
    pub args: Vec<String>,
    pub input: PathBuf,
    pub output: PathBuf,
}
