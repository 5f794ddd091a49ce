//! Integration tests for the catalog pipeline.

use std::cell::RefCell;
use std::rc::Rc;

use lamia_tools::catalog::{CatalogCompiler, CatalogPipeline, CatalogStage, StageInvocation};
use lamia_tools::{CatalogConfig, Result, ToolError};

/// Compiler that records invocations and can fail on one stage.
struct RecordingCompiler {
    calls: Rc<RefCell<Vec<StageInvocation>>>,
    fail_on: Option<CatalogStage>,
}

impl CatalogCompiler for RecordingCompiler {
    fn run_stage(&self, invocation: &StageInvocation) -> Result<()> {
        self.calls.borrow_mut().push(invocation.clone());
        if self.fail_on == Some(invocation.stage) {
            return Err(ToolError::ProcessFailed {
                program: "pybabel".to_string(),
                stage: invocation.stage.name().to_string(),
                code: Some(1),
                stderr: String::new(),
            });
        }
        Ok(())
    }
}

fn pipeline(fail_on: Option<CatalogStage>) -> (CatalogPipeline, Rc<RefCell<Vec<StageInvocation>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let compiler = RecordingCompiler {
        calls: calls.clone(),
        fail_on,
    };
    (
        CatalogPipeline::new(CatalogConfig::default(), Box::new(compiler)),
        calls,
    )
}

fn stages(calls: &[StageInvocation]) -> Vec<CatalogStage> {
    calls.iter().map(|c| c.stage).collect()
}

#[test]
fn test_build_runs_extract_init_compile_in_order() {
    let (pipeline, calls) = pipeline(None);

    let done = pipeline.build().unwrap();

    let calls = calls.borrow();
    assert_eq!(
        stages(&calls),
        vec![CatalogStage::Extract, CatalogStage::Init, CatalogStage::Compile]
    );
    assert_eq!(done, *calls);
}

#[test]
fn test_build_stages_consume_previous_output() {
    let (pipeline, _) = pipeline(None);

    let done = pipeline.build().unwrap();
    let (extract, init, compile) = (&done[0], &done[1], &done[2]);

    assert_eq!(init.input, extract.output);
    assert_eq!(compile.input, init.output);
    let template = extract.output.to_string_lossy().into_owned();
    assert!(init.args.contains(&template));
}

#[test]
fn test_update_runs_only_update_from_template() {
    let (pipeline, calls) = pipeline(None);

    pipeline.update().unwrap();

    let calls = calls.borrow();
    assert_eq!(stages(&calls), vec![CatalogStage::Update]);
    assert_eq!(calls[0].input, CatalogConfig::default().template);
}

#[test]
fn test_failing_stage_stops_pipeline() {
    let (pipeline, calls) = pipeline(Some(CatalogStage::Init));

    let err = pipeline.build().unwrap_err();

    assert!(err.to_string().starts_with("init failed"));
    assert_eq!(
        stages(&calls.borrow()),
        vec![CatalogStage::Extract, CatalogStage::Init],
        "compile must not run after init failed"
    );
}

#[cfg(unix)]
#[test]
fn test_real_process_exit_code_surfaces() {
    // `false` ignores its arguments and exits 1.
    let pipeline = CatalogPipeline::from_config(CatalogConfig::default().with_program("false"));

    let err = pipeline.update().unwrap_err();

    match err {
        ToolError::ProcessFailed { stage, code, .. } => {
            assert_eq!(stage, "update");
            assert_eq!(code, Some(1));
        }
        other => panic!("unexpected error: {other}"),
    }
}
