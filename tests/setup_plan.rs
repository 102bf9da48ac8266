// tests/setup_plan.rs

use std::error::Error;
use std::path::Path;

use speech_installer::config::Sources;
use speech_installer::provision::plan::archive_file_name;
use speech_installer::provision::{Layout, ProvisionOp, standard_plan};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn plan_has_the_seven_steps_in_order() -> TestResult {
    let layout = Layout::new("/data");
    let steps = standard_plan(&layout, &Sources::default())?;

    let names: Vec<_> = steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Updating repository...",
            "Setting up Python environment...",
            "Fetching pretrained models...",
            "Copying pretrained models...",
            "Downloading G2PW model...",
            "Fetching fine-tuned models...",
            "Copying fine-tuned models...",
        ]
    );

    assert!(matches!(
        &steps[0].op,
        ProvisionOp::SyncRepo { path, .. } if path == &layout.repo_dir()
    ));
    assert_eq!(steps[1].op, ProvisionOp::SetupEnvironment);
    Ok(())
}

#[test]
fn archive_step_targets_the_data_dir_and_model_dir() -> TestResult {
    let layout = Layout::new("/data");
    let steps = standard_plan(&layout, &Sources::default())?;

    let ProvisionOp::FetchArchive(fetch) = &steps[4].op else {
        return Err("step 5 is not an archive fetch".into());
    };
    assert_eq!(fetch.archive, Path::new("/data/G2PWModel_1.1.zip"));
    assert_eq!(fetch.extract_root, Path::new("/data"));
    assert_eq!(fetch.extracted_dir, Path::new("/data/G2PWModel_1.1"));
    assert_eq!(fetch.install_to.as_deref(), Some(layout.g2pw_dest().as_path()));
    Ok(())
}

#[test]
fn finetuned_copy_covers_both_weight_sets() -> TestResult {
    let layout = Layout::new("/data");
    let steps = standard_plan(&layout, &Sources::default())?;

    let ProvisionOp::Mirror(pairs) = &steps[6].op else {
        return Err("last step is not a copy".into());
    };
    let targets: Vec<_> = pairs
        .iter()
        .map(|p| p.to.file_name().unwrap_or_default().to_string_lossy().into_owned())
        .collect();
    assert_eq!(targets, vec!["GPT_weights_v2", "SoVITS_weights_v2"]);
    assert!(pairs.iter().all(|p| p.from.starts_with(layout.finetuned_repo_dir())));
    Ok(())
}

#[test]
fn archive_names_come_from_the_url_path() {
    assert_eq!(
        archive_file_name("https://host/a/b/Model_1.1.zip?sig=abc#frag").unwrap(),
        "Model_1.1.zip"
    );
    assert!(archive_file_name("https://host/a/b/").is_err());
    assert!(archive_file_name("https://host/a/.zip").is_err());
}

#[test]
fn launch_runs_streamlit_from_the_app_dir() {
    let layout = Layout::new("/data");
    let spec = layout.launch_spec();

    assert_eq!(spec.program, layout.venv_launcher());
    assert_eq!(spec.args, vec!["run", "zundamon_webui.py"]);
    assert_eq!(spec.cwd, layout.app_dir());
    assert_eq!(spec.timeout, None);
}
