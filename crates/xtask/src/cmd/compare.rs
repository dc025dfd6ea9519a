//! Blueprint comparison: generated panel vs. a reference document.

use crate::XtaskError;
use crate::svgdom;
use airpanel::PanelOptions;
use std::fs;
use std::path::PathBuf;

struct DomArgs {
    mode: svgdom::DomMode,
    decimals: u32,
}

impl Default for DomArgs {
    fn default() -> Self {
        Self {
            mode: svgdom::DomMode::Parity,
            decimals: 3,
        }
    }
}

fn read(path: &PathBuf) -> Result<String, XtaskError> {
    fs::read_to_string(path).map_err(|source| XtaskError::ReadFile {
        path: path.display().to_string(),
        source,
    })
}

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

pub(crate) fn compare_blueprint(args: Vec<String>) -> Result<(), XtaskError> {
    let mut reference: Option<PathBuf> = None;
    let mut dom = DomArgs::default();
    let mut resources: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut out: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--dom-mode" => {
                i += 1;
                dom.mode = svgdom::DomMode::parse(args.get(i).ok_or(XtaskError::Usage)?.trim());
            }
            "--dom-decimals" => {
                i += 1;
                dom.decimals = args
                    .get(i)
                    .and_then(|s| s.trim().parse::<u32>().ok())
                    .ok_or(XtaskError::Usage)?;
            }
            "--resources" => {
                i += 1;
                resources = Some(PathBuf::from(args.get(i).ok_or(XtaskError::Usage)?));
            }
            "--seed" => {
                i += 1;
                seed = Some(
                    args.get(i)
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .ok_or(XtaskError::Usage)?,
                );
            }
            "--out" => {
                i += 1;
                out = Some(PathBuf::from(args.get(i).ok_or(XtaskError::Usage)?));
            }
            "--help" | "-h" => return Err(XtaskError::Usage),
            other if other.starts_with('-') => {
                return Err(XtaskError::UnknownCommand(format!(
                    "compare-blueprint: unknown arg `{other}`"
                )));
            }
            path => {
                if reference.is_some() {
                    return Err(XtaskError::Usage);
                }
                reference = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    let reference = reference.ok_or(XtaskError::Usage)?;
    let reference_svg = read(&reference)?;

    let mut opts = PanelOptions::from_resource_dir(
        resources.unwrap_or_else(|| workspace_root().join(airpanel::config::DEFAULT_RESOURCE_DIR)),
    );
    opts.seed = Some(seed.unwrap_or(1));
    let local_svg = airpanel::render_panel(&opts)?;

    let out = out.unwrap_or_else(|| {
        workspace_root()
            .join("target")
            .join("compare")
            .join("blueprint.svg")
    });
    if let Some(dir) = out.parent() {
        fs::create_dir_all(dir).map_err(|source| XtaskError::WriteFile {
            path: dir.display().to_string(),
            source,
        })?;
    }
    fs::write(&out, &local_svg).map_err(|source| XtaskError::WriteFile {
        path: out.display().to_string(),
        source,
    })?;

    let reference_sig = svgdom::dom_signature(&reference_svg, dom.mode, dom.decimals)
        .map_err(|e| XtaskError::BlueprintMismatch(format!("{}: {e}", reference.display())))?;
    let local_sig = svgdom::dom_signature(&local_svg, dom.mode, dom.decimals)
        .map_err(|e| XtaskError::BlueprintMismatch(format!("{}: {e}", out.display())))?;

    match svgdom::dom_diff(&reference_sig, &local_sig) {
        None => {
            println!(
                "blueprint matches ({:?}, {} decimals): {}",
                dom.mode,
                dom.decimals,
                reference.display()
            );
            Ok(())
        }
        Some(diff) => Err(XtaskError::BlueprintMismatch(format!(
            "{diff}\nlocal output: {}",
            out.display()
        ))),
    }
}

pub(crate) fn canon_svg(args: Vec<String>) -> Result<(), XtaskError> {
    let mut input: Option<PathBuf> = None;
    let mut dom = DomArgs {
        mode: svgdom::DomMode::Strict,
        ..Default::default()
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--dom-mode" => {
                i += 1;
                dom.mode = svgdom::DomMode::parse(args.get(i).ok_or(XtaskError::Usage)?.trim());
            }
            "--dom-decimals" => {
                i += 1;
                dom.decimals = args
                    .get(i)
                    .and_then(|s| s.trim().parse::<u32>().ok())
                    .ok_or(XtaskError::Usage)?;
            }
            "--help" | "-h" => return Err(XtaskError::Usage),
            other if other.starts_with('-') => {
                return Err(XtaskError::UnknownCommand(format!(
                    "canon-svg: unknown arg `{other}`"
                )));
            }
            path => input = Some(PathBuf::from(path)),
        }
        i += 1;
    }

    let input = input.ok_or(XtaskError::Usage)?;
    let svg = read(&input)?;
    let sig = svgdom::dom_signature(&svg, dom.mode, dom.decimals)
        .map_err(|e| XtaskError::BlueprintMismatch(format!("{}: {e}", input.display())))?;
    print!("{}", svgdom::render_signature(&sig));
    Ok(())
}
