mod cmd;
mod svgdom;

#[derive(Debug, thiserror::Error)]
enum XtaskError {
    #[error("usage: xtask <command> ...")]
    Usage,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write file {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("panel generation failed: {0}")]
    Panel(#[from] airpanel::Error),
    #[error("blueprint mismatch:\n{0}")]
    BlueprintMismatch(String),
}

fn print_help(topic: Option<&str>) {
    if let Some(topic) = topic.filter(|t| !t.trim().is_empty()) {
        println!("usage: xtask {topic} ...");
        println!();
        println!("Subcommands accept `--help`/`-h` and will show a usage error.");
        println!("See: `crates/xtask/src/main.rs` for the full argument grammar.");
        return;
    }

    println!("usage: xtask <command> ...");
    println!();
    println!("Commands:");
    println!("  compare-blueprint <reference.svg> [--dom-mode strict|structure|parity]");
    println!("                    [--dom-decimals <n>] [--resources <dir>] [--seed <n>] [--out <file>]");
    println!("  dump-blueprint <input.svg> [<output.rs>]");
    println!("  canon-svg <input.svg> [--dom-mode strict|structure|parity] [--dom-decimals <n>]");
    println!();
    println!("Tips:");
    println!("  - `cargo run -p xtask -- compare-blueprint res/reference.svg --dom-mode parity`");
    println!("  - strict mode only matches a reference generated with the same --seed");
    println!();
    println!("Topics:");
    println!("  xtask help <command>");
}

fn main() -> Result<(), XtaskError> {
    let mut args = std::env::args().skip(1);
    let Some(cmd_name) = args.next() else {
        return Err(XtaskError::Usage);
    };

    if matches!(cmd_name.as_str(), "--help" | "-h") {
        print_help(None);
        return Ok(());
    }
    if cmd_name == "help" {
        print_help(args.next().as_deref());
        return Ok(());
    }

    match cmd_name.as_str() {
        "compare-blueprint" => cmd::compare_blueprint(args.collect()),
        "dump-blueprint" => cmd::dump_blueprint(args.collect()),
        "canon-svg" => cmd::canon_svg(args.collect()),
        other => Err(XtaskError::UnknownCommand(other.to_string())),
    }
}
