use kindred_core::TreeSnapshot;
use kindred_layout::{GenerationPolicy, LayoutOptions, RankDir, compute_layout_snapshot};
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Validate,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    options: LayoutOptions,
}

fn usage() -> &'static str {
    "kindred-cli\n\
\n\
USAGE:\n\
  kindred-cli [layout] [--pretty] [--policy first-wins|deepest] [--rankdir TB|BT|LR|RL] [--node-width <n>] [--node-height <n>] [<path>|-]\n\
  kindred-cli validate [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a tree snapshot: {\"members\": [...], \"relationships\": [...]}.\n\
  - layout prints the layout JSON (node centers, edge descriptors, bounds, diagnostics).\n\
  - validate reports relationships that point at unknown members; it fails only if the input does not parse.\n\
"
}

fn parse_size(raw: Option<&String>) -> Result<f64, CliError> {
    let Some(raw) = raw else {
        return Err(CliError::Usage(usage()));
    };
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !(v.is_finite() && v > 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "validate" => args.command = Command::Validate,
            "--pretty" => args.pretty = true,
            "--policy" => {
                let Some(policy) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.options.policy = policy
                    .parse::<GenerationPolicy>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--rankdir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.options.rank_dir = dir
                    .parse::<RankDir>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--node-width" => args.options.node_width = parse_size(it.next())?,
            "--node-height" => args.options.node_height = parse_size(it.next())?,
            "-" => args.input = Some("-".to_string()),
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            other => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(other.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let snapshot: TreeSnapshot = serde_json::from_str(&text)?;

    match args.command {
        Command::Layout => {
            let layout = compute_layout_snapshot(&snapshot, &args.options);
            write_json(&layout, args.pretty)
        }
        Command::Validate => {
            let dangling = snapshot.dangling_relationships();
            println!(
                "{} members, {} relationships",
                snapshot.members.len(),
                snapshot.relationships.len()
            );
            for id in &dangling {
                println!("dangling relationship: {id}");
            }
            if dangling.is_empty() {
                println!("ok");
            }
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("kindred-cli")
            .chain(args.iter().copied())
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn parse_args_reads_layout_options() {
        let args = parse_args(&argv(&[
            "layout",
            "--policy",
            "deepest",
            "--rankdir",
            "RL",
            "--node-width",
            "80",
            "tree.json",
        ]))
        .unwrap();
        assert!(matches!(args.command, Command::Layout));
        assert_eq!(args.options.policy, GenerationPolicy::Deepest);
        assert_eq!(args.options.rank_dir, RankDir::RL);
        assert_eq!(args.options.node_width, 80.0);
        assert_eq!(args.input.as_deref(), Some("tree.json"));
    }

    #[test]
    fn parse_args_rejects_bad_values() {
        for bad in [
            &["--policy", "random"][..],
            &["--rankdir"][..],
            &["--node-height", "-5"][..],
            &["--unknown"][..],
            &["a.json", "b.json"][..],
        ] {
            assert!(matches!(parse_args(&argv(bad)), Err(CliError::Usage(_))), "{bad:?}");
        }
    }
}
