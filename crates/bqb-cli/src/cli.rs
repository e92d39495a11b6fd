use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Render,
    Check,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help(HelpTopic),
    Render(RenderArgs),
    Check(CheckArgs),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderArgs {
    pub file: PathBuf,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckArgs {
    pub files: Vec<PathBuf>,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help(HelpTopic::Root)),
        "render" => parse_render(it.map(|s| s.as_str())),
        "check" => parse_check(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn parse_render<'a>(it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut file: Option<PathBuf> = None;
    let mut json = false;

    for token in it {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Render)),
            "--json" => json = true,
            other if other.starts_with('-') => anyhow::bail!("unknown argument: {other}"),
            other => {
                if file.is_some() {
                    anyhow::bail!("render takes a single definition file");
                }
                file = Some(PathBuf::from(other));
            }
        }
    }

    let Some(file) = file else {
        anyhow::bail!("missing definition file: expected `bqb render <FILE>`");
    };

    Ok(Command::Render(RenderArgs { file, json }))
}

fn parse_check<'a>(it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut files: Vec<PathBuf> = Vec::new();

    for token in it {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Check)),
            other if other.starts_with('-') => anyhow::bail!("unknown argument: {other}"),
            other => files.push(PathBuf::from(other)),
        }
    }

    if files.is_empty() {
        return Ok(Command::Help(HelpTopic::Check));
    }

    Ok(Command::Check(CheckArgs { files }))
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
bqb - render parameterized warehouse queries from TOML definitions

USAGE:
  bqb render <FILE> [--json]
  bqb check <FILE>...

COMMANDS:
  render   Render a definition and print the SQL and its parameters
  check    Validate definitions without printing SQL

Set RUST_LOG=bqb.sql=debug to log every built query to stderr."
            );
        }
        HelpTopic::Render => {
            println!(
                "\
USAGE:
  bqb render <FILE> [--json]

OPTIONS:
  --json   Print {{\"sql\": ..., \"params\": [...]}} instead of plain text"
            );
        }
        HelpTopic::Check => {
            println!(
                "\
USAGE:
  bqb check <FILE>...

Renders every file and checks its parameters. Exits non-zero on the first failure."
            );
        }
    }
}
