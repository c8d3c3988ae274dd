#![forbid(unsafe_code)]

use anyhow::Context;
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{generate_to, Shell};
use clap_mangen::Man;
use statpanel::cli::Args;
use std::fs;
use std::path::{Path, PathBuf};

const BIN_NAME: &str = "statpanel";

/// Generate packaging assets for statpanel.
///
/// Layout under the output directory:
///   completions/<shell>/<file>   one directory per shell
///   man/man1/statpanel.1         usable as a MANPATH entry
#[derive(Parser, Debug)]
#[command(name = "generate-assets")]
struct AssetArgs {
    /// Output directory.
    #[arg(short, long, default_value = "target/assets")]
    out_dir: PathBuf,

    /// Shells to generate completions for (repeatable or comma-separated).
    /// All supported shells when omitted.
    #[arg(short, long = "shell", value_enum, value_delimiter = ',')]
    shells: Vec<Shell>,

    /// Skip the man page.
    #[arg(long)]
    no_man: bool,
}

impl AssetArgs {
    fn shells(&self) -> Vec<Shell> {
        if self.shells.is_empty() {
            Shell::value_variants().to_vec()
        } else {
            let mut shells = self.shells.clone();
            shells.dedup();
            shells
        }
    }
}

fn write_completions(shell: Shell, out_dir: &Path) -> anyhow::Result<PathBuf> {
    let dir = out_dir.join("completions").join(shell.to_string());
    fs::create_dir_all(&dir).with_context(|| format!("{}: failed to create", dir.display()))?;
    let mut cmd = Args::command();
    let path = generate_to(shell, &mut cmd, BIN_NAME, &dir)
        .with_context(|| format!("failed to write {shell} completions"))?;
    Ok(path)
}

fn write_man_page(out_dir: &Path) -> anyhow::Result<PathBuf> {
    let dir = out_dir.join("man").join("man1");
    fs::create_dir_all(&dir).with_context(|| format!("{}: failed to create", dir.display()))?;
    let mut page = Vec::new();
    Man::new(Args::command()).render(&mut page)?;
    let path = dir.join(format!("{BIN_NAME}.1"));
    fs::write(&path, page).with_context(|| format!("{}: failed to write", path.display()))?;
    Ok(path)
}

fn generate(args: &AssetArgs) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for shell in args.shells() {
        written.push(write_completions(shell, &args.out_dir)?);
    }
    if !args.no_man {
        written.push(write_man_page(&args.out_dir)?);
    }
    Ok(written)
}

fn main() -> anyhow::Result<()> {
    let args = AssetArgs::parse();
    for path in generate(&args)? {
        println!("{}", path.display());
    }
    Ok(())
}
