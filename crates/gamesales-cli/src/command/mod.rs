use clap::{Parser, Subcommand};

use self::{analyze::AnalyzeArg, preprocess::PreprocessArg};

mod analyze;
mod preprocess;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Clean and impute the raw dataset, then save it as CSV
    Preprocess(#[clap(flatten)] PreprocessArg),
    /// Analyze the processed dataset
    Analyze(#[clap(flatten)] AnalyzeArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Preprocess(arg) => preprocess::run(&arg)?,
        Mode::Analyze(arg) => analyze::run(&arg)?,
    }
    Ok(())
}
