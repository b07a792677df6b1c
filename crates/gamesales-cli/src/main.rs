mod command;
mod config;
mod logging;
mod util;

fn main() -> anyhow::Result<()> {
    logging::init_tracing("info")?;
    command::run()
}
