use anyhow::Context;
use clap::Parser;
use py2cpp::cli::{init_logging, Cli};
use py2cpp::config::Settings;
use py2cpp::input::list_programs;
use py2cpp::runner::translate;

fn main() -> anyhow::Result<()> {
    // A missing .env is fine; keys may come from the real environment.
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    init_logging(&cli);

    if cli.list_programs {
        let programs = list_programs(&cli.programs_dir)
            .with_context(|| format!("listing {}", cli.programs_dir.display()))?;
        let width = programs.iter().map(|p| p.name.len()).max().unwrap_or(0);
        for program in programs {
            println!("{:<width$}  {}", program.name, program.description);
        }
        return Ok(());
    }

    let request = cli.request()?;
    let settings = Settings::from_env()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let artifacts = runtime.block_on(translate(&settings, cli.writer(), &request))?;

    for artifact in artifacts {
        println!("{}", artifact.path.display());
    }
    Ok(())
}
