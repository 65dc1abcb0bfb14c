use anyhow::Context;
use loghelper_app::{bootstrap, demo, FrontEnds};

fn main() -> anyhow::Result<()> {
    let settings = bootstrap()?;
    let front_ends = FrontEnds::from_settings(&settings)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    demo::run(&mut out, &front_ends.log_facade, &front_ends.tracing)
        .with_context(|| "failed to write greeting")?;

    Ok(())
}
