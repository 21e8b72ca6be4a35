use pathsmith::Result;

use pathsmith::cli::{get_config, init_logging, run};

fn main() -> Result<()> {
    init_logging();
    run(get_config()?)?;

    Ok(())
}
