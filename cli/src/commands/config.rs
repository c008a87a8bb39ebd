use crate::{context::Context, error::Result};

pub fn run(ctx: &Context) -> Result<()> {
    print!("{}", ctx.config.to_toml()?);
    Ok(())
}
