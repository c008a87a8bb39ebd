use crate::{context::Context, error::Result, ui};

pub fn run(ctx: &Context) -> Result<()> {
    let connection = ctx.connect()?;
    let platform = connection.platform();
    let is_owner = platform.is_owner()?;

    ui::success(format!("Connected as {}", platform.account()));
    ui::field("account", platform.account());
    ui::field("chain", connection.session.chain_id());
    ui::field("contract", platform.address());
    ui::field("owner", if is_owner { "yes" } else { "no" });
    Ok(())
}
