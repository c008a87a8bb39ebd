use thoughtverse::views::{content::validate_tip, content::TIP_SENT, ContentView};

use crate::{cli::TipArgs, context::Context, error::Result, ui};

pub fn run(ctx: &Context, args: TipArgs) -> Result<()> {
    let amount = validate_tip(&args.amount)?;

    let connection = ctx.connect()?;
    let platform = connection.platform();
    let mut view = ContentView::new(platform.content(args.id)?);
    view.tip_amount = args.amount;

    ui::status(format!(
        "Tipping {} to {}",
        ui::ether(amount),
        view.content.creator
    ));
    let receipt = view.tip(&platform)?;
    ui::confirmed(&receipt);
    ui::success(TIP_SENT);
    Ok(())
}
