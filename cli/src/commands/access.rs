use thoughtverse::views::ContentView;

use crate::{cli::ContentArgs, commands::show, context::Context, error::Result, ui};

pub fn run(ctx: &Context, args: ContentArgs) -> Result<()> {
    let connection = ctx.connect()?;
    let platform = connection.platform();
    let mut view = ContentView::load(&platform, args.id)?;

    if view.is_unlocked() {
        ui::status("You already have access to this content");
    } else {
        ui::status(format!("Paying {} for access", ui::ether(view.content.price)));
        let confirmed = view.access(&platform)?;
        ui::confirmed(&confirmed.receipt);
        ui::success("Access granted");
        if let Some(err) = &confirmed.refresh_error {
            ui::stale(err);
        }
    }

    show::print(&view);
    Ok(())
}
