use thoughtverse::views::{upload::CONTENT_POSTED, UploadForm};

use crate::{cli::PostArgs, context::Context, error::Result, ui};

pub fn run(ctx: &Context, args: PostArgs) -> Result<()> {
    let mut form = UploadForm {
        title: args.title,
        body: args.body,
        price: args.price,
    };
    let price = form.validate()?;
    let fee = ctx.config.posting_fee()?;

    let connection = ctx.connect()?;
    match fee {
        Some(fee) => ui::status(format!("Paying configured posting fee of {}", ui::ether(fee))),
        None => ui::status("Paying the contract's current posting fee"),
    }
    let receipt = form.submit(&connection.platform(), fee)?;
    ui::confirmed(&receipt);
    ui::success(format!("{CONTENT_POSTED} (price {})", ui::ether(price)));
    Ok(())
}
