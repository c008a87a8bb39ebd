use thoughtverse::views::dashboard::{
    validate_fee, validate_share, validate_withdrawal, FEE_UPDATED, SHARE_UPDATED, WITHDRAWN,
    WITHDRAWN_ALL,
};
use thoughtverse::views::OwnerDashboard;

use crate::{
    cli::{OwnerArgs, OwnerCommand},
    context::Context,
    error::Result,
    ui,
};

const WAITING: &str = "waiting for confirmation";

pub fn run(ctx: &Context, args: OwnerArgs) -> Result<()> {
    // Reject bad input before the wallet is contacted.
    match &args.command {
        OwnerCommand::Withdraw { amount } => {
            validate_withdrawal(amount)?;
        }
        OwnerCommand::SetShare { percent } => {
            validate_share(percent)?;
        }
        OwnerCommand::SetFee { amount } => {
            validate_fee(amount)?;
        }
        OwnerCommand::Status | OwnerCommand::WithdrawAll => {}
    }

    let connection = ctx.connect()?;
    let platform = connection.platform();
    let mut dashboard = OwnerDashboard::load(&platform)?;

    let (confirmed, notice) = match args.command {
        OwnerCommand::Status => {
            print(&dashboard);
            return Ok(());
        }
        OwnerCommand::Withdraw { amount } => {
            ui::status(format!("Withdrawing {amount} ETH, {WAITING}"));
            (dashboard.withdraw(&platform, &amount)?, WITHDRAWN)
        }
        OwnerCommand::WithdrawAll => {
            ui::status(format!(
                "Withdrawing the whole balance of {}, {WAITING}",
                ui::ether(dashboard.balance)
            ));
            (dashboard.withdraw_all(&platform)?, WITHDRAWN_ALL)
        }
        OwnerCommand::SetShare { percent } => {
            ui::status(format!("Setting the platform share to {percent}%, {WAITING}"));
            (
                dashboard.set_platform_share(&platform, &percent)?,
                SHARE_UPDATED,
            )
        }
        OwnerCommand::SetFee { amount } => {
            ui::status(format!("Setting the posting fee to {amount} ETH, {WAITING}"));
            (dashboard.set_posting_fee(&platform, &amount)?, FEE_UPDATED)
        }
    };

    ui::confirmed(&confirmed.receipt);
    ui::success(notice);
    match &confirmed.refresh_error {
        Some(err) => ui::stale(err),
        None => print(&dashboard),
    }
    Ok(())
}

fn print(dashboard: &OwnerDashboard) {
    ui::heading("Platform");
    ui::field("owner", dashboard.owner);
    ui::field("balance", ui::ether(dashboard.balance));
    ui::field("share", format!("{}%", dashboard.platform_share_percent()));
    ui::field("fee", ui::ether(dashboard.posting_fee));
}
