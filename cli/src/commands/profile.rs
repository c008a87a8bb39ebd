use thoughtverse::{views::profile::PROFILE_CREATED, views::ProfileForm};

use crate::{
    cli::{ProfileArgs, ProfileCommand},
    context::Context,
    error::Result,
    ui,
};

pub fn run(ctx: &Context, args: ProfileArgs) -> Result<()> {
    match args.command {
        ProfileCommand::Create { username, bio } => create(ctx, ProfileForm { username, bio }),
        ProfileCommand::Show { address } => show(ctx, address.as_deref()),
    }
}

fn create(ctx: &Context, mut form: ProfileForm) -> Result<()> {
    form.validate()?;

    let connection = ctx.connect()?;
    ui::status(format!(
        "Creating profile '{}', waiting for confirmation",
        form.username.trim()
    ));
    let receipt = form.submit(&connection.platform())?;
    ui::confirmed(&receipt);
    ui::success(PROFILE_CREATED);
    Ok(())
}

fn show(ctx: &Context, address: Option<&str>) -> Result<()> {
    let address = address.map(thoughtverse::address::parse).transpose()?;

    let connection = ctx.connect()?;
    let platform = connection.platform();
    let profile = platform.profile(address.unwrap_or_else(|| platform.account()))?;

    if !profile.exists() {
        ui::warn(format!("No profile registered for {}", profile.owner));
        return Ok(());
    }
    ui::heading(&profile.username);
    ui::field("account", profile.owner);
    ui::field("bio", &profile.bio);
    Ok(())
}
