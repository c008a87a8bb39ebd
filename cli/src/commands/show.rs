use thoughtverse::views::ContentView;

use crate::{cli::ContentArgs, context::Context, error::Result, ui};

pub fn run(ctx: &Context, args: ContentArgs) -> Result<()> {
    let connection = ctx.connect()?;
    let view = ContentView::load(&connection.platform(), args.id)?;
    print(&view);

    if !view.is_unlocked() {
        ui::status(format!(
            "Run `thoughtverse access {}` to read the full content",
            view.content.id
        ));
    }
    Ok(())
}

pub fn print(view: &ContentView) {
    let content = &view.content;
    ui::heading(format!("#{} {}", content.id, content.title));
    match view.creator.as_ref().filter(|profile| profile.exists()) {
        Some(profile) => ui::field("creator", format!("{} ({})", profile.username, content.creator)),
        None => ui::field("creator", content.creator),
    }
    ui::field("price", ui::ether(content.price));
    ui::field("access", if view.is_unlocked() { "yes" } else { "no" });
    println!();
    println!("{}", view.body_text());
}
