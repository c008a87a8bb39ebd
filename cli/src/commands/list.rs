use thoughtverse::views::{ContentList, ContentView};

use crate::{context::Context, error::Result, ui};

pub fn run(ctx: &Context) -> Result<()> {
    let connection = ctx.connect()?;
    let list = ContentList::load(&connection.platform())?;

    if list.items.is_empty() {
        ui::status("No content published yet");
        return Ok(());
    }

    for item in list.items {
        let lock = if item.has_access { "unlocked" } else { "locked" };
        ui::heading(format!(
            "#{} {} ({}, {lock})",
            item.id,
            item.title,
            ui::ether(item.price)
        ));
        ui::field("creator", item.creator);
        println!("{}\n", ContentView::new(item).body_text());
    }
    Ok(())
}
