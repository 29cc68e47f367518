use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(path: Option<&Path>) -> Result<(), String> {
    let catalog = super::load_catalog(path)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Effect", "Benefit"]);

    for (i, effect) in catalog.effects().iter().enumerate() {
        let desc = if effect.description.is_empty() {
            "—"
        } else {
            effect.description.as_str()
        };
        table.add_row(vec![(i + 1).to_string(), effect.id.clone(), desc.to_string()]);
    }

    println!("{table}");
    println!();
    println!("  {} effects", catalog.len());

    Ok(())
}
