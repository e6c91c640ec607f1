//! Parse command - list the resources in a manifest

use console::style;
use kubexplain_core::Resource;
use serde::Serialize;

use crate::commands::{print_json, read_input};
use crate::display;
use crate::error::Result;

#[derive(Serialize)]
struct ParseOutput<'a> {
    resources: &'a [Resource],
}

pub fn run(input: &str, json_output: bool) -> Result<()> {
    let content = read_input(input)?;
    let resources = kubexplain_core::parse_manifest(&content)?;

    if json_output {
        return print_json(&ParseOutput {
            resources: &resources,
        });
    }

    println!("{} Parsing {}", style("→").blue(), input);
    display::display_resources(&resources);
    Ok(())
}
