//! Command handler for `mc-cli users`.

use colored::Colorize;

use mc_membership::Member;
use mc_runtime::ContainerConfig;

use super::{fail, membership_store};

const HEADERS: [&str; 4] = ["NAME", "UUID", "XUID", "PERMISSIONS"];

/// Prints the allowlist joined with each player's permission grants.
pub fn execute(config: &ContainerConfig, json: bool) {
    let members = match membership_store(config).members() {
        Ok(members) => members,
        Err(e) => fail(format!("Failed to read users: {e}")),
    };

    if json {
        match serde_json::to_string_pretty(&members) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => fail(format!("Failed to serialize users: {e}")),
        }
        return;
    }

    if members.is_empty() {
        println!("{} The allowlist is empty.", "!".yellow().bold());
        return;
    }

    let mut lines = render_table(&members).into_iter();
    if let Some(header) = lines.next() {
        println!("{}", header.bold());
    }
    for line in lines {
        println!("{line}");
    }
}

/// Formats members as left-aligned columns, header and rule first.
fn render_table(members: &[Member]) -> Vec<String> {
    let rows: Vec<[String; 4]> = members
        .iter()
        .map(|m| {
            [
                m.name.clone(),
                m.uuid.clone().unwrap_or_else(|| "-".to_string()),
                m.xuid.clone().unwrap_or_else(|| "-".to_string()),
                format_permissions(m),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let join = |cells: [&str; 4]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let header = join(HEADERS);
    let rule = "-".repeat(header.len());
    let mut out = vec![header, rule];
    for row in &rows {
        out.push(join([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
        ]));
    }
    out
}

fn format_permissions(member: &Member) -> String {
    match (&member.xuid, member.permissions.is_empty()) {
        (None, _) => "never connected".to_string(),
        (Some(_), true) => "none".to_string(),
        (Some(_), false) => member
            .permissions
            .join(", "),
    }
}
