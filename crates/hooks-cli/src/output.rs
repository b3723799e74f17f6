use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Horizontal rule used by the report renderers.
pub const RULE: &str =
    "----------------------------------------------------------------";
