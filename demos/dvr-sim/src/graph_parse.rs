use anyhow::{bail, Context};
use dvr::concepts::topology::Topology;
use dvr::framework::{Cost, NodeId};
use std::str::FromStr;

/// Parses a link list, one `a b cost` link per line.
///
/// Lines may start with `- ` (what graph-gen prints), `#` starts a comment, and `nodes <n>` declares
/// the node count so trailing nodes can be left isolated.
pub fn load(input: &str) -> anyhow::Result<Topology> {
    let mut declared: Option<usize> = None;
    let mut links: Vec<(NodeId, NodeId, Cost)> = Vec::new();

    for (i, raw) in input.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.split('#').next().unwrap_or_default().trim();
        let line = line.strip_prefix("- ").unwrap_or(line);
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => {}
            ["nodes", n] => declared = Some(parse_num(n, line_no)?),
            [a, b, cost] => links.push((
                parse_num(a, line_no)?,
                parse_num(b, line_no)?,
                parse_num(cost, line_no)?,
            )),
            _ => bail!("line {line_no}: expected `a b cost` or `nodes <n>`, got {raw:?}"),
        }
    }

    let node_count = match declared {
        Some(n) => n,
        None => links.iter().map(|&(a, b, _)| a.max(b) + 1).max().unwrap_or(0),
    };
    Topology::from_links(node_count, &links).context("invalid topology")
}

fn parse_num<T>(value: &str, line_no: usize) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("line {line_no}: {value:?} is not a valid number"))
}
