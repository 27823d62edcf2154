//! SVG flamegraph generation for goroutine call sites.
//!
//! The graph has three levels: all goroutines at the bottom, one frame per
//! blocking state above it, and one frame per call site on top. Widths are
//! proportional to goroutine counts.

use crate::aggregator::CallSiteCount;
use crate::utils::error::FlamegraphError;
use log::info;
use std::collections::HashMap;

const HEIGHT_PER_LEVEL: usize = 20;
const TITLE_MARGIN: usize = 30;
const LEGEND_HEIGHT: usize = 80;
const EMPTY_LABEL: &str = "(unknown)";

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "Goroutine Blocking Profile".to_string(),
            width: 1200,
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// Internal Node structure for building the tree
struct Node {
    name: String,
    value: u64,
    order: usize,
    children: HashMap<String, Node>,
}

impl Node {
    fn new(name: String, order: usize) -> Self {
        Self {
            name,
            value: 0,
            order,
            children: HashMap::new(),
        }
    }

    fn insert(&mut self, path: &[&str], value: u64) {
        self.value += value;
        if let Some((head, tail)) = path.split_first() {
            let order = self.children.len();
            let child = self
                .children
                .entry(head.to_string())
                .or_insert_with(|| Node::new(head.to_string(), order));
            child.insert(tail, value);
        }
    }

    /// Children widest first, ties in insertion order
    fn sorted_children(&self) -> Vec<&Node> {
        let mut children: Vec<&Node> = self.children.values().collect();
        children.sort_by(|a, b| b.value.cmp(&a.value).then(a.order.cmp(&b.order)));
        children
    }
}

/// Generate an SVG flamegraph from call-site counts
///
/// # Errors
/// * `FlamegraphError::EmptyStacks` - no rows or every count is zero
pub fn generate_flamegraph(
    call_sites: &[CallSiteCount],
    config: Option<&FlamegraphConfig>,
) -> Result<String, FlamegraphError> {
    let config = config.cloned().unwrap_or_default();
    info!("Generating flamegraph with {} call sites", call_sites.len());

    let mut root = Node::new("all goroutines".to_string(), 0);
    for row in call_sites {
        root.insert(&[display_label(&row.state), display_label(&row.name)], row.count);
    }

    if root.value == 0 {
        return Err(FlamegraphError::EmptyStacks);
    }

    let width = config.width;
    let graph_height = 3 * HEIGHT_PER_LEVEL + TITLE_MARGIN;
    let total_height = graph_height + LEGEND_HEIGHT;

    let mut svg_content = String::new();
    svg_content.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, total_height, width, total_height
    ));
    svg_content.push_str(
        r#"<style>.func { font: 12px sans-serif; } .func:hover { stroke: black; stroke-width: 1; cursor: pointer; opacity: 0.9; }</style>"#,
    );
    svg_content.push_str(&format!(
        r#"<text x="{}" y="20" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        width / 2,
        escape_xml(&config.title)
    ));

    // Inverted: root at bottom
    render_node(&root, 0, 0.0, width as f64, root.value, &mut svg_content, graph_height);
    render_legend(&mut svg_content, graph_height);

    svg_content.push_str("</svg>");

    info!(
        "Flamegraph generated successfully ({} bytes)",
        svg_content.len()
    );
    Ok(svg_content)
}

fn display_label(label: &str) -> &str {
    if label.is_empty() {
        EMPTY_LABEL
    } else {
        label
    }
}

fn get_state_color(name: &str) -> &'static str {
    if name == "running" || name == "runnable" {
        "rgb(34, 139, 34)" // Forest Green
    } else if name.starts_with("chan") || name.starts_with("select") {
        "rgb(70, 130, 180)" // Steel Blue
    } else if name.starts_with("semacquire")
        || name.starts_with("sync.")
        || name.starts_with("sync ")
    {
        "rgb(220, 20, 60)" // Crimson (lock contention)
    } else if name.starts_with("IO wait") || name.starts_with("syscall") {
        "rgb(255, 140, 0)" // Dark Orange
    } else if name.starts_with("sleep") || name.starts_with("idle") {
        "rgb(169, 169, 169)" // Gray
    } else {
        "rgb(138, 43, 226)" // Blue Violet
    }
}

fn render_node(
    node: &Node,
    level: usize,
    x: f64,
    w: f64,
    total: u64,
    out: &mut String,
    graph_height: usize,
) {
    if w < 0.5 {
        return;
    }

    let color = if level == 0 {
        "rgb(100, 149, 237)" // Cornflower Blue
    } else {
        get_state_color(&node.name)
    };
    let y = graph_height - (level + 1) * HEIGHT_PER_LEVEL;
    let share = node.value as f64 / total as f64 * 100.0;
    let name = escape_xml(&node.name);

    out.push_str(&format!(
        r#"<rect x="{:.2}" y="{}" width="{:.2}" height="{}" fill="{}" class="func"><title>{} ({} goroutines, {:.1}%)</title></rect>"#,
        x, y, w, HEIGHT_PER_LEVEL, color, name, node.value, share
    ));

    if w > 35.0 {
        let max_chars = (w / 7.0) as usize;
        let display_name: String = if node.name.chars().count() > max_chars && max_chars > 3 {
            let head: String = node.name.chars().take(max_chars - 3).collect();
            format!("{}...", head)
        } else {
            node.name.clone()
        };

        if !display_name.is_empty() {
            out.push_str(&format!(
                r#"<text x="{:.2}" y="{}" dx="4" dy="14" font-size="12" fill="white" pointer-events="none">{}</text>"#,
                x,
                y,
                escape_xml(&display_name)
            ));
        }
    }

    let mut current_x = x;
    for child in node.sorted_children() {
        let child_w = child.value as f64 / node.value as f64 * w;
        render_node(child, level + 1, current_x, child_w, total, out, graph_height);
        current_x += child_w;
    }
}

fn render_legend(out: &mut String, graph_height: usize) {
    let legend_y = graph_height + 40;

    out.push_str(&format!(
        r#"<text x="10" y="{}" font-size="14" font-weight="bold">Legend:</text>"#,
        legend_y
    ));

    let items = [
        ("Running", "rgb(34, 139, 34)"),
        ("Chan/Select", "rgb(70, 130, 180)"),
        ("Locks", "rgb(220, 20, 60)"),
        ("IO/Syscall", "rgb(255, 140, 0)"),
        ("Sleep/Idle", "rgb(169, 169, 169)"),
        ("Other", "rgb(138, 43, 226)"),
    ];

    for (i, (label, color)) in items.iter().enumerate() {
        let x = 80 + i * 120;
        out.push_str(&format!(
            r#"<rect x="{}" y="{}" width="15" height="15" fill="{}" rx="2"/>"#,
            x,
            legend_y - 12,
            color
        ));
        out.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="12">{}</text>"#,
            x + 20,
            legend_y,
            label
        ));
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
