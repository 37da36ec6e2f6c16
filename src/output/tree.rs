//! Tree formatter
//!
//! This module provides `TreeFormatter`, which turns a `Node` tree into
//! connector-drawn lines and writes them as plain text or to a colored
//! terminal stream.

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::{Node, format_modified, format_size};

use super::config::OutputConfig;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

pub const UNREADABLE_MARKER: &str = "[unreadable]";

/// One rendered line, kept in parts so each part can be colored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// Guide columns and connector, empty for the root.
    pub guide: String,
    /// Entry name; directories carry a trailing `/`.
    pub name: String,
    pub is_dir: bool,
    pub annotations: Vec<String>,
    pub unreadable: bool,
}

impl RenderedLine {
    fn for_node(node: &Node, guide: String) -> Self {
        let mut name = node.name.clone();
        if node.is_dir() && !name.ends_with('/') {
            name.push('/');
        }

        let mut annotations = Vec::new();
        if let Some(modified) = &node.modified {
            annotations.push(format!("[Modified: {}]", format_modified(modified)));
        }
        if let Some(size) = node.size {
            annotations.push(format!("[Size: {}]", format_size(size)));
        }

        Self {
            guide,
            name,
            is_dir: node.is_dir(),
            annotations,
            unreadable: node.is_unreadable(),
        }
    }

    /// The line as plain text, without a trailing newline.
    pub fn plain(&self) -> String {
        let mut line = format!("{}{}", self.guide, self.name);
        for annotation in &self.annotations {
            line.push(' ');
            line.push_str(annotation);
        }
        if self.unreadable {
            line.push(' ');
            line.push_str(UNREADABLE_MARKER);
        }
        line
    }
}

/// Formatter for tree output.
pub struct TreeFormatter {
    config: OutputConfig,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render the tree into lines, root first, in pre-order.
    pub fn render(&self, root: &Node) -> Vec<RenderedLine> {
        let mut lines = vec![RenderedLine::for_node(root, String::new())];
        let mut stack: Vec<(&Node, String, bool)> = Vec::new();
        push_children(&mut stack, root, "");

        while let Some((node, prefix, is_last)) = stack.pop() {
            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            lines.push(RenderedLine::for_node(
                node,
                format!("{}{}", prefix, connector),
            ));

            let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
            push_children(&mut stack, node, &child_prefix);
        }

        lines
    }

    /// Plain-text rendering, one `\n`-terminated line per entry.
    pub fn format(&self, root: &Node) -> String {
        let mut output = String::new();
        for line in self.render(root) {
            output.push_str(&line.plain());
            output.push('\n');
        }
        output
    }

    /// Print the tree to stdout, colored when the config allows it.
    pub fn print(&self, root: &Node) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let stdout = StandardStream::stdout(choice);
        let mut lock = stdout.lock();
        self.write_to(root, &mut lock)?;
        lock.flush()
    }

    /// Write the tree to any color-capable sink.
    pub fn write_to<W: WriteColor>(&self, root: &Node, out: &mut W) -> io::Result<()> {
        for line in self.render(root) {
            write_line(out, &line)?;
        }
        Ok(())
    }
}

fn push_children<'a>(stack: &mut Vec<(&'a Node, String, bool)>, node: &'a Node, prefix: &str) {
    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate().rev() {
        stack.push((child, prefix.to_string(), i == last));
    }
}

fn write_line<W: WriteColor>(out: &mut W, line: &RenderedLine) -> io::Result<()> {
    out.reset()?;
    write!(out, "{}", line.guide)?;

    if line.is_dir {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
    } else {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    }
    write!(out, "{}", line.name)?;
    out.reset()?;

    for annotation in &line.annotations {
        write!(out, " ")?;
        out.set_color(ColorSpec::new().set_dimmed(true))?;
        write!(out, "{}", annotation)?;
        out.reset()?;
    }

    if line.unreadable {
        write!(out, " ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        write!(out, "{}", UNREADABLE_MARKER)?;
        out.reset()?;
    }

    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::{Buffer, NoColor};

    fn sample_tree() -> Node {
        Node::directory("root").with_children(vec![
            Node::directory("b").with_children(vec![
                Node::file("c.txt"),
                Node::directory("d").with_children(vec![Node::file("e.txt")]),
            ]),
            Node::file("a.txt"),
        ])
    }

    fn plain_formatter() -> TreeFormatter {
        TreeFormatter::new(OutputConfig { use_color: false })
    }

    #[test]
    fn test_connectors() {
        let output = plain_formatter().format(&sample_tree());
        let expected = "\
root/
├── b/
│   ├── c.txt
│   └── d/
│       └── e.txt
└── a.txt
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_last_sibling_has_no_guide_below() {
        let tree = Node::directory("root").with_children(vec![
            Node::file("first"),
            Node::directory("last").with_children(vec![Node::file("inner")]),
        ]);
        let output = plain_formatter().format(&tree);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[2], "└── last/");
        assert_eq!(lines[3], "    └── inner");
    }

    #[test]
    fn test_empty_root() {
        let output = plain_formatter().format(&Node::directory("empty"));
        assert_eq!(output, "empty/\n");
    }

    #[test]
    fn test_annotations_follow_name() {
        use chrono::{Local, TimeZone};

        let modified = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let tree = Node::directory("root")
            .with_size(2048)
            .with_children(vec![Node::file("a.bin").with_size(12).with_modified(modified)]);

        let output = plain_formatter().format(&tree);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "root/ [Size: 2.0 KB]");
        assert_eq!(lines[1], "└── a.bin [Modified: 2024-01-02 03:04] [Size: 12 B]");
    }

    #[test]
    fn test_unreadable_marker() {
        let mut locked = Node::directory("locked");
        locked.error = Some("permission denied".to_string());
        let tree = Node::directory("root").with_children(vec![locked]);

        let output = plain_formatter().format(&tree);
        assert!(output.contains("└── locked/ [unreadable]"));
        assert!(!output.contains("permission denied"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let formatter = plain_formatter();
        let tree = sample_tree();
        assert_eq!(formatter.format(&tree), formatter.format(&tree));
    }

    #[test]
    fn test_uncolored_writer_matches_format() {
        let formatter = plain_formatter();
        let tree = sample_tree();

        let mut sink = NoColor::new(Vec::new());
        formatter.write_to(&tree, &mut sink).unwrap();
        let written = String::from_utf8(sink.into_inner()).unwrap();

        assert_eq!(written, formatter.format(&tree));
    }

    #[test]
    fn test_colored_writer_emits_escapes() {
        let formatter = TreeFormatter::new(OutputConfig::default());
        let mut buffer = Buffer::ansi();
        formatter.write_to(&sample_tree(), &mut buffer).unwrap();
        let written = String::from_utf8(buffer.into_inner()).unwrap();

        assert!(written.contains("\x1b["));
        assert!(written.contains("c.txt"));
    }
}
