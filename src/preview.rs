use crate::{materialize::SHARED_LINKS, vfs::FileTreeNode};
use colored::{ColoredString, Colorize};
use std::path::Path;

/// A line of the preview: a node's name, styled by kind, plus its children.
struct PreviewNode<'a> {
    label: ColoredString,
    children: Vec<(&'a str, &'a FileTreeNode)>,
}

fn children_of(node: &FileTreeNode) -> Vec<(&str, &FileTreeNode)> {
    match node {
        FileTreeNode::Leaf(_) => Vec::new(),
        FileTreeNode::Directory(entries) => entries
            .iter()
            .map(|(name, child)| (name.as_str(), child))
            .collect(),
    }
}

fn label_for(name: &str, node: &FileTreeNode) -> ColoredString {
    if node.is_directory() {
        name.blue()
    } else {
        name.green()
    }
}

/// Renders `tree` as box-drawing lines, rooted at a node named after `destination`.
///
/// The shared configuration links that follow materialization are listed after the
/// tree's own entries.
pub fn render_tree(tree: &FileTreeNode, destination: &Path) -> Vec<String> {
    let root_name = destination
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| destination.display().to_string());

    let mut lines = vec![format!("{}{}", "└── ".yellow(), root_name.as_str().blue())];

    let children = children_of(tree);
    let total = children.len() + SHARED_LINKS.len();

    for (i, (name, child)) in children.into_iter().enumerate() {
        let node = PreviewNode {
            label: label_for(name, child),
            children: children_of(child),
        };
        push_lines(&mut lines, node, "    ", i == total - 1);
    }

    for (i, (name, _)) in SHARED_LINKS.iter().enumerate() {
        let node = PreviewNode {
            label: format!("{} -> shared", name).as_str().cyan(),
            children: Vec::new(),
        };
        push_lines(&mut lines, node, "    ", i == SHARED_LINKS.len() - 1);
    }

    lines
}

fn push_lines(lines: &mut Vec<String>, node: PreviewNode, prefix: &str, is_last: bool) {
    let connector = if is_last { "└── " } else { "├── " };
    lines.push(format!("{}{}{}", prefix.yellow(), connector.yellow(), node.label));

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let len = node.children.len();
    for (i, (name, child)) in node.children.into_iter().enumerate() {
        let next = PreviewNode {
            label: label_for(name, child),
            children: children_of(child),
        };
        push_lines(lines, next, &child_prefix, i == len - 1);
    }
}

pub fn preview_as_tree(tree: &FileTreeNode, destination: &Path) {
    println!(
        "Legend: {} = (directory), {} = (file), {} = (link)",
        "blue".blue(),
        "green".green(),
        "cyan".cyan()
    );

    println!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue(),
    );

    for line in render_tree(tree, destination) {
        println!("{}", line);
    }

    println!(
        "\n{} {}\n",
        "└─".bold().bright_blue(),
        "Dry run: nothing was written".bright_green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tree_lines() {
        colored::control::set_override(false);

        let tree = FileTreeNode::directory()
            .with(
                "src",
                FileTreeNode::directory().with("index.ts", FileTreeNode::Leaf(String::new())),
            )
            .with("LICENSE", FileTreeNode::Leaf(String::new()));

        let lines = render_tree(&tree, Path::new("/tmp/widgets"));

        assert_eq!(
            lines,
            vec![
                "└── widgets",
                "    ├── src",
                "    │   └── index.ts",
                "    ├── LICENSE",
                "    ├── tsconfig.json -> shared",
                "    └── tsconfig -> shared",
            ]
        );
    }
}
