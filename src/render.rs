//! ASCII rendering of binary trees.
//!
//! The layout is computed bottom-up: every subtree is turned into a rectangular block of text with
//! its root label centered above the blocks of its children, joined by `_`, `/` and `\` branches.
//! The renderer knows nothing about the tree it draws; callers supply a root handle, two child
//! accessors and a label function.
//!
//! # Examples
//!
//! ```
//! use ordered_trees::render;
//!
//! // A tree stored as (label, left, right) triples in a slice.
//! let nodes = [("2", Some(1), Some(2)), ("1", None, None), ("3", None, None)];
//! let lines = render::render(
//!     Some(0),
//!     |i: usize| nodes[i].1,
//!     |i: usize| nodes[i].2,
//!     |i: usize| nodes[i].0.to_string(),
//! );
//! assert_eq!(lines, vec![" 2", "/ \\", "1 3"]);
//! ```

use std::iter;

struct Block {
    lines: Vec<String>,
    width: usize,
    root_x: usize,
}

enum Visit<N> {
    Enter(N),
    Exit(N),
}

fn repeat(c: char, n: usize) -> String {
    iter::repeat(c).take(n).collect()
}

fn pad(line: &str, width: usize) -> String {
    let len = line.chars().count();
    let mut ret = String::from(line);
    ret.push_str(&repeat(' ', width.saturating_sub(len)));
    ret
}

fn join(label: String, left: Option<Block>, right: Option<Block>) -> Block {
    let sw = label.chars().count();
    match (left, right) {
        (None, None) => Block {
            lines: vec![label],
            width: sw,
            root_x: sw / 2,
        },
        (Some(left), None) => {
            let Block { lines, width: lw, root_x: lx } = left;
            let mut ret = Vec::with_capacity(lines.len() + 2);
            ret.push(format!(
                "{}{}{}",
                repeat(' ', lx + 1),
                repeat('_', lw.saturating_sub(lx + 1)),
                label,
            ));
            ret.push(format!(
                "{}/{}",
                repeat(' ', lx),
                repeat(' ', lw.saturating_sub(lx + 1) + sw),
            ));
            ret.extend(lines.iter().map(|line| pad(line, lw + sw)));
            Block {
                lines: ret,
                width: lw + sw,
                root_x: lw + sw / 2,
            }
        },
        (None, Some(right)) => {
            let Block { lines, width: rw, root_x: rx } = right;
            let mut ret = Vec::with_capacity(lines.len() + 2);
            ret.push(format!(
                "{}{}{}",
                label,
                repeat('_', rx),
                repeat(' ', rw.saturating_sub(rx)),
            ));
            ret.push(format!(
                "{}\\{}",
                repeat(' ', sw + rx),
                repeat(' ', rw.saturating_sub(rx + 1)),
            ));
            ret.extend(lines.iter().map(|line| format!("{}{}", repeat(' ', sw), pad(line, rw))));
            Block {
                lines: ret,
                width: sw + rw,
                root_x: sw / 2,
            }
        },
        (Some(left), Some(right)) => {
            let Block { lines: left_lines, width: lw, root_x: lx } = left;
            let Block { lines: right_lines, width: rw, root_x: rx } = right;
            let height = left_lines.len().max(right_lines.len());
            let mut ret = Vec::with_capacity(height + 2);
            ret.push(format!(
                "{}{}{}{}{}",
                repeat(' ', lx + 1),
                repeat('_', lw.saturating_sub(lx + 1)),
                label,
                repeat('_', rx),
                repeat(' ', rw.saturating_sub(rx)),
            ));
            ret.push(format!(
                "{}/{}\\{}",
                repeat(' ', lx),
                repeat(' ', lw.saturating_sub(lx + 1) + sw + rx),
                repeat(' ', rw.saturating_sub(rx + 1)),
            ));
            for i in 0..height {
                let left_line = left_lines.get(i).map(String::as_str).unwrap_or("");
                let right_line = right_lines.get(i).map(String::as_str).unwrap_or("");
                ret.push(format!(
                    "{}{}{}",
                    pad(left_line, lw),
                    repeat(' ', sw),
                    pad(right_line, rw),
                ));
            }
            Block {
                lines: ret,
                width: lw + sw + rw,
                root_x: lw + sw / 2,
            }
        },
    }
}

/// Renders the tree rooted at `root` into lines of text with trailing whitespace removed. An
/// empty tree renders to no lines.
///
/// Nodes are visited with an explicit stack, so arbitrarily deep trees can be rendered.
pub fn render<N, L, R, F>(root: Option<N>, left: L, right: R, label: F) -> Vec<String>
where
    N: Copy,
    L: Fn(N) -> Option<N>,
    R: Fn(N) -> Option<N>,
    F: Fn(N) -> String,
{
    let root = match root {
        Some(root) => root,
        None => return Vec::new(),
    };

    let mut pending = vec![Visit::Enter(root)];
    let mut blocks: Vec<Block> = Vec::new();
    while let Some(visit) = pending.pop() {
        match visit {
            Visit::Enter(node) => {
                pending.push(Visit::Exit(node));
                if let Some(child) = right(node) {
                    pending.push(Visit::Enter(child));
                }
                if let Some(child) = left(node) {
                    pending.push(Visit::Enter(child));
                }
            },
            Visit::Exit(node) => {
                let right_block = right(node).and_then(|_| blocks.pop());
                let left_block = left(node).and_then(|_| blocks.pop());
                blocks.push(join(label(node), left_block, right_block));
            },
        }
    }

    blocks
        .pop()
        .map(|block| {
            block
                .lines
                .into_iter()
                .map(|line| line.trim_end().to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::render;

    type Nodes = [(&'static str, Option<usize>, Option<usize>)];

    fn draw(nodes: &Nodes) -> Vec<String> {
        render(
            if nodes.is_empty() { None } else { Some(0) },
            |i: usize| nodes[i].1,
            |i: usize| nodes[i].2,
            |i: usize| nodes[i].0.to_string(),
        )
    }

    #[test]
    fn test_empty() {
        assert!(draw(&[]).is_empty());
    }

    #[test]
    fn test_single() {
        assert_eq!(draw(&[("42", None, None)]), vec!["42"]);
    }

    #[test]
    fn test_left_only() {
        let nodes = [("20", Some(1), None), ("10", None, None)];
        assert_eq!(draw(&nodes), vec!["  20", " /", "10"]);
    }

    #[test]
    fn test_right_only() {
        let nodes = [("1", None, Some(1)), ("2", None, None)];
        assert_eq!(draw(&nodes), vec!["1", " \\", " 2"]);
    }

    #[test]
    fn test_uneven_heights() {
        let nodes = [
            ("4", Some(1), Some(2)),
            ("2", Some(3), None),
            ("5", None, None),
            ("1", None, None),
        ];
        assert_eq!(draw(&nodes), vec!["  4", " / \\", " 2 5", "/", "1"]);
    }

    #[test]
    fn test_wide_labels_are_measured_in_chars() {
        let nodes = [("é", Some(1), Some(2)), ("α", None, None), ("ω", None, None)];
        assert_eq!(draw(&nodes), vec![" é", "/ \\", "α ω"]);
    }

    #[test]
    fn test_deep_chain() {
        let nodes: Vec<(&'static str, Option<usize>, Option<usize>)> = (0..1_000)
            .map(|i| ("x", None, if i + 1 < 1_000 { Some(i + 1) } else { None }))
            .collect();
        assert_eq!(draw(&nodes).len(), 2 * 1_000 - 1);
    }
}
