//! Help text rendering

use crate::command::tree::Command;

/// Blank cells between the name column and the help column
const GAP: &str = "    ";
/// Space after the widest name
const PADDING: usize = 2;

impl Command {
    /// Help for this command and a listing of its subcommands.
    ///
    /// Layout: a leading blank line, the long help (or help, or
    /// `<name> has no help`), then when there are subcommands to show a
    /// `Commands:` block with one aligned `name  help` row per child in name
    /// order, followed by a blank line.
    pub fn help_text(&self) -> String {
        let mut out = String::new();

        if !self.long_help().is_empty() {
            push_paragraph(&mut out, self.long_help());
        } else if !self.help().is_empty() {
            push_paragraph(&mut out, self.help());
        } else if !self.name().is_empty() {
            push_paragraph(&mut out, &format!("{} has no help", self.name()));
        }

        if self.has_displayable_subcommands() {
            push_paragraph(&mut out, "Commands:");

            let children = self.children_sorted();
            let width = children
                .iter()
                .map(|c| c.name().chars().count())
                .max()
                .unwrap_or(0)
                + PADDING;

            for child in children {
                let pad = width - child.name().chars().count();
                out.push_str("  ");
                out.push_str(child.name());
                out.extend(std::iter::repeat(' ').take(pad));
                out.push_str(GAP);
                out.push_str(child.help());
                out.push('\n');
            }
            out.push('\n');
        }

        out
    }
}

fn push_paragraph(out: &mut String, text: &str) {
    out.push('\n');
    out.push_str(text);
    out.push('\n');
}
