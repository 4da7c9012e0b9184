//! Line-level parsing of Cobra-generated command reference pages.
//!
//! Cobra's markdown export indents example lines by two spaces without
//! fencing them, and buries the one-line command synopsis between the
//! `##` command heading and the first `###` section. The two functions
//! here recover both.

/// Heading line that opens an examples section.
const EXAMPLES_HEADING: &str = "### Examples";

/// Synthetic fence inserted before a run of unfenced example lines.
const OPEN_FENCE: &str = "  ```bash";

/// Synthetic fence inserted after a run of unfenced example lines.
const CLOSE_FENCE: &str = "  ```";

/// Extract the one-line command synopsis from a reference page.
///
/// Scans for the first `## ` heading, then collects every non-blank,
/// non-heading line until the next `###` heading, joined by single
/// spaces. Returns an empty string when no `## ` heading exists;
/// malformed input never errors.
pub fn read_cobra_description(text: &str) -> String {
    let mut inside = false;
    let mut parts: Vec<&str> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("###") {
            if inside {
                break;
            }
            continue;
        }
        if line.starts_with("## ") {
            inside = true;
            continue;
        }
        if inside {
            parts.push(line);
        }
    }

    parts.join(" ")
}

/// Wrap unfenced example lines of any `### Examples` section in a
/// ```` ```bash ```` code block.
///
/// Single pass over the lines. Inside an examples section, a two-space
/// indented line opens a synthetic fence unless it is a bullet (`  *`),
/// blank, or the section already carries its own fence (a line starting
/// with an indented backtick suppresses fencing for the whole indented
/// run). The fence closes before the next non-indented, non-empty line;
/// a `###` heading ends the section and closes any open fence. Every
/// input line is preserved in order; only fence lines are inserted.
///
/// An input that ends inside an open synthetic fence gets one closing
/// fence appended after the final line.
pub fn wrap_examples_in_code_block(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut in_examples = false;
    let mut fence_open = false;
    let mut skip_fence = false;

    for line in text.split('\n') {
        if in_examples {
            if line.starts_with("###") {
                in_examples = false;
            }
            if !line.is_empty() && !line.starts_with("  ") {
                if fence_open && !skip_fence {
                    out.push(CLOSE_FENCE);
                }
                fence_open = false;
                skip_fence = false;
            } else if line.starts_with("  ") && !fence_open {
                if line.starts_with("  `") {
                    skip_fence = true;
                } else if !skip_fence && !line.starts_with("  *") && !line.trim().is_empty() {
                    out.push(OPEN_FENCE);
                    fence_open = true;
                }
            }
        }
        if line.starts_with(EXAMPLES_HEADING) {
            in_examples = true;
        }
        out.push(line);
    }

    if fence_open && !skip_fence {
        out.push(CLOSE_FENCE);
    }

    out.join("\n")
}
