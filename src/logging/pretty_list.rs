use std::fmt;

/// Wrapper for &[T] which can be pretty-printed as a markdown-style list.
/// Nice for multiline logs which include capability lists.
pub struct PrettyList<'data, T>(pub &'data [T]);

impl<'data, T> fmt::Debug for PrettyList<'data, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(none)");
        }
        f.write_str("\n")?;
        for entry in self.0 {
            if f.alternate() {
                f.write_fmt(format_args!("- {:#?}\n", entry))?;
            } else {
                f.write_fmt(format_args!("- {:?}\n", entry))?;
            }
        }
        Ok(())
    }
}

impl<'data, T> fmt::Display for PrettyList<'data, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(none)");
        }
        f.write_str("\n")?;
        for entry in self.0 {
            f.write_fmt(format_args!("- {}\n", entry))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::PrettyList;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_renders_one_bullet_per_entry() {
        let names = vec!["VK_KHR_surface", "VK_KHR_xcb_surface"];
        assert_eq!(
            format!("{}", PrettyList(&names)),
            "\n- VK_KHR_surface\n- VK_KHR_xcb_surface\n"
        );
    }

    #[test]
    fn empty_lists_are_called_out() {
        let names: Vec<String> = vec![];
        assert_eq!(format!("{}", PrettyList(&names)), "(none)");
        assert_eq!(format!("{:?}", PrettyList(&names)), "(none)");
    }
}
