//! Decide whether a probed capability list satisfies a set of required names.

use std::collections::BTreeSet;

/// Get the required names which do not appear in the available list.
///
/// Starts from a working copy of the required set and eliminates every name
/// the driver reported. Whatever survives is missing. Comparison is exact
/// string equality. The result is sorted.
pub fn missing<R, A>(required: &[R], available: &[A]) -> Vec<String>
where
    R: AsRef<str>,
    A: AsRef<str>,
{
    let mut remaining: BTreeSet<&str> =
        required.iter().map(|name| name.as_ref()).collect();
    for name in available {
        remaining.remove(name.as_ref());
    }
    remaining.into_iter().map(str::to_owned).collect()
}

/// True when every required name appears in the available list, regardless
/// of order or any extra available names.
pub fn all_satisfied<R, A>(required: &[R], available: &[A]) -> bool
where
    R: AsRef<str>,
    A: AsRef<str>,
{
    missing(required, available).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extra_available_names_are_ignored() {
        let required = ["VK_KHR_swapchain"];
        let available = [
            "VK_KHR_maintenance1",
            "VK_KHR_swapchain",
            "VK_EXT_memory_budget",
        ];
        assert!(all_satisfied(&required, &available));
    }

    #[test]
    fn order_does_not_matter() {
        let required = ["b", "a", "c"];
        let available = ["c", "a", "b"];
        assert!(all_satisfied(&required, &available));
    }

    #[test]
    fn missing_names_are_reported() {
        let required = ["VK_KHR_surface", "VK_KHR_xcb_surface"];
        let available = ["VK_KHR_surface"];
        assert!(!all_satisfied(&required, &available));
        assert_eq!(missing(&required, &available), vec!["VK_KHR_xcb_surface"]);
    }

    #[test]
    fn comparison_is_exact() {
        let required = ["VK_KHR_swapchain"];
        assert!(!all_satisfied(&required, &["VK_KHR_swapchain_mutable_format"]));
        assert!(!all_satisfied(&required, &["vk_khr_swapchain"]));
    }

    #[test]
    fn an_empty_requirement_is_always_satisfied() {
        let required: [&str; 0] = [];
        let available: [&str; 0] = [];
        assert!(all_satisfied(&required, &available));
    }

    #[test]
    fn duplicate_requirements_collapse() {
        let required = ["a", "a"];
        assert!(all_satisfied(&required, &["a"]));
        assert_eq!(missing(&required, &["b"]), vec!["a"]);
    }
}
