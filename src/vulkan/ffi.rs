//! Convenience functions for interacting with ffi calls to vulkan.
//!
//! Here be dragons. Read the comments on functions to use them correctly!

use std::{
    ffi::{CString, NulError},
    os::raw::c_char,
};

/// Build a vector of pointers to c-style strings from a slice of rust strings.
///
/// # Safety
///
/// The returned vector of pointers is only valid while the cstrings are alive.
pub unsafe fn to_os_ptrs(
    strings: &[String],
) -> Result<(Vec<CString>, Vec<*const c_char>), NulError> {
    let cstrings = strings
        .iter()
        .cloned()
        .map(CString::new)
        .collect::<Result<Vec<CString>, NulError>>()?;
    let ptrs = cstrings
        .iter()
        .map(|cstr| cstr.as_ptr())
        .collect::<Vec<*const c_char>>();
    Ok((cstrings, ptrs))
}

/// Read a fixed-size, nul-terminated name array (extension names, layer
/// names, device names) into an owned string.
///
/// Returns None when the bytes before the terminator are not valid utf-8.
pub fn name_from_raw(raw: &[c_char]) -> Option<String> {
    let bytes: Vec<u8> = raw
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
pub(crate) fn raw_name<const N: usize>(name: &str) -> [c_char; N] {
    let mut raw = [0 as c_char; N];
    for (slot, byte) in raw.iter_mut().zip(name.bytes()) {
        *slot = byte as c_char;
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn names_stop_at_the_nul_terminator() {
        let raw: [c_char; 256] = raw_name("VK_KHR_swapchain");
        assert_eq!(name_from_raw(&raw), Some("VK_KHR_swapchain".to_owned()));
    }

    #[test]
    fn os_ptrs_reject_interior_nul_bytes() {
        let result = unsafe { to_os_ptrs(&["bad\0name".to_owned()]) };
        assert!(result.is_err());
    }

    #[test]
    fn os_ptrs_point_at_the_owned_cstrings() {
        let names = vec!["a".to_owned(), "b".to_owned()];
        let (cstrings, ptrs) = unsafe { to_os_ptrs(&names) }.unwrap();
        assert_eq!(ptrs.len(), 2);
        assert_eq!(ptrs[1], cstrings[1].as_ptr());
    }
}
