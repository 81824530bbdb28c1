//! The C ABI exported to host applications.
//!
//! Hosts hand in UTF-16 strings with explicit lengths and get booleans
//! back; every failure, including a panic, is converted to `false` (or a
//! null handle) at this boundary. A dictionary handle is an opaque
//! pointer owned by the host between `triespell_load_dictionary` and
//! `triespell_unload_dictionary`.
//!
//! `triespell_suggest` writes its results into a caller-supplied buffer
//! as a sequence of NUL-terminated strings followed by one more NUL; an
//! empty suggestion list is two consecutive NULs. A suggestion that does
//! not fit in the remaining space is skipped; shorter ones after it may
//! still be emitted.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::ptr;
use std::slice;

use crate::convert;
use crate::dictionary::SpellDictionary;

/// Load a line-format dictionary from a UTF-16 path.
///
/// Returns null when the path is null/empty or the file cannot be read.
///
/// # Safety
///
/// `path` must point to `path_len` valid UTF-16 code units.
#[no_mangle]
pub unsafe extern "C" fn triespell_load_dictionary(
    path: *const u16,
    path_len: usize,
) -> *mut SpellDictionary {
    if path.is_null() || path_len == 0 {
        return ptr::null_mut();
    }
    let units = slice::from_raw_parts(path, path_len);
    let loaded = catch_unwind(|| {
        let path = convert::utf16_units_to_string(units);
        SpellDictionary::open(Path::new(&path)).ok()
    });
    match loaded {
        Ok(Some(dictionary)) => Box::into_raw(Box::new(dictionary)),
        _ => ptr::null_mut(),
    }
}

/// Free a dictionary handle. A null handle is ignored.
///
/// # Safety
///
/// `handle` must be null or a pointer returned by
/// `triespell_load_dictionary` that has not been unloaded yet.
#[no_mangle]
pub unsafe extern "C" fn triespell_unload_dictionary(handle: *mut SpellDictionary) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// Check whether a word is in the dictionary. False on a null handle, an
/// empty word, or any failure.
///
/// # Safety
///
/// `handle` must be a live dictionary handle or null; `word` must point
/// to `word_len` valid UTF-16 code units.
#[no_mangle]
pub unsafe extern "C" fn triespell_is_word(
    handle: *mut SpellDictionary,
    word: *const u16,
    word_len: usize,
) -> bool {
    if handle.is_null() || word.is_null() || word_len == 0 {
        return false;
    }
    let dictionary = &mut *handle;
    let units = slice::from_raw_parts(word, word_len);
    catch_unwind(AssertUnwindSafe(|| {
        let word = convert::utf16_units_to_string(units);
        dictionary.contains(&word).unwrap_or(false)
    }))
    .unwrap_or(false)
}

/// Add a word. True on success, including a word that was already
/// present.
///
/// # Safety
///
/// Same contract as `triespell_is_word`.
#[no_mangle]
pub unsafe extern "C" fn triespell_add_word(
    handle: *mut SpellDictionary,
    word: *const u16,
    word_len: usize,
) -> bool {
    if handle.is_null() || word.is_null() || word_len == 0 {
        return false;
    }
    let dictionary = &mut *handle;
    let units = slice::from_raw_parts(word, word_len);
    catch_unwind(AssertUnwindSafe(|| {
        let word = convert::utf16_units_to_string(units);
        dictionary.add(&word).is_ok()
    }))
    .unwrap_or(false)
}

/// Remove a word. True on success, including a word that was not
/// present.
///
/// # Safety
///
/// Same contract as `triespell_is_word`.
#[no_mangle]
pub unsafe extern "C" fn triespell_remove_word(
    handle: *mut SpellDictionary,
    word: *const u16,
    word_len: usize,
) -> bool {
    if handle.is_null() || word.is_null() || word_len == 0 {
        return false;
    }
    let dictionary = &mut *handle;
    let units = slice::from_raw_parts(word, word_len);
    catch_unwind(AssertUnwindSafe(|| {
        let word = convert::utf16_units_to_string(units);
        dictionary.remove(&word).is_ok()
    }))
    .unwrap_or(false)
}

/// Write suggestions for `word` into `buffer`. False only on argument
/// errors (null pointers, empty word, buffer shorter than two units).
///
/// # Safety
///
/// `handle` must be a live dictionary handle or null; `word` must point
/// to `word_len` valid UTF-16 code units; `buffer` must be writable for
/// `buffer_len` units.
#[no_mangle]
pub unsafe extern "C" fn triespell_suggest(
    handle: *mut SpellDictionary,
    word: *const u16,
    word_len: usize,
    buffer: *mut u16,
    buffer_len: usize,
    error_tolerance: u16,
    best_error_tolerance: u16,
) -> bool {
    if word.is_null() || word_len == 0 {
        return false;
    }
    if buffer.is_null() || buffer_len < 2 {
        return false;
    }
    if handle.is_null() {
        return false;
    }
    let dictionary = &mut *handle;
    let units = slice::from_raw_parts(word, word_len);
    let out = slice::from_raw_parts_mut(buffer, buffer_len);
    catch_unwind(AssertUnwindSafe(|| {
        dictionary.set_error_tolerance(u32::from(error_tolerance));
        dictionary.set_best_error_tolerance(u32::from(best_error_tolerance));
        let word = convert::utf16_units_to_string(units);
        match dictionary.suggest(&word) {
            Ok(suggestions) => {
                pack_suggestions(&suggestions, out);
                true
            }
            Err(_) => false,
        }
    }))
    .unwrap_or(false)
}

/// Pack suggestions into a UTF-16 buffer of at least two units:
/// NUL-terminated strings, then one final NUL. Entries that would not
/// leave room for both their NUL and the final one are skipped.
fn pack_suggestions(suggestions: &[String], buffer: &mut [u16]) {
    let mut pos = 0;
    for suggestion in suggestions {
        let units = convert::string_to_utf16_units(suggestion);
        if buffer.len() - pos - 1 < units.len() + 1 {
            continue;
        }
        buffer[pos..pos + units.len()].copy_from_slice(&units);
        pos += units.len();
        buffer[pos] = 0;
        pos += 1;
    }
    buffer[pos] = 0;
    if pos == 0 {
        buffer[1] = 0;
    }
}
