//! C FFI bindings for tsv-core
//!
//! Usage from C:
//! 1. Load the text yourself and call `tsv_parse`
//! 2. Call `tsv_get_cell` / `tsv_find_column` as needed
//! 3. Release the table with `tsv_free`
//!
//! Strings returned by this library are owned by the caller and must be
//! released with `tsv_free_string`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use tracing::warn;

/// Opaque handle to a parsed table
pub struct TsvTable {
    inner: tsv_core::Table,
}

/// Parse a NUL-terminated TSV string
///
/// # Safety
/// - `source` must be a valid C string or null
/// - Returns null for null, empty, or non-UTF-8 input
#[no_mangle]
pub unsafe extern "C" fn tsv_parse(source: *const c_char) -> *mut TsvTable {
    if source.is_null() {
        return ptr::null_mut();
    }

    let text = match CStr::from_ptr(source).to_str() {
        Ok(s) => s,
        Err(e) => {
            warn!("rejecting non-UTF-8 TSV input: {}", e);
            return ptr::null_mut();
        }
    };

    match tsv_core::parse(text) {
        Ok(table) => Box::into_raw(Box::new(TsvTable { inner: table })),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a table
///
/// # Safety
/// - `table` must be a valid pointer returned by `tsv_parse` or null
#[no_mangle]
pub unsafe extern "C" fn tsv_free(table: *mut TsvTable) {
    if !table.is_null() {
        drop(Box::from_raw(table));
    }
}

/// Get the number of rows
///
/// # Safety
/// - `table` must be a valid pointer returned by `tsv_parse` or null
#[no_mangle]
pub unsafe extern "C" fn tsv_row_count(table: *const TsvTable) -> usize {
    if table.is_null() {
        return 0;
    }
    (*table).inner.row_count()
}

/// Get the number of columns in row `y`, 0 if out of bounds
///
/// # Safety
/// - `table` must be a valid pointer returned by `tsv_parse` or null
#[no_mangle]
pub unsafe extern "C" fn tsv_column_count(table: *const TsvTable, y: usize) -> usize {
    if table.is_null() {
        return 0;
    }
    (*table).inner.column_count(y).unwrap_or(0)
}

/// Get the cell at column `x`, row `y`
///
/// # Safety
/// - `table` must be a valid pointer returned by `tsv_parse` or null
/// - Returns null if `x` or `y` is out of bounds
/// - Caller must free the returned string with `tsv_free_string`
#[no_mangle]
pub unsafe extern "C" fn tsv_get_cell(table: *const TsvTable, x: usize, y: usize) -> *mut c_char {
    if table.is_null() {
        return ptr::null_mut();
    }

    (*table)
        .inner
        .get_cell(x, y)
        .and_then(|cell| CString::new(cell).ok())
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Find the first column in row `y` exactly matching `name`
///
/// Writes the index to `x_out` and returns true on a match. Returns false
/// if `y` is out of bounds or no column matches; `x_out` is left untouched.
///
/// # Safety
/// - `table` must be a valid pointer returned by `tsv_parse` or null
/// - `name` must be a valid C string or null
/// - `x_out` must be a valid, writable pointer or null
#[no_mangle]
pub unsafe extern "C" fn tsv_find_column(
    table: *const TsvTable,
    y: usize,
    name: *const c_char,
    x_out: *mut usize,
) -> bool {
    if table.is_null() || name.is_null() || x_out.is_null() {
        return false;
    }

    let name = match CStr::from_ptr(name).to_str() {
        Ok(s) => s,
        Err(_) => return false,
    };

    match (*table).inner.find_column(y, name) {
        Some(x) => {
            *x_out = x;
            true
        }
        None => false,
    }
}

/// Render the table as `| a | b |` lines
///
/// # Safety
/// - `table` must be a valid pointer returned by `tsv_parse` or null
/// - Caller must free the returned string with `tsv_free_string`
#[no_mangle]
pub unsafe extern "C" fn tsv_dump(table: *const TsvTable) -> *mut c_char {
    if table.is_null() {
        return ptr::null_mut();
    }

    CString::new((*table).inner.dump())
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Free a string returned by other FFI functions
///
/// # Safety
/// - `s` must be a valid pointer returned by a tsv_* function or null
#[no_mangle]
pub unsafe extern "C" fn tsv_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn take_string(s: *mut c_char) -> Option<String> {
        if s.is_null() {
            return None;
        }
        let owned = CStr::from_ptr(s).to_string_lossy().into_owned();
        tsv_free_string(s);
        Some(owned)
    }

    #[test]
    fn test_parse_and_query() {
        let source = CString::new("name\tvalue\n\nx\ty\n").unwrap();

        unsafe {
            let table = tsv_parse(source.as_ptr());
            assert!(!table.is_null());

            assert_eq!(tsv_row_count(table), 2);
            assert_eq!(tsv_column_count(table, 1), 2);
            assert_eq!(tsv_column_count(table, 2), 0);

            assert_eq!(take_string(tsv_get_cell(table, 1, 1)).as_deref(), Some("y"));
            assert_eq!(take_string(tsv_get_cell(table, 2, 1)), None);

            let name = CString::new("value").unwrap();
            let mut x = usize::MAX;
            assert!(tsv_find_column(table, 0, name.as_ptr(), &mut x));
            assert_eq!(x, 1);

            let missing = CString::new("missing").unwrap();
            let mut x = 7;
            assert!(!tsv_find_column(table, 0, missing.as_ptr(), &mut x));
            assert!(!tsv_find_column(table, 9, name.as_ptr(), &mut x));
            assert_eq!(x, 7);

            tsv_free(table);
        }
    }

    #[test]
    fn test_parse_rejects_empty_and_null() {
        let empty = CString::new("").unwrap();

        unsafe {
            assert!(tsv_parse(empty.as_ptr()).is_null());
            assert!(tsv_parse(ptr::null()).is_null());
        }
    }

    #[test]
    fn test_parse_rejects_non_utf8() {
        let source = CString::new(vec![0xff, b'\t', b'a']).unwrap();

        unsafe {
            assert!(tsv_parse(source.as_ptr()).is_null());
        }
    }

    #[test]
    fn test_null_table_is_harmless() {
        unsafe {
            assert_eq!(tsv_row_count(ptr::null()), 0);
            assert_eq!(tsv_column_count(ptr::null(), 0), 0);
            assert!(tsv_get_cell(ptr::null(), 0, 0).is_null());
            assert!(tsv_dump(ptr::null()).is_null());
            tsv_free(ptr::null_mut());
            tsv_free_string(ptr::null_mut());
        }
    }

    #[test]
    fn test_dump() {
        let source = CString::new("a\tb\nc").unwrap();

        unsafe {
            let table = tsv_parse(source.as_ptr());
            assert_eq!(take_string(tsv_dump(table)).as_deref(), Some("| a | b |\n| c |\n"));
            tsv_free(table);
        }
    }
}
