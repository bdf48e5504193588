use std::ffi::{CStr, c_char, c_int, c_void};

use super::{LineResolver, SourceLocation};
use crate::errors::ResolveError;
use crate::walker::MethodHandle;

/// The runtime's location-translation entry point: takes a method pointer
/// and a dex pc, writes the source file name and line number through the
/// two out-pointers.
pub type TranslateLocationFn =
    unsafe extern "C" fn(*mut c_void, u32, *mut *const c_char, *mut c_int);

/// [`LineResolver`] over the runtime's native entry point.
///
/// The method-translation step is host-specific (it walks runtime data
/// structures the core knows nothing about), so it is injected as a
/// callback alongside the foreign function.
pub struct NativeLineResolver {
    translate_location: TranslateLocationFn,
    translate_method: Box<dyn Fn(MethodHandle) -> MethodHandle + Send + Sync>,
}

impl std::fmt::Debug for NativeLineResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NativeLineResolver(..)")
    }
}

impl NativeLineResolver {
    pub fn new<T>(translate_location: TranslateLocationFn, translate_method: T) -> Self
    where
        T: Fn(MethodHandle) -> MethodHandle + Send + Sync + 'static,
    {
        Self {
            translate_location,
            translate_method: Box::new(translate_method),
        }
    }
}

impl LineResolver for NativeLineResolver {
    fn translate_method(&self, method: MethodHandle) -> MethodHandle {
        (self.translate_method)(method)
    }

    fn resolve_line(
        &self,
        method: MethodHandle,
        dex_pc: u32,
    ) -> Result<SourceLocation, ResolveError> {
        if method.0 == 0 {
            return Err(ResolveError::new(method, dex_pc, "null method handle"));
        }

        // Fresh out-slots per call; a previous frame's pointers must never
        // be read back.
        let mut file_ptr: *const c_char = std::ptr::null();
        let mut line: c_int = 0;
        unsafe {
            (self.translate_location)(
                method.0 as usize as *mut c_void,
                dex_pc,
                &mut file_ptr,
                &mut line,
            );
        }

        let file = if file_ptr.is_null() {
            None
        } else {
            // The runtime hands back a pointer into its own storage; copy
            // it out before the next call can invalidate it.
            let name = unsafe { CStr::from_ptr(file_ptr) };
            Some(name.to_string_lossy().into_owned())
        };

        Ok(SourceLocation { file, line })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe extern "C" fn fake_translate(
        method: *mut c_void,
        dex_pc: u32,
        file_out: *mut *const c_char,
        line_out: *mut c_int,
    ) {
        unsafe {
            if method as usize == 7 {
                *file_out = c"Foo.java".as_ptr();
                *line_out = dex_pc as c_int + 1;
            } else {
                *file_out = std::ptr::null();
                *line_out = 0;
            }
        }
    }

    #[test]
    fn reads_both_out_slots() {
        let resolver = NativeLineResolver::new(fake_translate, |method| method);
        let loc = resolver.resolve_line(MethodHandle(7), 41).unwrap();
        assert_eq!(loc.file.as_deref(), Some("Foo.java"));
        assert_eq!(loc.line, 42);
    }

    #[test]
    fn null_file_pointer_maps_to_none() {
        let resolver = NativeLineResolver::new(fake_translate, |method| method);
        let loc = resolver.resolve_line(MethodHandle(9), 0).unwrap();
        assert_eq!(loc.file, None);
        assert_eq!(loc.line, 0);
    }

    #[test]
    fn null_method_handle_is_rejected() {
        let resolver = NativeLineResolver::new(fake_translate, |method| method);
        assert!(resolver.resolve_line(MethodHandle(0), 0).is_err());
    }

    #[test]
    fn translation_callback_is_injected() {
        let resolver =
            NativeLineResolver::new(fake_translate, |method| MethodHandle(method.0 + 1));
        assert_eq!(resolver.translate_method(MethodHandle(1)), MethodHandle(2));
    }
}
