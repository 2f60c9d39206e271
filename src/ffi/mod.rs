//! FFI module - Safe wrappers around Win32 handles

mod handles;

pub use handles::OwnedHandle;
