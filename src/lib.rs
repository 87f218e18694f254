/// Use mimalloc as the global allocator for the binary and its tests.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod bsort;
pub mod common;
