use thiserror::Error;

/// Name of the single module a frozen image carries
const FROZEN_MODULE_NAME: &[u8] = b"main.mpy\0";

/// Version tag at the start of a frozen image
const FROZEN_IMAGE_VERSION: u32 = 5;

/// Zero padding following the version tag
const FROZEN_HEADER_PADDING: usize = 60;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("compiler produced no output")]
    NoOutput,
    #[error("compiler output is too short for its size prefix")]
    MissingPrefix,
    #[error("compiler output declares {declared} byte(s) but carries {available}")]
    Truncated { declared: usize, available: usize },
    #[error("compiler output declares a negative size {0}")]
    NegativeSize(i32),
    #[error("bytecode is empty")]
    EmptyBytecode,
}

/// A script compiler exposing its result as a raw memory region.
///
/// On success the region is `[len: i32 LE][len bytes of bytecode]`; `None` stands for the null
/// pointer a failed compilation returns.
pub trait ScriptCompiler {
    fn compile_raw(&self, src: &str) -> Option<Vec<u8>>;
}

impl<F> ScriptCompiler for F
where
    F: Fn(&str) -> Option<Vec<u8>>,
{
    fn compile_raw(&self, src: &str) -> Option<Vec<u8>> {
        self(src)
    }
}

/// Compiles `src` and extracts the bytecode from the size-prefixed region
pub fn compile_bytecode<C: ScriptCompiler + ?Sized>(
    compiler: &C,
    src: &str,
) -> Result<Vec<u8>, CompileError> {
    let region = compiler.compile_raw(src).ok_or(CompileError::NoOutput)?;
    if region.len() < 4 {
        return Err(CompileError::MissingPrefix)
    }
    let declared = i32::from_le_bytes([region[0], region[1], region[2], region[3]]);
    let declared = usize::try_from(declared).map_err(|_| CompileError::NegativeSize(declared))?;
    let available = region.len() - 4;
    if declared > available {
        return Err(CompileError::Truncated { declared, available })
    }
    Ok(region[4..4 + declared].to_vec())
}

/// Compiles `src` to lowercase hex bytecode. Any failure yields the empty string.
pub fn compile_src<C: ScriptCompiler + ?Sized>(compiler: &C, src: &str) -> String {
    compile_bytecode(compiler, src).map(hex::encode).unwrap_or_default()
}

/// Wraps bytecode into a frozen single-module image:
/// `[version u32][60 zero bytes][region sizes][name][code sizes][code]`, all integers little
/// endian.
pub fn freeze_module(bytecode: &[u8]) -> Result<Vec<u8>, CompileError> {
    if bytecode.is_empty() {
        return Err(CompileError::EmptyBytecode)
    }
    let code_size_region = (bytecode.len() as u32).to_le_bytes();

    let mut image = Vec::with_capacity(
        4 + FROZEN_HEADER_PADDING + 12 + FROZEN_MODULE_NAME.len() + 4 + bytecode.len(),
    );
    image.extend_from_slice(&FROZEN_IMAGE_VERSION.to_le_bytes());
    image.extend_from_slice(&[0u8; FROZEN_HEADER_PADDING]);
    image.extend_from_slice(&(FROZEN_MODULE_NAME.len() as u32).to_le_bytes());
    image.extend_from_slice(&(code_size_region.len() as u32).to_le_bytes());
    image.extend_from_slice(&(bytecode.len() as u32).to_le_bytes());
    image.extend_from_slice(FROZEN_MODULE_NAME);
    image.extend_from_slice(&code_size_region);
    image.extend_from_slice(bytecode);
    Ok(image)
}

/// Compiles `src` and freezes the resulting bytecode
pub fn compile_frozen<C: ScriptCompiler + ?Sized>(
    compiler: &C,
    src: &str,
) -> Result<Vec<u8>, CompileError> {
    freeze_module(&compile_bytecode(compiler, src)?)
}
