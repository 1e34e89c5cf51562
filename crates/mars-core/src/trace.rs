//! Optional per-instruction trace sink.
//!
//! A [`Tracer`] is owned by one `Core` for the lifetime of one round and
//! appends to the file named by the `REDCODE_TRACE_FILE` environment
//! variable. Each executed instruction logs one line
//!
//! ```text
//! PC=<pc> <instr> | A=<addr> {<src>}, B=<addr> {<dst>}
//! ```
//!
//! followed by `-> WRITE @<addr> {<value>}` for every core cell mutation.
//! With the `trace` cargo feature disabled the tracer is a unit type and
//! every call compiles to nothing.

#[cfg(feature = "trace")]
pub use enabled::Tracer;
#[cfg(not(feature = "trace"))]
pub use stub::Tracer;

/// Environment variable naming the trace output file.
pub const TRACE_FILE_ENV: &str = "REDCODE_TRACE_FILE";

#[cfg(feature = "trace")]
mod enabled {
    use std::fs::OpenOptions;
    use std::io::{BufWriter, Write};
    use std::path::Path;

    use crate::instruction::Instruction;

    /// File-backed trace writer; inert unless a trace file is configured.
    #[derive(Debug, Default)]
    pub struct Tracer {
        out: Option<BufWriter<std::fs::File>>,
    }

    impl Tracer {
        /// Opens the file named by `REDCODE_TRACE_FILE`, append-only.
        /// Unset variable or an unopenable path leaves the tracer disabled.
        #[must_use]
        pub fn from_env() -> Self {
            match std::env::var_os(super::TRACE_FILE_ENV) {
                Some(path) if !path.is_empty() => Self::to_path(path),
                _ => Self::default(),
            }
        }

        /// Opens a trace writer on an explicit path.
        #[must_use]
        pub fn to_path(path: impl AsRef<Path>) -> Self {
            let out = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map(BufWriter::new)
                .ok();
            Self { out }
        }

        /// Whether any trace output will be produced.
        #[must_use]
        pub fn is_enabled(&self) -> bool {
            self.out.is_some()
        }

        /// Logs one executed instruction with its resolved operands.
        pub fn instruction(
            &mut self,
            pc: i32,
            instr: &Instruction,
            a_addr: i32,
            src: &Instruction,
            b_addr: i32,
            dst: &Instruction,
        ) {
            if let Some(out) = self.out.as_mut() {
                let _ = writeln!(
                    out,
                    "PC={pc} {instr} | A={a_addr} {{{src}}}, B={b_addr} {{{dst}}}"
                );
            }
        }

        /// Logs a core cell mutation with the cell's new contents.
        pub fn write(&mut self, addr: i32, cell: &Instruction) {
            if let Some(out) = self.out.as_mut() {
                let _ = writeln!(out, "-> WRITE @{addr} {{{cell}}}");
            }
        }
    }
}

#[cfg(not(feature = "trace"))]
mod stub {
    use crate::instruction::Instruction;

    /// Zero-cost stand-in compiled when the `trace` feature is disabled.
    #[derive(Debug, Default)]
    pub struct Tracer;

    impl Tracer {
        /// Always disabled.
        #[inline]
        #[must_use]
        pub fn from_env() -> Self {
            Self
        }

        /// Always disabled.
        #[inline]
        #[must_use]
        pub fn is_enabled(&self) -> bool {
            false
        }

        /// No-op.
        #[inline]
        pub fn instruction(
            &mut self,
            _pc: i32,
            _instr: &Instruction,
            _a_addr: i32,
            _src: &Instruction,
            _b_addr: i32,
            _dst: &Instruction,
        ) {
        }

        /// No-op.
        #[inline]
        pub fn write(&mut self, _addr: i32, _cell: &Instruction) {}
    }
}
