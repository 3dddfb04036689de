//! prelude exports common things for the 6502 such as the cpu, chip and memory modules.

/// prelude exports common items for the 6502.
pub mod prelude {
    pub use chip::*;
    pub use cpu::*;
    pub use memory::*;
}
