//! Pin errors and the error-reporting contract
//!
//! Pin operations return [`PinError`]. Turning an error into a diagnostic
//! and an abort of the current statement is the interpreter's business; it
//! does so through an [`ErrorReporter`].

use core::fmt::{self, Write};

/// Pin role a program binds before driving or reading hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Pin whose level is set by `setpower`/`on`/`off`
    Power,
    /// Pin toggled by `setleft`/`setright`
    Direction,
    /// Pin sampled by `read`
    Input,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Power => "power",
            Role::Direction => "direction",
            Role::Input => "input",
        })
    }
}

/// Errors raised by the pin layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin identifier outside `0..NUM_PIN`
    OutOfRange(i32),
    /// Argument is neither a pin number nor a pin pair
    NotAPin,
    /// Pin pair is missing the element at this index
    IndexOutOfRange(i32),
    /// Operation needs a role that has not been bound yet
    Unbound(Role),
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinError::OutOfRange(pin) => write!(f, "invalid pin {}", pin),
            PinError::NotAPin => f.write_str("invalid pin"),
            PinError::IndexOutOfRange(offset) => write!(f, "index out of range: {}", offset),
            PinError::Unbound(role) => write!(f, "no {} pin selected", role),
        }
    }
}

/// The null value handed back after an error has been reported
///
/// Holding one means the abort flag has been raised; the interpreter
/// unwinds the current statement.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Abort;

/// Error-reporting contract consumed by the pin layer
pub trait ErrorReporter {
    /// Raise the abort flag and emit a diagnostic
    fn report_error(&mut self, message: fmt::Arguments<'_>) -> Abort;

    /// Report an index that is out of range
    fn report_range_error(&mut self, offset: i32) -> Abort {
        self.report_error(format_args!("index out of range: {}", offset))
    }
}

impl<T: ErrorReporter + ?Sized> ErrorReporter for &mut T {
    fn report_error(&mut self, message: fmt::Arguments<'_>) -> Abort {
        (**self).report_error(message)
    }

    fn report_range_error(&mut self, offset: i32) -> Abort {
        (**self).report_range_error(offset)
    }
}

/// Standard reporter: latches an abort flag and writes diagnostics
///
/// Each diagnostic is one line, `<file>:<line> <message>`, prefixed with
/// the source location last set by the interpreter.
pub struct AbortLatch<W> {
    out: W,
    file: &'static str,
    line: u32,
    aborted: bool,
}

impl<W: Write> AbortLatch<W> {
    /// Create a reporter writing to `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            file: "<stdin>",
            line: 1,
            aborted: false,
        }
    }

    /// Set the source location used to prefix diagnostics
    pub fn set_location(&mut self, file: &'static str, line: u32) {
        self.file = file;
        self.line = line;
    }

    /// Check whether an error has been reported since the last `take_abort`
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Read and clear the abort flag
    pub fn take_abort(&mut self) -> bool {
        core::mem::replace(&mut self.aborted, false)
    }

    /// Access the diagnostic sink
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Consume the reporter, returning the diagnostic sink
    pub fn into_output(self) -> W {
        self.out
    }
}

impl<W: Write> ErrorReporter for AbortLatch<W> {
    fn report_error(&mut self, message: fmt::Arguments<'_>) -> Abort {
        self.aborted = true;
        // A full diagnostic sink truncates the message; the abort still stands
        let _ = writeln!(self.out, "{}:{} {}", self.file, self.line, message);
        Abort
    }
}

/// Display wrapper escaping control characters as `\xNN`
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            if (c as u32) < 0x20 {
                write!(f, "\\x{:02x}", c as u32)?;
            } else {
                f.write_char(c)?;
            }
        }
        Ok(())
    }
}
