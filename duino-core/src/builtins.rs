//! Builtin dispatch
//!
//! The interpreter looks builtins up by name and calls them with already
//! evaluated arguments. Failures are reported through the
//! [`ErrorReporter`] and turn into [`Value::Null`]; the reporter's abort
//! flag tells the interpreter to unwind.
//!
//! | Name         | Args | Returns                               |
//! |--------------|------|---------------------------------------|
//! | `talkto`     | 1    | the argument                          |
//! | `listento`   | 1    | the argument                          |
//! | `setpower`   | 1    | `0`                                   |
//! | `setleft`    | 0    | `0`                                   |
//! | `setright`   | 0    | `0`                                   |
//! | `on`         | 0    | `0`                                   |
//! | `off`        | 0    | `0`                                   |
//! | `onfor`      | 1    | the argument                          |
//! | `read`       | 0    | number in [0, 1] or bool              |
//! | `stopall`    | 0    | `0`                                   |
//! | `time.sleep` | 1    | `1`                                   |

use duino_hal::{DelayNs, RegisterFile};

use crate::board::{pin_from_value, Board, DriveTarget};
use crate::error::{Abort, ErrorReporter, PinError};
use crate::read::Reading;
use crate::value::Value;

/// A pin-layer builtin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Builtin {
    TalkTo,
    ListenTo,
    SetPower,
    SetLeft,
    SetRight,
    On,
    Off,
    OnFor,
    Read,
    StopAll,
    Sleep,
}

impl Builtin {
    /// Every builtin
    pub const ALL: [Builtin; 11] = [
        Builtin::TalkTo,
        Builtin::ListenTo,
        Builtin::SetPower,
        Builtin::SetLeft,
        Builtin::SetRight,
        Builtin::On,
        Builtin::Off,
        Builtin::OnFor,
        Builtin::Read,
        Builtin::StopAll,
        Builtin::Sleep,
    ];

    /// Name the interpreter knows the builtin by
    pub const fn name(self) -> &'static str {
        match self {
            Builtin::TalkTo => "talkto",
            Builtin::ListenTo => "listento",
            Builtin::SetPower => "setpower",
            Builtin::SetLeft => "setleft",
            Builtin::SetRight => "setright",
            Builtin::On => "on",
            Builtin::Off => "off",
            Builtin::OnFor => "onfor",
            Builtin::Read => "read",
            Builtin::StopAll => "stopall",
            Builtin::Sleep => "time.sleep",
        }
    }

    /// Look a builtin up by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }

    /// Number of arguments the builtin takes
    pub const fn arity(self) -> usize {
        match self {
            Builtin::TalkTo
            | Builtin::ListenTo
            | Builtin::SetPower
            | Builtin::OnFor
            | Builtin::Sleep => 1,
            Builtin::SetLeft
            | Builtin::SetRight
            | Builtin::On
            | Builtin::Off
            | Builtin::Read
            | Builtin::StopAll => 0,
        }
    }

    /// Run the builtin
    pub fn call<'a, R, D, E>(
        self,
        board: &mut Board<R, D>,
        reporter: &mut E,
        args: &[Value<'a>],
    ) -> Value<'a>
    where
        R: RegisterFile,
        D: DelayNs,
        E: ErrorReporter,
    {
        if args.len() != self.arity() {
            let _ = reporter.report_error(format_args!(
                "{}: wrong number of args: wanted {}, got {}",
                self.name(),
                self.arity(),
                args.len()
            ));
            return Value::Null;
        }

        let result = match self {
            Builtin::TalkTo => DriveTarget::from_value(&args[0]).map(|target| {
                board.bind_drive(target);
                args[0]
            }),
            Builtin::ListenTo => pin_from_value(&args[0]).map(|pin| {
                board.bind_input(pin);
                args[0]
            }),
            Builtin::SetPower => match number(reporter, &args[0]) {
                Some(fraction) => board.set_power(fraction).map(|_| Value::ZERO),
                None => return Value::Null,
            },
            Builtin::SetLeft => board.set_left().map(|_| Value::ZERO),
            Builtin::SetRight => board.set_right().map(|_| Value::ZERO),
            Builtin::On => board.turn_on().map(|_| Value::ZERO),
            Builtin::Off => board.turn_off().map(|_| Value::ZERO),
            Builtin::OnFor => match number(reporter, &args[0]) {
                Some(seconds) => board.on_for(seconds).map(|_| args[0]),
                None => return Value::Null,
            },
            Builtin::Read => board.read().map(|reading| match reading {
                Reading::Analog(v) => Value::Number(v),
                Reading::Digital(level) => Value::Bool(level),
            }),
            Builtin::StopAll => {
                board.stop_all();
                Ok(Value::ZERO)
            }
            Builtin::Sleep => match number(reporter, &args[0]) {
                Some(seconds) => {
                    board.sleep(seconds);
                    Ok(Value::ONE)
                }
                None => return Value::Null,
            },
        };

        match result {
            Ok(value) => value,
            Err(err) => {
                warn!("{} failed: {}", self.name(), err);
                let arg = args.first().copied().unwrap_or(Value::Null);
                let _ = report(reporter, err, &arg);
                Value::Null
            }
        }
    }
}

/// Numeric argument, reporting anything else
fn number<E: ErrorReporter>(reporter: &mut E, value: &Value<'_>) -> Option<f32> {
    let n = value.as_number();
    if n.is_none() {
        let _ = reporter.report_error(format_args!("not a number: {}", value));
    }
    n
}

fn report<E: ErrorReporter>(reporter: &mut E, err: PinError, arg: &Value<'_>) -> Abort {
    match err {
        PinError::IndexOutOfRange(offset) => reporter.report_range_error(offset),
        PinError::OutOfRange(_) | PinError::NotAPin => {
            reporter.report_error(format_args!("invalid pin {}", arg))
        }
        PinError::Unbound(_) => reporter.report_error(format_args!("{}", err)),
    }
}
