//! Interpreter values seen by the pin layer
//!
//! Only the shapes a builtin can receive or return are modelled: numbers,
//! booleans, strings, lists and the null value. Lists borrow their elements
//! from the interpreter's heap.

use core::fmt;

use crate::error::{Escaped, PinError};

/// An interpreter value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// The null value returned after an error
    Null,
    Number(f32),
    Bool(bool),
    Str(&'a str),
    List(&'a [Value<'a>]),
}

impl<'a> Value<'a> {
    /// Numeric zero, returned by most output builtins
    pub const ZERO: Value<'static> = Value::Number(0.0);

    /// Numeric one
    pub const ONE: Value<'static> = Value::Number(1.0);

    /// Numeric content, if any
    pub fn as_number(&self) -> Option<f32> {
        match *self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Numeric content truncated to an integer offset
    ///
    /// NaN and infinities have no offset.
    pub fn as_offset(&self) -> Option<i32> {
        self.as_number().filter(|n| n.is_finite()).map(|n| n as i32)
    }

    /// Check whether this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Element `index` of a list
    ///
    /// Out-of-range indices are reported with the offending index.
    pub fn list_get(list: &'a [Value<'a>], index: usize) -> Result<&'a Value<'a>, PinError> {
        list.get(index)
            .ok_or(PinError::IndexOutOfRange(index as i32))
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("None"),
            Value::Number(n) => {
                let whole = *n as i32;
                if whole as f32 == *n {
                    write!(f, "{}", whole)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Str(s) => write!(f, "'{}'", Escaped(s)),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    fn render(value: &Value<'_>) -> String<64> {
        let mut s = String::new();
        write!(s, "{}", value).unwrap();
        s
    }

    #[test]
    fn test_render_numbers() {
        assert_eq!(render(&Value::Number(3.0)).as_str(), "3");
        assert_eq!(render(&Value::Number(-1.0)).as_str(), "-1");
        assert_eq!(render(&Value::Number(0.5)).as_str(), "0.5");
    }

    #[test]
    fn test_render_compound() {
        let items = [Value::Number(3.0), Value::Number(30.0)];
        assert_eq!(render(&Value::List(&items)).as_str(), "[3, 30]");
        assert_eq!(render(&Value::Str("pin\n")).as_str(), "'pin\\x0a'");
        assert_eq!(render(&Value::Bool(true)).as_str(), "True");
        assert_eq!(render(&Value::Null).as_str(), "None");
    }

    #[test]
    fn test_offsets_truncate() {
        assert_eq!(Value::Number(5.9).as_offset(), Some(5));
        assert_eq!(Value::Number(-0.5).as_offset(), Some(0));
        assert_eq!(Value::Str("5").as_offset(), None);
        assert_eq!(Value::Number(f32::NAN).as_offset(), None);
        assert_eq!(Value::Number(f32::INFINITY).as_offset(), None);
    }

    #[test]
    fn test_list_get() {
        let items = [Value::Number(3.0)];
        assert_eq!(Value::list_get(&items, 0), Ok(&Value::Number(3.0)));
        assert_eq!(Value::list_get(&items, 1), Err(PinError::IndexOutOfRange(1)));
    }
}
