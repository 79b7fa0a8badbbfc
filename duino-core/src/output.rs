//! Output driver
//!
//! Pushes a pin's effective level out to the hardware. Only levels strictly
//! between 0 and 255 use the timer; 0 and 255 are plain digital low/high
//! with the compare unit disconnected.

use duino_hal::RegisterFile;

use crate::pin::Pin;
use crate::pwm::pwm_binding;
use crate::state::PinStateStore;

/// How a pin ended up being driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputMode {
    /// Timer compare output with this duty
    Pwm(u8),
    /// Plain port output at this level
    Digital(bool),
}

/// Drive `pin` from its state
pub fn drive<R: RegisterFile>(regs: &mut R, state: &PinStateStore, pin: Pin) -> OutputMode {
    let level = state.effective_level(pin);

    if let Some(pwm) = pwm_binding(pin) {
        if level > 0 && level < 255 {
            regs.write(pwm.duty, level);
            regs.set_bits(pwm.control, pwm.enable);
            trace!("pin {} pwm duty {}", pin.id(), level);
            return OutputMode::Pwm(level);
        }
        // Disconnect the compare unit before PORTx takes over
        regs.clear_bits(pwm.control, pwm.enable);
    }

    let high = level != 0;
    let port = pin.registers().output;
    if high {
        regs.set_bits(port, pin.mask());
    } else {
        regs.clear_bits(port, pin.mask());
    }
    trace!("pin {} digital {}", pin.id(), high);
    OutputMode::Digital(high)
}
