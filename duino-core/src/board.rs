//! Board context
//!
//! [`Board`] owns the register file, the delay, the pin state store and the
//! three role bindings. Every pin operation goes through it; there is no
//! process-wide state. Operations run in the order issued and apply
//! immediately.
//!
//! # Usage
//!
//! ```ignore
//! let mut board = Board::new(regs, delay, HardwareConfig::default());
//! board.bind_drive(DriveTarget::pair(pin3, pin9));
//! board.set_power(0.5)?;
//! board.turn_on()?;
//! board.on_for(1.0)?;
//! board.stop_all();
//! ```

use duino_hal::{DelayNs, RegisterFile};

use crate::config::{initialize_hardware, HardwareConfig};
use crate::error::{PinError, Role};
use crate::output::{drive, OutputMode};
use crate::pin::Pin;
use crate::read::{read_pin, Reading};
use crate::state::PinStateStore;
use crate::timing;
use crate::value::Value;

/// Power and direction pins of a drive binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveTarget {
    pub power: Pin,
    pub direction: Pin,
}

impl DriveTarget {
    /// One pin serving as both power and direction pin
    pub const fn single(pin: Pin) -> Self {
        Self {
            power: pin,
            direction: pin,
        }
    }

    /// Separate power and direction pins
    pub const fn pair(power: Pin, direction: Pin) -> Self {
        Self { power, direction }
    }

    /// Resolve a drive binding from a number or a `[power, dir]` list
    ///
    /// Both pins are validated before anything is returned.
    pub fn from_value(value: &Value<'_>) -> Result<Self, PinError> {
        match value {
            Value::Number(_) => Ok(Self::single(pin_from_value(value)?)),
            Value::List(items) => {
                let power = Value::list_get(items, 0)?;
                let direction = Value::list_get(items, 1)?;
                Ok(Self::pair(pin_from_value(power)?, pin_from_value(direction)?))
            }
            _ => Err(PinError::NotAPin),
        }
    }
}

/// Resolve a single pin from a numeric value
pub fn pin_from_value(value: &Value<'_>) -> Result<Pin, PinError> {
    let offset = value.as_offset().ok_or(PinError::NotAPin)?;
    Pin::from_offset(offset)
}

/// Pin layer context
pub struct Board<R, D> {
    regs: R,
    delay: D,
    config: HardwareConfig,
    state: PinStateStore,
    power_pin: Option<Pin>,
    dir_pin: Option<Pin>,
    input_pin: Option<Pin>,
}

impl<R: RegisterFile, D: DelayNs> Board<R, D> {
    /// Create a board, configuring the ADC and timers
    pub fn new(mut regs: R, delay: D, config: HardwareConfig) -> Self {
        initialize_hardware(&mut regs, &config);
        Self {
            regs,
            delay,
            config,
            state: PinStateStore::new(config.idle_power),
            power_pin: None,
            dir_pin: None,
            input_pin: None,
        }
    }

    /// Bind the power and direction pins, configuring both as outputs
    ///
    /// Both pins are driven low. The previous binding is replaced.
    pub fn bind_drive(&mut self, target: DriveTarget) -> DriveTarget {
        self.make_output(target.power);
        self.make_output(target.direction);
        self.power_pin = Some(target.power);
        self.dir_pin = Some(target.direction);
        debug!("drive power {} dir {}", target.power.id(), target.direction.id());
        target
    }

    /// Bind the input pin, configuring it as an input with pull-up
    pub fn bind_input(&mut self, pin: Pin) -> Pin {
        let port = pin.registers();
        self.regs.clear_bits(port.direction, pin.mask());
        self.regs.set_bits(port.output, pin.mask());
        self.input_pin = Some(pin);
        debug!("input {}", pin.id());
        pin
    }

    /// Set the power pin's level as a fraction of full power
    ///
    /// Scaling follows [`HardwareConfig::power_scaling`].
    pub fn set_power(&mut self, fraction: f32) -> Result<OutputMode, PinError> {
        let pin = self.role(Role::Power)?;
        let level = self.config.power_scaling.level(fraction);
        self.state.set_power(pin, level);
        Ok(self.drive(pin))
    }

    /// Switch the direction pin on
    pub fn set_left(&mut self) -> Result<OutputMode, PinError> {
        let pin = self.role(Role::Direction)?;
        self.state.set_on(pin);
        Ok(self.drive(pin))
    }

    /// Switch the direction pin off
    pub fn set_right(&mut self) -> Result<OutputMode, PinError> {
        let pin = self.role(Role::Direction)?;
        self.state.set_off(pin);
        Ok(self.drive(pin))
    }

    /// Switch the power pin on at its commanded power
    pub fn turn_on(&mut self) -> Result<OutputMode, PinError> {
        let pin = self.role(Role::Power)?;
        self.state.set_on(pin);
        Ok(self.drive(pin))
    }

    /// Switch the power pin off
    pub fn turn_off(&mut self) -> Result<OutputMode, PinError> {
        let pin = self.role(Role::Power)?;
        self.state.set_off(pin);
        Ok(self.drive(pin))
    }

    /// Switch the power pin on for `seconds`, then off again
    ///
    /// Returns the requested duration.
    pub fn on_for(&mut self, seconds: f32) -> Result<f32, PinError> {
        self.turn_on()?;
        self.sleep(seconds);
        self.turn_off()?;
        Ok(seconds)
    }

    /// Switch off every pin that is on, in ascending pin order
    ///
    /// Returns the number of pins switched off.
    pub fn stop_all(&mut self) -> u32 {
        let on = self.state.on_mask();
        for pin in on.iter() {
            self.state.set_off(pin);
            self.drive(pin);
        }
        debug!("stopped {} pins", on.len());
        on.len()
    }

    /// Sample the input pin
    pub fn read(&mut self) -> Result<Reading, PinError> {
        let pin = self.role(Role::Input)?;
        Ok(read_pin(&mut self.regs, pin, self.config.analog_reference))
    }

    /// Busy-wait for `seconds`, returning the number of 10 ms ticks waited
    pub fn sleep(&mut self, seconds: f32) -> u32 {
        timing::sleep(&mut self.delay, seconds)
    }

    /// Currently bound pin for a role
    pub fn bound(&self, role: Role) -> Option<Pin> {
        match role {
            Role::Power => self.power_pin,
            Role::Direction => self.dir_pin,
            Role::Input => self.input_pin,
        }
    }

    /// Pin state store
    pub fn state(&self) -> &PinStateStore {
        &self.state
    }

    /// Hardware configuration in use
    pub fn config(&self) -> &HardwareConfig {
        &self.config
    }

    /// Register file
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Register file, mutably
    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Delay provider
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Tear the board apart into its register file and delay
    pub fn release(self) -> (R, D) {
        (self.regs, self.delay)
    }

    fn role(&self, role: Role) -> Result<Pin, PinError> {
        self.bound(role).ok_or(PinError::Unbound(role))
    }

    fn make_output(&mut self, pin: Pin) {
        let port = pin.registers();
        self.regs.set_bits(port.direction, pin.mask());
        self.regs.clear_bits(port.output, pin.mask());
    }

    fn drive(&mut self, pin: Pin) -> OutputMode {
        drive(&mut self.regs, &self.state, pin)
    }
}
