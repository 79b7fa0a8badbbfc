//! End-to-end sessions driving the builtin surface against simulated hardware

use duino_core::sim::{CountingDelay, SimRegisters};
use duino_core::{AbortLatch, Board, Builtin, HardwareConfig, Pin, Role, Value};
use duino_hal::Reg;
use heapless::String;

struct Session {
    board: Board<SimRegisters, CountingDelay>,
    latch: AbortLatch<String<512>>,
}

impl Session {
    fn new() -> Self {
        Self {
            board: Board::new(SimRegisters::new(), CountingDelay::new(), HardwareConfig::default()),
            latch: AbortLatch::new(String::new()),
        }
    }

    fn call<'a>(&mut self, name: &str, args: &[Value<'a>]) -> Value<'a> {
        let builtin = Builtin::from_name(name).expect("unknown builtin");
        builtin.call(&mut self.board, &mut self.latch, args)
    }

    fn reg(&self, reg: Reg) -> u8 {
        self.board.registers().get(reg)
    }
}

fn pin(id: u8) -> Pin {
    Pin::new(id).unwrap()
}

#[test]
fn motor_on_pwm_pin_with_direction() {
    let mut s = Session::new();
    let pins = [Value::Number(3.0), Value::Number(9.0)];

    s.call("talkto", &[Value::List(&pins)]);
    s.call("setpower", &[Value::Number(0.5)]);
    s.call("on", &[]);

    assert_eq!(s.reg(Reg::Ddrd) & 0x08, 0x08);
    assert_eq!(s.reg(Reg::Ddrb) & 0x02, 0x02);
    assert_eq!(s.reg(Reg::Ocr2b), 128);
    assert_eq!(s.reg(Reg::Tccr2a) & 0x20, 0x20);

    s.call("setleft", &[]);
    assert_eq!(s.reg(Reg::Portb) & 0x02, 0x02);
    s.call("setright", &[]);
    assert_eq!(s.reg(Reg::Portb) & 0x02, 0);

    s.call("off", &[]);
    assert_eq!(s.reg(Reg::Tccr2a) & 0x20, 0);
    assert_eq!(s.reg(Reg::Portd) & 0x08, 0);
    assert!(!s.latch.is_aborted());
}

#[test]
fn full_power_switches_back_to_digital() {
    let mut s = Session::new();
    s.call("talkto", &[Value::Number(5.0)]);

    s.call("setpower", &[Value::Number(0.25)]);
    s.call("on", &[]);
    assert_eq!(s.reg(Reg::Ocr0b), 64);
    assert_eq!(s.reg(Reg::Tccr0a) & 0x20, 0x20);

    s.call("setpower", &[Value::Number(1.0)]);
    assert_eq!(s.reg(Reg::Tccr0a) & 0x20, 0);
    assert_eq!(s.reg(Reg::Portd) & 0x20, 0x20);
    // Waveform generation bits survive mode switches
    assert_eq!(s.reg(Reg::Tccr0a) & 0x03, 0x03);
}

#[test]
fn onfor_sleeps_between_on_and_off() {
    let mut s = Session::new();
    s.call("talkto", &[Value::Number(13.0)]);

    let result = s.call("onfor", &[Value::Number(0.2)]);

    assert_eq!(result, Value::Number(0.2));
    assert_eq!(s.board.delay().elapsed_ms(), 210);
    assert_eq!(s.reg(Reg::Portb) & 0x20, 0);
    assert!(s.board.state().on_mask().is_empty());
}

#[test]
fn stopall_turns_everything_off() {
    let mut s = Session::new();
    for id in [3.0, 6.0, 12.0] {
        s.call("talkto", &[Value::Number(id)]);
        s.call("setpower", &[Value::Number(0.4)]);
        s.call("on", &[]);
    }
    assert_eq!(s.board.state().on_mask().len(), 3);

    assert_eq!(s.call("stopall", &[]), Value::Number(0.0));
    assert!(s.board.state().on_mask().is_empty());
    assert_eq!(s.reg(Reg::Tccr2a) & 0x20, 0);
    assert_eq!(s.reg(Reg::Tccr0a) & 0x80, 0);
    assert_eq!(s.reg(Reg::Portb) & 0x10, 0);

    // Commanded power is kept for the next `on`
    assert_eq!(s.board.state().power(pin(6)), 102);
    assert_eq!(s.call("stopall", &[]), Value::Number(0.0));
}

#[test]
fn sensor_reads() {
    let mut s = Session::new();

    s.call("listento", &[Value::Number(17.0)]);
    s.board.registers_mut().set_analog(3, 341);
    match s.call("read", &[]) {
        Value::Number(v) => assert!((v - 341.0 / 1023.0).abs() < 1e-6),
        other => panic!("expected number, got {:?}", other),
    }

    s.call("listento", &[Value::Number(4.0)]);
    assert_eq!(s.reg(Reg::Portd) & 0x10, 0x10);
    assert_eq!(s.call("read", &[]), Value::Bool(false));
    s.board.registers_mut().set_input(pin(4), true);
    assert_eq!(s.call("read", &[]), Value::Bool(true));
}

#[test]
fn bad_pins_abort_without_changing_bindings() {
    let mut s = Session::new();
    s.call("talkto", &[Value::Number(5.0)]);
    s.latch.set_location("demo.py", 3);

    assert!(s.call("talkto", &[Value::Number(21.0)]).is_null());
    assert!(s.latch.take_abort());
    assert!(s.call("listento", &[Value::Number(-2.0)]).is_null());
    assert!(s.latch.take_abort());

    assert_eq!(s.board.bound(Role::Power), Some(pin(5)));
    assert_eq!(s.board.bound(Role::Input), None);
    assert_eq!(
        s.latch.output().as_str(),
        "demo.py:3 invalid pin 21\ndemo.py:3 invalid pin -2\n"
    );
}

#[test]
fn sleep_returns_one() {
    let mut s = Session::new();

    assert_eq!(s.call("time.sleep", &[Value::Number(0.0)]), Value::Number(1.0));
    assert_eq!(s.board.delay().elapsed_ms(), 10);
}
