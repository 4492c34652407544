//! Mock HAL peripherals sharing one ordered event log

use core::cell::{Cell, RefCell};
use core::time::Duration;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use sunrise_hal::{OutputPin, UartTx};

use crate::transport::{Rs485Transport, TransportConfig};

/// Hardware interaction observed by the mocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Direction(bool),
    Delay(Duration),
    Write(Vec<u8>),
    Flush,
}

pub type Log = Rc<RefCell<Vec<Event>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    Fault,
}

pub struct MockUart {
    log: Log,
    pub fail_write: bool,
    pub fail_flush: bool,
    /// Number of `is_busy` polls that report busy
    pub busy_polls: Cell<u32>,
}

impl UartTx for MockUart {
    type Error = MockError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Write(data.to_vec()));
        if self.fail_write {
            Err(MockError::Fault)
        } else {
            Ok(())
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Flush);
        if self.fail_flush {
            Err(MockError::Fault)
        } else {
            Ok(())
        }
    }

    fn is_busy(&self) -> bool {
        let remaining = self.busy_polls.get();
        if remaining > 0 {
            self.busy_polls.set(remaining - 1);
            true
        } else {
            false
        }
    }
}

pub struct MockPin {
    log: Log,
    high: bool,
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
        self.log.borrow_mut().push(Event::Direction(true));
    }

    fn set_low(&mut self) {
        self.high = false;
        self.log.borrow_mut().push(Event::Direction(false));
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    fn record(&mut self, duration: Duration) {
        self.log.borrow_mut().push(Event::Delay(duration));
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.record(Duration::from_nanos(ns as u64));
    }

    fn delay_us(&mut self, us: u32) {
        self.record(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(Duration::from_millis(ms as u64));
    }
}

pub type MockTransport = Rs485Transport<MockUart, MockPin, MockDelay>;

/// Build a transport over mocks and clear the construction events
pub fn transport(config: TransportConfig) -> (MockTransport, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let uart = MockUart {
        log: log.clone(),
        fail_write: false,
        fail_flush: false,
        busy_polls: Cell::new(0),
    };
    let pin = MockPin {
        log: log.clone(),
        high: false,
    };
    let delay = MockDelay { log: log.clone() };

    let transport = Rs485Transport::new(uart, pin, delay, config);
    log.borrow_mut().clear();
    (transport, log)
}

/// The six events of one successful packet transmission
pub fn session(bytes: &[u8]) -> [Event; 6] {
    [
        Event::Direction(true),
        Event::Delay(Duration::from_millis(10)),
        Event::Write(bytes.to_vec()),
        Event::Flush,
        Event::Delay(Duration::from_millis(10)),
        Event::Direction(false),
    ]
}

pub fn take(log: &Log) -> Vec<Event> {
    core::mem::take(&mut *log.borrow_mut())
}
