#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Once;

use log::LevelFilter;
use sentinel_list::List;
use simple_logger::SimpleLogger;

static LOGGER: Once = Once::new();

/// Installs the test logger once per binary. Quiet unless `RUST_LOG` asks
/// for more, e.g. `RUST_LOG=trace`.
pub fn init_logger() {
    LOGGER.call_once(|| {
        SimpleLogger::new()
            .with_level(LevelFilter::Warn)
            .env()
            .init()
            .unwrap();
    });
}

/// Elements walked from `begin` to `end` by following `next` links.
pub fn forward<T: Clone>(list: &List<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(list.len());
    let end = list.end();
    let mut cursor = list.begin();
    unsafe {
        while cursor != end {
            out.push(cursor.get().clone());
            cursor.move_next();
        }
    }
    out
}

/// Elements walked from the last one back to `begin` by following `prev`
/// links.
pub fn backward<T: Clone>(list: &List<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(list.len());
    let begin = list.begin();
    let mut cursor = list.end();
    unsafe {
        while cursor != begin {
            cursor.move_prev();
            out.push(cursor.get().clone());
        }
    }
    out
}

/// Asserts that both link directions agree with each other and with `len`.
pub fn assert_consistent<T: Clone + PartialEq + std::fmt::Debug>(list: &List<T>) {
    let fwd = forward(list);
    let mut bwd = backward(list);
    bwd.reverse();
    assert_eq!(fwd.len(), list.len());
    assert_eq!(fwd, bwd);
    assert_eq!(list.is_empty(), list.len() == 0);
}

/// Counts how many of its values are alive.
#[derive(Debug)]
pub struct Tracked {
    pub value: u32,
    live: Rc<Cell<usize>>,
}

#[derive(Clone, Default)]
pub struct Tracker {
    live: Rc<Cell<usize>>,
}

impl Tracker {
    pub fn make(&self, value: u32) -> Tracked {
        self.live.set(self.live.get() + 1);
        Tracked {
            value,
            live: Rc::clone(&self.live),
        }
    }

    pub fn live(&self) -> usize {
        self.live.get()
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.live.set(self.live.get() + 1);
        Tracked {
            value: self.value,
            live: Rc::clone(&self.live),
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}
