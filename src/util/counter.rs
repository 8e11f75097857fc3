use std::cell::Cell;
use std::rc::Rc;

/// A shared counter for observing side effects from inside closures handed to a sequence, mostly
/// to check that nothing runs before a terminal operation asks for it.
#[derive(Debug, Default, Clone)]
pub struct CallCounter(Rc<Cell<usize>>);

#[allow(unused)]
impl CallCounter {
    pub fn new() -> CallCounter {
        CallCounter(Rc::new(Cell::new(0)))
    }

    pub fn tick(&self) {
        self.0.set(self.0.get() + 1);
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

/// A value that ticks a [`CallCounter`] when dropped, used to check when a stage releases its
/// upstream.
#[derive(Debug, Clone)]
pub struct CountedDrop(pub CallCounter);

#[allow(unused)]
impl CountedDrop {
    pub fn new(counter: &CallCounter) -> CountedDrop {
        CountedDrop(counter.clone())
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.tick();
    }
}
