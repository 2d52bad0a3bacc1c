use std::collections::VecDeque;

/// Event delivered to the loop driver.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopEvent<E> {
    /// Stop after the current iteration.
    Quit,
    /// Passed to the driver's event handler.
    Forward(E),
}

/// Pull-based event source.
pub trait EventSource<E> {
    /// Next pending event, or `None` when the source is drained for now.
    fn poll_event(&mut self) -> Option<LoopEvent<E>>;
}

/// FIFO event buffer.
///
/// The window runtime pushes translated platform events here; the driver pulls a
/// bounded batch per iteration and leaves the rest queued.
#[derive(Debug)]
pub struct EventQueue<E> {
    pending: VecDeque<LoopEvent<E>>,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: LoopEvent<E>) {
        self.pending.push_back(event);
    }

    pub fn push_forward(&mut self, event: E) {
        self.push(LoopEvent::Forward(event));
    }

    pub fn push_quit(&mut self) {
        self.push(LoopEvent::Quit);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E> EventSource<E> for EventQueue<E> {
    fn poll_event(&mut self) -> Option<LoopEvent<E>> {
        self.pending.pop_front()
    }
}

impl<E> Extend<LoopEvent<E>> for EventQueue<E> {
    fn extend<I: IntoIterator<Item = LoopEvent<E>>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}
