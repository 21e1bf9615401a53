//! Timers: a scheduler seam over `gloo-timers`, the trailing throttle and
//! the cue timeline used by the intro sequences.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

pub trait Scheduler: Clone + 'static {
    /// Dropping the handle cancels the task if it has not run yet.
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;

    /// Lets a scheduled task run without anyone owning its handle.
    fn detach(&self, handle: Self::Handle);

    fn run_later<F: FnOnce() + 'static>(&self, delay_ms: u32, task: F) {
        let handle = self.schedule(delay_ms, Box::new(task));
        self.detach(handle);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }

    fn detach(&self, handle: Timeout) {
        let _ = handle.forget();
    }
}

/// Collapses a burst of calls into one trailing invocation with the last
/// call's argument. Every call re-arms the timer.
pub struct Throttle<S: Scheduler, A> {
    inner: Rc<ThrottleInner<S, A>>,
}

struct ThrottleInner<S: Scheduler, A> {
    scheduler: S,
    wait_ms: u32,
    callback: Rc<dyn Fn(A)>,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler, A: 'static> Throttle<S, A> {
    pub fn new<F>(scheduler: S, wait_ms: u32, callback: F) -> Self
    where
        F: Fn(A) + 'static,
    {
        Self {
            inner: Rc::new(ThrottleInner {
                scheduler,
                wait_ms,
                callback: Rc::new(callback),
                pending: RefCell::new(None),
            }),
        }
    }

    pub fn call(&self, args: A) {
        let callback = self.inner.callback.clone();
        let handle = self
            .inner
            .scheduler
            .schedule(self.inner.wait_ms, Box::new(move || callback(args)));
        // Replacing the handle drops, and so cancels, the previous timer.
        let previous = self.inner.pending.borrow_mut().replace(handle);
        drop(previous);
    }
}

impl<S: Scheduler, A> Clone for Throttle<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// One step of a timeline, due `at_ms` after the timeline starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cue<T> {
    pub at_ms: u32,
    pub step: T,
}

impl<T> Cue<T> {
    pub const fn new(at_ms: u32, step: T) -> Self {
        Self { at_ms, step }
    }
}

/// Plays `cues` in time order through a single chain of timers. Cues that
/// share a timestamp run in the same tick, in list order.
pub fn run_timeline<S, T, F>(scheduler: &S, cues: &[Cue<T>], apply: F)
where
    S: Scheduler,
    T: Clone + 'static,
    F: Fn(&T) + 'static,
{
    let mut cues = cues.to_vec();
    cues.sort_by_key(|cue| cue.at_ms);
    advance(scheduler.clone(), Rc::new(cues), 0, 0, Rc::new(apply));
}

fn advance<S, T, F>(scheduler: S, cues: Rc<Vec<Cue<T>>>, next: usize, elapsed_ms: u32, apply: Rc<F>)
where
    S: Scheduler,
    T: 'static,
    F: Fn(&T) + 'static,
{
    let Some(cue) = cues.get(next) else {
        return;
    };
    let due = cue.at_ms;
    let chain = scheduler.clone();
    scheduler.run_later(due - elapsed_ms, move || {
        let mut index = next;
        while let Some(cue) = cues.get(index).filter(|cue| cue.at_ms == due) {
            apply(&cue.step);
            index += 1;
        }
        advance(chain, cues, index, due, apply);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualScheduler;
    use std::cell::RefCell;

    #[test]
    fn burst_within_window_runs_once_with_last_argument() {
        let clock = ManualScheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let throttle = Throttle::new(clock.clone(), 16, move |value: u32| sink.borrow_mut().push(value));

        for value in 1..=5 {
            throttle.call(value);
            clock.advance(5);
        }
        assert!(seen.borrow().is_empty());

        clock.advance(16);
        assert_eq!(*seen.borrow(), vec![5]);
    }

    #[test]
    fn each_call_rearms_the_window() {
        let clock = ManualScheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let throttle = Throttle::new(clock.clone(), 100, move |value: char| sink.borrow_mut().push(value));

        throttle.call('a');
        clock.advance(90);
        throttle.call('b');
        clock.advance(90);
        assert!(seen.borrow().is_empty());

        clock.advance(10);
        assert_eq!(*seen.borrow(), vec!['b']);
    }

    #[test]
    fn separated_bursts_each_fire() {
        let clock = ManualScheduler::new();
        let count = Rc::new(RefCell::new(0));
        let counter = count.clone();
        let throttle = Throttle::new(clock.clone(), 16, move |_: ()| *counter.borrow_mut() += 1);

        throttle.call(());
        clock.advance(20);
        throttle.call(());
        throttle.call(());
        clock.advance(20);

        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn timeline_fires_in_time_order_with_shared_ticks() {
        let clock = ManualScheduler::new();
        let fired = Rc::new(RefCell::new(Vec::new()));
        let sink = fired.clone();
        let log_time = clock.clone();
        let cues = [
            Cue::new(300, 'c'),
            Cue::new(100, 'a'),
            Cue::new(300, 'd'),
            Cue::new(200, 'b'),
        ];

        run_timeline(&clock, &cues, move |step: &char| {
            sink.borrow_mut().push((log_time.now(), *step));
        });
        clock.advance(1000);

        assert_eq!(
            *fired.borrow(),
            vec![(100, 'a'), (200, 'b'), (300, 'c'), (300, 'd')]
        );
    }

    #[test]
    fn timeline_waits_for_each_cue() {
        let clock = ManualScheduler::new();
        let fired = Rc::new(RefCell::new(Vec::new()));
        let sink = fired.clone();

        run_timeline(&clock, &[Cue::new(0, 1), Cue::new(50, 2)], move |step: &i32| {
            sink.borrow_mut().push(*step)
        });

        clock.advance(0);
        assert_eq!(*fired.borrow(), vec![1]);
        clock.advance(49);
        assert_eq!(*fired.borrow(), vec![1]);
        clock.advance(1);
        assert_eq!(*fired.borrow(), vec![1, 2]);
    }
}
