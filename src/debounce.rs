use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::sleep};

/// Collapses bursts of calls into one trailing call.
///
/// Each [`Debouncer::call`] replaces whatever call is still waiting, so the
/// callback only ever sees the last value of a burst. The pending call is
/// aborted when the debouncer is dropped.
pub struct Debouncer<T> {
    delay: Duration,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            callback: Arc::new(callback),
            pending: None,
        }
    }

    /// Must be called within a tokio runtime.
    pub fn call(&mut self, value: T) {
        self.cancel();

        let delay = self.delay;
        let callback = self.callback.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            callback(value);
        }));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Debouncer<T> {
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(vec![]));
        let calls_clone = calls.clone();
        (calls, move |v| calls_clone.lock().unwrap().push(v))
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_call_runs() {
        let (calls, callback) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(180), callback);

        debouncer.call(1);
        sleep(Duration::from_millis(100)).await;
        debouncer.call(2);
        sleep(Duration::from_millis(100)).await;
        debouncer.call(3);
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(200)).await;
        assert_eq!(*calls.lock().unwrap(), vec![3]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_apart_all_run() {
        let (calls, callback) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(180), callback);

        debouncer.call(1);
        sleep(Duration::from_millis(200)).await;
        debouncer.call(2);
        sleep(Duration::from_millis(200)).await;

        assert_eq!(*calls.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let (calls, callback) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(180), callback);

        debouncer.call(1);
        debouncer.cancel();
        sleep(Duration::from_millis(500)).await;

        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_call() {
        let (calls, callback) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(180), callback);

        debouncer.call(1);
        drop(debouncer);
        sleep(Duration::from_millis(500)).await;

        assert!(calls.lock().unwrap().is_empty());
    }
}
