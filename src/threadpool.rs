use crate::errors::{Error, Result};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

/// Fixed-size pool of worker threads, joining all of them on drop.
///
/// Follows the layout of the pool in the Rust book:
/// https://doc.rust-lang.org/book/ch20-02-multithreaded.html
pub struct ThreadPool {
    workers: Vec<Worker>,
    sender: Option<mpsc::Sender<Job>>,
}

/// Type of jobs to be executed by the threadpool.
type Job = Box<dyn FnOnce() + Send + 'static>;

impl ThreadPool {
    /// Create a new ThreadPool with `size` threads.
    ///
    /// 'size' must be greater than 0.
    pub fn new(size: usize) -> ThreadPool {
        assert!(size > 0, "ThreadPool size must be greater than 0");

        let (sender, receiver) = mpsc::channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size)
            .map(|id| Worker::new(id, Arc::clone(&receiver)))
            .collect();

        ThreadPool {
            workers,
            sender: Some(sender),
        }
    }

    /// Number of worker threads
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Queue a task to run on the threadpool when a worker is available.
    ///
    /// Fails only if every worker has died, which leaves nobody to run the job.
    pub fn execute<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or_else(|| {
            Error::Io(std::io::Error::other("threadpool is shutting down"))
        })?;
        sender
            .send(Box::new(f))
            .map_err(|_| Error::Io(std::io::Error::other("no worker left to run the job")))
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        drop(self.sender.take());
        for worker in &mut self.workers {
            if let Some(thread) = worker.handle.take() {
                if thread.join().is_err() {
                    tracing::warn!(worker = worker.id, "worker panicked");
                }
            }
        }
    }
}

/// Worker struct, holding a thread handle.
struct Worker {
    id: usize,
    handle: Option<thread::JoinHandle<()>>,
}

impl Worker {
    /// Spawn a worker executing jobs from the given receiver until the sending side is closed.
    fn new(id: usize, receiver: Arc<Mutex<mpsc::Receiver<Job>>>) -> Worker {
        let handle = thread::spawn(move || loop {
            // The guard is dropped at the end of the statement, so the job runs unlocked.
            let message = match receiver.lock() {
                Ok(receiver) => receiver.recv(),
                Err(_) => break,
            };
            match message {
                Ok(job) => job(),
                Err(_) => {
                    tracing::debug!(worker = id, "worker shutting down");
                    break;
                }
            }
        });
        Worker {
            id,
            handle: Some(handle),
        }
    }
}
