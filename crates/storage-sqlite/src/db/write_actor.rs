//! Single-writer actor for SQLite.
//!
//! SQLite allows many readers but only one writer at a time. Funnelling every
//! write through one dedicated connection avoids `SQLITE_BUSY` contention
//! between pooled connections under concurrent ingestion.

use std::any::Any;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use coinfolio_core::errors::Result;

use super::DbPool;
use crate::errors::StorageError;

// A write job runs against the actor's dedicated connection. The return type
// is erased to `Box<dyn Any>` so one channel can carry jobs of any type.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for sending jobs to the writer actor. Cheap to clone.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Runs `job` on the writer's connection inside an immediate transaction
    /// and returns its result.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("writer actor's receiving channel was closed");

        ret_rx
            .await
            .expect("writer actor dropped the reply sender without responding")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("failed to downcast writer actor result"))
            })
    }
}

/// Spawns a background Tokio task that acts as the single writer to the
/// database. The actor holds one pooled connection for its whole lifetime and
/// processes jobs serially; it terminates once every `WriteHandle` is dropped.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("failed to get a connection from the pool for the writer actor");

        while let Some((job, reply_tx)) = rx.recv().await {
            // An immediate transaction takes the write lock up front, so a
            // half-applied batch never becomes visible to readers.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(|e: StorageError| e.into());

            // Receiver may have been dropped (caller cancelled); not an error.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
