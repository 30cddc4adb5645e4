//! Async JoinSplit verifier service.

use std::{
    sync::Arc,
    task::{Context, Poll},
};

use futures::{future::BoxFuture, FutureExt};
use tower::Service;

use sprout_chain::{primitives::ed25519, sprout::JoinSplit};

use crate::{
    circuit::Statement,
    error::VerificationError,
    primitives::{spawn_fifo_and_convert, ProvingSystem},
    BoxError,
};

/// A JoinSplit to verify, with the signing key of its transaction.
#[derive(Clone, Debug)]
pub struct Item {
    /// The JoinSplit description.
    pub joinsplit: JoinSplit,
    /// The JoinSplit signing key of its transaction.
    pub joinsplit_pub_key: ed25519::VerificationKeyBytes,
}

impl From<(JoinSplit, ed25519::VerificationKeyBytes)> for Item {
    fn from((joinsplit, joinsplit_pub_key): (JoinSplit, ed25519::VerificationKeyBytes)) -> Self {
        Item {
            joinsplit,
            joinsplit_pub_key,
        }
    }
}

impl Item {
    /// Verifies this item synchronously.
    pub fn verify_single<P>(&self, proving_system: &P) -> Result<(), VerificationError>
    where
        P: ProvingSystem + ?Sized,
    {
        let statement = Statement::from_joinsplit(&self.joinsplit, &self.joinsplit_pub_key);

        proving_system.verify_proof(&statement, &self.joinsplit.zkproof)
    }
}

/// Verifies JoinSplit proofs on the rayon thread pool.
///
/// JoinSplit proofs are not batched, so the service is always ready.
/// Clone the service to get a handle for another task.
#[derive(Debug)]
pub struct Verifier<P> {
    proving_system: Arc<P>,
}

impl<P> Clone for Verifier<P> {
    fn clone(&self) -> Self {
        Verifier {
            proving_system: self.proving_system.clone(),
        }
    }
}

impl<P> Verifier<P>
where
    P: ProvingSystem + Send + Sync + 'static,
{
    /// Creates a verifier service for `proving_system`.
    pub fn new(proving_system: P) -> Self {
        Verifier {
            proving_system: Arc::new(proving_system),
        }
    }
}

impl<P> Service<Item> for Verifier<P>
where
    P: ProvingSystem + Send + Sync + 'static,
{
    type Response = ();
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<(), BoxError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, item: Item) -> Self::Future {
        let proving_system = self.proving_system.clone();

        async move {
            // Correctness: Do CPU-intensive work on a dedicated thread, to avoid blocking other futures.
            let result =
                spawn_fifo_and_convert(move || item.verify_single(&*proving_system)).await;

            match &result {
                Ok(()) => metrics::counter!("proofs.groth16.verified").increment(1),
                Err(error) => {
                    metrics::counter!("proofs.groth16.invalid").increment(1);
                    tracing::debug!(?error, "JoinSplit proof failed verification");
                }
            }

            result
        }
        .boxed()
    }
}
