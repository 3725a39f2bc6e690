// src/db/projection.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Conteúdo completo de uma tabela logo após uma mutação.
pub type Snapshot<T> = Arc<Vec<T>>;

struct Listeners<T> {
    next_id: u64,
    senders: HashMap<u64, UnboundedSender<Snapshot<T>>>,
}

// Um lock envenenado só significa que alguém entrou em pânico segurando o mapa;
// o mapa em si continua consistente.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registro de observadores de uma tabela.
///
/// O `RecordStore` chama [`Projection::publish`] depois de cada mutação confirmada,
/// ainda segurando o lock de escrita da tabela; assim os snapshots chegam na mesma
/// ordem das mutações e nunca um snapshot antigo aparece depois de um mais novo.
pub struct Projection<T> {
    table: &'static str,
    listeners: Arc<Mutex<Listeners<T>>>,
}

impl<T> Clone for Projection<T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<T: Send + Sync + 'static> Projection<T> {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            listeners: Arc::new(Mutex::new(Listeners {
                next_id: 0,
                senders: HashMap::new(),
            })),
        }
    }

    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut listeners = lock(&self.listeners);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.senders.insert(id, tx);
        tracing::debug!(table = self.table, subscription = id, "observador registrado");

        Subscription {
            id,
            table: self.table,
            rx,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Entrega o snapshot a todos os observadores registrados neste instante.
    pub fn publish(&self, snapshot: Vec<T>) {
        let snapshot: Snapshot<T> = Arc::new(snapshot);
        let mut listeners = lock(&self.listeners);
        listeners
            .senders
            .retain(|_, tx| tx.send(Arc::clone(&snapshot)).is_ok());
        tracing::debug!(
            table = self.table,
            rows = snapshot.len(),
            observers = listeners.senders.len(),
            "snapshot publicado"
        );
    }

    pub fn observer_count(&self) -> usize {
        lock(&self.listeners).senders.len()
    }
}

/// Inscrição em uma tabela. Soltar (drop) a inscrição cancela o registro.
pub struct Subscription<T> {
    id: u64,
    table: &'static str,
    rx: UnboundedReceiver<Snapshot<T>>,
    listeners: Weak<Mutex<Listeners<T>>>,
}

impl<T> Subscription<T> {
    /// Espera o próximo snapshot. `None` se o store já não existe.
    pub async fn recv(&mut self) -> Option<Snapshot<T>> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Snapshot<T>> {
        self.rx.try_recv().ok()
    }

    /// Descarta os snapshots intermediários e devolve só o mais recente.
    pub fn latest(&mut self) -> Option<Snapshot<T>> {
        let mut newest = None;
        while let Ok(snapshot) = self.rx.try_recv() {
            newest = Some(snapshot);
        }
        newest
    }

    /// Cancela a inscrição. Nada mais é entregue depois que esta chamada retorna,
    /// nem mesmo snapshots que já estavam na fila.
    pub fn unsubscribe(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            lock(&listeners).senders.remove(&self.id);
        }
        self.rx.close();
        tracing::debug!(table = self.table, subscription = self.id, "observador removido");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_observer_receives_the_snapshot() {
        let projection = Projection::<u32>::new("test");
        let mut a = projection.subscribe();
        let mut b = projection.subscribe();

        projection.publish(vec![1, 2, 3]);

        assert_eq!(a.try_recv().as_deref(), Some(&vec![1, 2, 3]));
        assert_eq!(b.try_recv().as_deref(), Some(&vec![1, 2, 3]));
        assert!(a.try_recv().is_none());
    }

    #[test]
    fn unsubscribed_observer_is_removed_before_publish() {
        let projection = Projection::<u32>::new("test");
        let mut kept = projection.subscribe();
        let gone = projection.subscribe();
        assert_eq!(projection.observer_count(), 2);

        gone.unsubscribe();
        assert_eq!(projection.observer_count(), 1);

        projection.publish(vec![7]);
        assert_eq!(kept.try_recv().as_deref(), Some(&vec![7]));
    }

    #[test]
    fn snapshots_arrive_in_publish_order() {
        let projection = Projection::<u32>::new("test");
        let mut sub = projection.subscribe();

        projection.publish(vec![1]);
        projection.publish(vec![1, 2]);

        assert_eq!(sub.try_recv().as_deref(), Some(&vec![1]));
        assert_eq!(sub.try_recv().as_deref(), Some(&vec![1, 2]));
    }

    #[test]
    fn latest_skips_stale_snapshots() {
        let projection = Projection::<u32>::new("test");
        let mut sub = projection.subscribe();

        projection.publish(vec![1]);
        projection.publish(vec![1, 2]);
        projection.publish(vec![1, 2, 3]);

        assert_eq!(sub.latest().as_deref(), Some(&vec![1, 2, 3]));
        assert!(sub.latest().is_none());
    }

    #[tokio::test]
    async fn recv_ends_when_projection_is_dropped() {
        let projection = Projection::<u32>::new("test");
        let mut sub = projection.subscribe();
        drop(projection);

        assert!(sub.recv().await.is_none());
    }
}
