use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use minefield_core::{Coord2, Field};

use crate::Session;

#[derive(Debug)]
struct Shared {
    field: RwLock<Field>,
    players: AtomicUsize,
}

/// One board shared by every connected session.
///
/// The whole field sits behind a single lock: each `write` closure, a reveal cascade
/// included, runs to completion before any other request sees the field. Reads may
/// overlap each other but never a write.
#[derive(Clone, Debug)]
pub struct SharedField {
    inner: Arc<Shared>,
}

impl SharedField {
    pub fn new(field: Field) -> Self {
        Self {
            inner: Arc::new(Shared {
                field: RwLock::new(field),
                players: AtomicUsize::new(0),
            }),
        }
    }

    pub fn size(&self) -> Coord2 {
        self.read(Field::size)
    }

    pub fn render(&self) -> String {
        self.read(Field::render)
    }

    /// Players currently holding a session on this board.
    pub fn players(&self) -> usize {
        self.inner.players.load(Ordering::SeqCst)
    }

    pub fn read<R>(&self, f: impl FnOnce(&Field) -> R) -> R {
        // field operations never panic halfway through, so a poisoned lock still holds a
        // consistent board
        let field = self.inner.field.read().unwrap_or_else(PoisonError::into_inner);
        f(&field)
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut Field) -> R) -> R {
        let mut field = self
            .inner
            .field
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut field)
    }

    /// Opens a session for a new player.
    pub fn join(&self, debug: bool) -> Session {
        let players = self.inner.players.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Player joined, {} connected", players);
        Session::new(self.clone(), debug)
    }

    pub(crate) fn leave(&self) {
        let players = self.inner.players.fetch_sub(1, Ordering::SeqCst) - 1;
        log::debug!("Player left, {} connected", players);
    }
}
