use std::sync::mpsc::{self, Receiver, SendError, Sender, TryRecvError};

use super::ports::BackendMessage;

/// Write end handed to backends; cheap to clone across tasks.
#[derive(Clone)]
pub struct BackendBusSender {
    tx: Sender<BackendMessage>,
}

/// Read end drained by the UI loop.
pub struct BackendBusReceiver {
    rx: Receiver<BackendMessage>,
}

pub fn backend_bus() -> (BackendBusSender, BackendBusReceiver) {
    let (tx, rx) = mpsc::channel();
    (BackendBusSender { tx }, BackendBusReceiver { rx })
}

impl BackendBusSender {
    pub fn send(&self, msg: BackendMessage) -> Result<(), SendError<BackendMessage>> {
        self.tx.send(msg)
    }
}

impl BackendBusReceiver {
    pub fn try_recv(&mut self) -> Result<BackendMessage, TryRecvError> {
        self.rx.try_recv()
    }

    pub fn recv_timeout(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<BackendMessage, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}
